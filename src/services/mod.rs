/// 定义按请求懒取存储的服务结构体
///
/// 存储在启动时以 `web::Data<Arc<dyn Storage>>` 注册，服务实例本身是全局静态的。
macro_rules! lazy_service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name {
            storage: Option<std::sync::Arc<dyn $crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> std::sync::Arc<dyn $crate::storage::Storage> {
                if let Some(storage) = &self.storage {
                    storage.clone()
                } else {
                    request
                        .app_data::<actix_web::web::Data<std::sync::Arc<dyn $crate::storage::Storage>>>()
                        .expect("Storage not found in app data")
                        .get_ref()
                        .clone()
                }
            }
        }
    };
}

pub mod access;
pub mod announcements;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod dashboard;
pub mod events;
pub mod exams;
pub mod marks;
pub mod notifications;
pub mod portfolio;
pub mod profile;
pub mod ptm;
pub mod subjects;
pub mod system;
pub mod timetable;
pub mod users;

pub use announcements::AnnouncementService;
pub use assignments::AssignmentService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use dashboard::DashboardService;
pub use events::EventService;
pub use exams::ExamService;
pub use marks::MarksService;
pub use notifications::NotificationService;
pub use portfolio::PortfolioService;
pub use profile::ProfileService;
pub use ptm::PtmService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use timetable::TimetableService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};

/// 处理流程中任一步骤都可能直接给出响应
pub(crate) type Reply = std::result::Result<HttpResponse, HttpResponse>;

pub(crate) fn respond(reply: Reply) -> ActixResult<HttpResponse> {
    Ok(reply.unwrap_or_else(|resp| resp))
}

/// 当前登录用户，仅在 RequireJWT 之后可用
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn forbidden(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn conflict(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(code, message))
}

/// 存储层错误统一记日志并返回 500
pub(crate) trait OrInternal<T> {
    fn or_internal(self, context: &str) -> Result<T, HttpResponse>;
    /// 唯一约束冲突返回 409，其余同 `or_internal`
    fn or_conflict(self, code: ErrorCode, message: &str, context: &str)
    -> Result<T, HttpResponse>;
}

fn internal_error(context: &str, e: &crate::errors::EduBridgeError) -> HttpResponse {
    tracing::error!("{context}: {e}");
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {e}"),
    ))
}

impl<T> OrInternal<T> for crate::errors::Result<T> {
    fn or_internal(self, context: &str) -> Result<T, HttpResponse> {
        self.map_err(|e| internal_error(context, &e))
    }

    fn or_conflict(
        self,
        code: ErrorCode,
        message: &str,
        context: &str,
    ) -> Result<T, HttpResponse> {
        self.map_err(|e| {
            if e.is_conflict() {
                conflict(code, message)
            } else {
                internal_error(context, &e)
            }
        })
    }
}

/// 学校所在地的今天（服务器本地时区）
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// 去除首尾空白，空字符串视为未提供
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  hi ".into())), Some("hi".to_string()));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_or_internal_maps_to_500() {
        let result: crate::errors::Result<()> =
            Err(crate::errors::EduBridgeError::database_operation("boom"));
        let resp = result.or_internal("Failed").unwrap_err();
        assert_eq!(resp.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_or_conflict_distinguishes_unique_violation() {
        let dup: crate::errors::Result<()> =
            Err(crate::errors::EduBridgeError::conflict("duplicate"));
        let resp = dup
            .or_conflict(ErrorCode::ClassAlreadyExists, "exists", "Failed")
            .unwrap_err();
        assert_eq!(resp.status(), actix_web::http::StatusCode::CONFLICT);

        let other: crate::errors::Result<()> =
            Err(crate::errors::EduBridgeError::database_operation("down"));
        let resp = other
            .or_conflict(ErrorCode::ClassAlreadyExists, "exists", "Failed")
            .unwrap_err();
        assert_eq!(resp.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_respond_unwraps_early_return() {
        let resp = respond(Err(not_found(ErrorCode::NotFound, "missing"))).unwrap();
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
