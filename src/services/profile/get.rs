use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfileService;
use crate::models::ApiResponse;
use crate::models::auth::responses::ProfileResponse;
use crate::models::users::entities::UserRole;
use crate::services::{OrInternal, Reply, current_user, respond};

pub async fn get_profile(
    service: &ProfileService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(profile(service, request).await)
}

async fn profile(service: &ProfileService, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    // 缓存中的用户可能已过期，以数据库为准
    let user = storage
        .get_user_by_id(user.id)
        .await
        .or_internal("Failed to get profile")?
        .unwrap_or(user);

    let mut response = ProfileResponse {
        user,
        student: None,
        children: Vec::new(),
        classes: Vec::new(),
    };

    match response.user.role {
        UserRole::Student => {
            response.student = storage
                .get_student_summary(response.user.id)
                .await
                .or_internal("Failed to get student profile")?;
        }
        UserRole::Parent => {
            response.children = storage
                .list_children(response.user.id)
                .await
                .or_internal("Failed to list children")?;
        }
        UserRole::Teacher => {
            response.classes = storage
                .list_teacher_classes(response.user.id)
                .await
                .or_internal("Failed to list classes")?;
        }
        UserRole::Admin => {}
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Profile retrieved")))
}
