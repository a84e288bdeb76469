pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod roster;
pub mod teacher;
pub mod update;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ErrorCode;
use crate::models::classes::requests::{ClassQueryParams, CreateClassRequest, UpdateClassRequest};
use crate::models::users::entities::UserRole;
use crate::services::access::require_user_with_role;
use crate::storage::Storage;

lazy_service!(ClassService);

impl ClassService {
    // 获取班级列表
    pub async fn list_classes(
        &self,
        query: ClassQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, query, request).await
    }

    // 创建班级
    pub async fn create_class(
        &self,
        class_data: CreateClassRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, class_data, request).await
    }

    // 获取班级信息
    pub async fn get_class(&self, class_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_class(self, class_id, request).await
    }

    // 更新班级信息
    pub async fn update_class(
        &self,
        class_id: i64,
        update_data: UpdateClassRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, class_id, update_data, request).await
    }

    // 删除班级
    pub async fn delete_class(
        &self,
        class_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, class_id, request).await
    }

    // 班级名单（管理员任意班级，教师仅任课班级）
    pub async fn get_roster(&self, class_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        roster::get_roster(self, class_id, request).await
    }

    // 教师的任课班级
    pub async fn list_my_classes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        teacher::list_my_classes(self, request).await
    }
}

/// 班主任必须是教师
async fn check_class_teacher(
    storage: &Arc<dyn Storage>,
    class_teacher_id: Option<i64>,
) -> Result<(), HttpResponse> {
    if let Some(teacher_id) = class_teacher_id {
        require_user_with_role(storage, teacher_id, UserRole::Teacher).await?;
    }
    Ok(())
}

fn require_text(value: &str, field: &str) -> Result<(), HttpResponse> {
    if value.trim().is_empty() {
        return Err(crate::services::bad_request(
            ErrorCode::BadRequest,
            format!("{field} must not be empty"),
        ));
    }
    Ok(())
}
