use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::{entities::UserRole, responses::UserResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, not_found, respond};

pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(get(service, user_id, request).await)
}

async fn get(service: &UserService, user_id: i64, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let user = storage
        .get_user_by_id(user_id)
        .await
        .or_internal("Failed to get user")?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User not found"))?;

    let student = if user.role == UserRole::Student {
        storage
            .get_student_profile(user.id)
            .await
            .or_internal("Failed to get student profile")?
    } else {
        None
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserResponse { user, student },
        "User retrieved",
    )))
}
