use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::evict_cached_user;
use crate::services::{OrInternal, Reply, bad_request, current_user, not_found, respond};

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(delete(service, user_id, request).await)
}

async fn delete(service: &UserService, user_id: i64, request: &HttpRequest) -> Reply {
    let admin = current_user(request)?;

    if admin.id == user_id {
        return Err(bad_request(
            ErrorCode::CanNotDeleteCurrentUser,
            "You cannot delete your own account",
        ));
    }

    let storage = service.get_storage(request);

    // 关联数据由外键级联删除
    let deleted = storage
        .delete_user(user_id)
        .await
        .or_internal("Failed to delete user")?;

    if !deleted {
        return Err(not_found(ErrorCode::UserNotFound, "User not found"));
    }
    evict_cached_user(request, user_id).await;

    info!("User {} deleted by {}", user_id, admin.username);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted")))
}
