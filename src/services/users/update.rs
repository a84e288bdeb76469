use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::users::{
    entities::UserStatus,
    requests::{UpdateUserRequest, UserChanges},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::evict_cached_user;
use crate::services::{
    OrInternal, Reply, bad_request, conflict, current_user, non_blank, not_found, respond,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_phone};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(update(service, user_id, update_data, request).await)
}

async fn update(
    service: &UserService,
    user_id: i64,
    update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> Reply {
    let admin = current_user(request)?;
    let storage = service.get_storage(request);

    let mut changes = UserChanges {
        display_name: update_data.display_name.map(|n| n.trim().to_string()),
        avatar_url: update_data.avatar_url,
        ..Default::default()
    };

    if let Some(email) = update_data.email {
        let email = email.trim().to_lowercase();
        validate_email(&email).map_err(|msg| bad_request(ErrorCode::UserEmailInvalid, msg))?;
        let owner = storage
            .get_user_by_email(&email)
            .await
            .or_internal("Failed to check email")?;
        if owner.is_some_and(|u| u.id != user_id) {
            return Err(conflict(ErrorCode::UserEmailAlreadyExists, "Email already exists"));
        }
        changes.email = Some(email);
    }

    if let Some(phone) = update_data.phone {
        if !phone.is_empty() {
            validate_phone(&phone).map_err(|msg| bad_request(ErrorCode::BadRequest, msg))?;
        }
        changes.phone = Some(phone);
    }

    if let Some(password) = non_blank(update_data.password) {
        validate_password_simple(&password)
            .map_err(|msg| bad_request(ErrorCode::PasswordPolicyViolation, msg))?;
        changes.password_hash =
            Some(hash_password(&password).or_internal("Password hashing failed")?);
    }

    if let Some(status) = update_data.status {
        // 管理员不能停用自己
        if user_id == admin.id && status != UserStatus::Active {
            return Err(bad_request(
                ErrorCode::BadRequest,
                "You cannot deactivate your own account",
            ));
        }
        changes.status = Some(status);
    }

    let user = storage
        .update_user(user_id, changes)
        .await
        .or_internal("Failed to update user")?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User not found"))?;

    // 停用立即生效，不等 token 过期
    evict_cached_user(request, user.id).await;
    info!("User {} updated by {}", user.username, admin.username);

    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User updated")))
}
