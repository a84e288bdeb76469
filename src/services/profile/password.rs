use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ProfileService;
use crate::models::auth::requests::ChangePasswordRequest;
use crate::models::users::requests::UserChanges;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, bad_request, current_user, not_found, respond};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password_simple;

pub async fn change_password(
    service: &ProfileService,
    change: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(change_own_password(service, change, request).await)
}

async fn change_own_password(
    service: &ProfileService,
    change: ChangePasswordRequest,
    request: &HttpRequest,
) -> Reply {
    let claims = current_user(request)?;
    let storage = service.get_storage(request);

    let user = storage
        .get_user_by_id(claims.id)
        .await
        .or_internal("Failed to get user")?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User not found"))?;

    if !verify_password(&change.current_password, &user.password_hash) {
        return Err(bad_request(
            ErrorCode::CurrentPasswordIncorrect,
            "Current password is incorrect",
        ));
    }

    validate_password_simple(&change.new_password)
        .map_err(|msg| bad_request(ErrorCode::PasswordPolicyViolation, msg))?;

    let password_hash = hash_password(&change.new_password).or_internal("Password hashing failed")?;

    storage
        .update_user(
            user.id,
            UserChanges {
                password_hash: Some(password_hash),
                ..Default::default()
            },
        )
        .await
        .or_internal("Failed to change password")?;

    info!("User {} changed password", user.username);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Password changed")))
}
