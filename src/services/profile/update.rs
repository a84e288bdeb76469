use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfileService;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::requests::UserChanges;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::evict_cached_user;
use crate::services::{
    OrInternal, Reply, bad_request, conflict, current_user, not_found, respond,
};
use crate::utils::validate::{validate_email, validate_phone};

pub async fn update_profile(
    service: &ProfileService,
    update: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(update_own(service, update, request).await)
}

async fn update_own(
    service: &ProfileService,
    update: UpdateProfileRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let email = match update.email {
        Some(email) => {
            let email = email.trim().to_lowercase();
            validate_email(&email).map_err(|msg| bad_request(ErrorCode::UserEmailInvalid, msg))?;

            // 邮箱必须唯一（本人原邮箱除外）
            let owner = storage
                .get_user_by_email(&email)
                .await
                .or_internal("Failed to check email")?;
            if owner.is_some_and(|u| u.id != user.id) {
                return Err(conflict(
                    ErrorCode::UserEmailAlreadyExists,
                    "Email is already in use",
                ));
            }
            Some(email)
        }
        None => None,
    };

    if let Some(phone) = update.phone.as_deref().filter(|p| !p.is_empty()) {
        validate_phone(phone).map_err(|msg| bad_request(ErrorCode::BadRequest, msg))?;
    }

    let changes = UserChanges {
        email,
        display_name: update.display_name.map(|n| n.trim().to_string()),
        phone: update.phone,
        avatar_url: update.avatar_url,
        ..Default::default()
    };

    let updated = storage
        .update_user(user.id, changes)
        .await
        .or_internal("Failed to update profile")?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User not found"))?;
    evict_cached_user(request, updated.id).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Profile updated")))
}
