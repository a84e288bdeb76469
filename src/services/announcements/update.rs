use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AnnouncementService, manageable};
use crate::models::announcements::requests::UpdateAnnouncementRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, bad_request, current_user, not_found, respond};

pub async fn update_announcement(
    service: &AnnouncementService,
    announcement_id: i64,
    update: UpdateAnnouncementRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(update_one(service, announcement_id, update, request).await)
}

async fn update_one(
    service: &AnnouncementService,
    announcement_id: i64,
    update: UpdateAnnouncementRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    manageable(&storage, &user, announcement_id).await?;

    let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
    if blank(&update.title) || blank(&update.content) {
        return Err(bad_request(
            ErrorCode::BadRequest,
            "Title and content must not be empty",
        ));
    }

    let updated = storage
        .update_announcement(announcement_id, update)
        .await
        .or_internal("Failed to update announcement")?
        .ok_or_else(|| not_found(ErrorCode::AnnouncementNotFound, "Announcement not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Announcement updated")))
}
