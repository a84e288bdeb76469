use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AnnouncementService, manageable};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, current_user, not_found, respond};

pub async fn delete_announcement(
    service: &AnnouncementService,
    announcement_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(delete(service, announcement_id, request).await)
}

async fn delete(service: &AnnouncementService, announcement_id: i64, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    manageable(&storage, &user, announcement_id).await?;

    if !storage
        .delete_announcement(announcement_id)
        .await
        .or_internal("Failed to delete announcement")?
    {
        return Err(not_found(ErrorCode::AnnouncementNotFound, "Announcement not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Announcement deleted")))
}
