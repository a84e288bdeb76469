use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, current_user, not_found, respond};

pub async fn delete_notification(
    service: &NotificationService,
    notification_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(delete(service, notification_id, request).await)
}

async fn delete(service: &NotificationService, notification_id: i64, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;

    let deleted = service
        .get_storage(request)
        .delete_notification(notification_id, user.id)
        .await
        .or_internal("Failed to delete notification")?;

    if !deleted {
        return Err(not_found(ErrorCode::NotificationNotFound, "Notification not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Notification deleted")))
}
