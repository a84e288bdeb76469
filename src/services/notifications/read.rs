use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::notifications::responses::MarkAllReadResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, current_user, not_found, respond};

pub async fn mark_as_read(
    service: &NotificationService,
    notification_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(read_one(service, notification_id, request).await)
}

pub async fn mark_all_as_read(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(read_all(service, request).await)
}

async fn read_one(service: &NotificationService, notification_id: i64, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;

    // 他人的通知与不存在的通知一样处理
    let marked = service
        .get_storage(request)
        .mark_notification_as_read(notification_id, user.id)
        .await
        .or_internal("Failed to mark notification as read")?;

    if !marked {
        return Err(not_found(ErrorCode::NotificationNotFound, "Notification not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Notification marked as read")))
}

async fn read_all(service: &NotificationService, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;

    let marked_count = service
        .get_storage(request)
        .mark_all_notifications_as_read(user.id)
        .await
        .or_internal("Failed to mark notifications as read")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MarkAllReadResponse { marked_count },
        "All notifications marked as read",
    )))
}
