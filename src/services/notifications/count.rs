use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::ApiResponse;
use crate::models::notifications::responses::UnreadCountResponse;
use crate::services::{OrInternal, Reply, current_user, respond};

pub async fn get_unread_count(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(count(service, request).await)
}

async fn count(service: &NotificationService, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;

    let unread_count = service
        .get_storage(request)
        .get_unread_notification_count(user.id)
        .await
        .or_internal("Failed to count unread notifications")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UnreadCountResponse { unread_count },
        "Unread count retrieved",
    )))
}
