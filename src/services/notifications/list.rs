use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::ApiResponse;
use crate::models::notifications::requests::NotificationListParams;
use crate::services::{OrInternal, Reply, current_user, respond};

pub async fn list_notifications(
    service: &NotificationService,
    query: NotificationListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, query, request).await)
}

async fn list(service: &NotificationService, query: NotificationListParams, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;

    let response = service
        .get_storage(request)
        .list_notifications_with_pagination(
            user.id,
            Some(query.pagination.page),
            Some(query.pagination.size),
            query.unread_only,
        )
        .await
        .or_internal("Failed to list notifications")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Notifications retrieved")))
}
