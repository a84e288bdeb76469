use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, current_user, not_found, respond};

pub async fn delete_event(
    service: &EventService,
    event_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(delete(service, event_id, request).await)
}

async fn delete(service: &EventService, event_id: i64, request: &HttpRequest) -> Reply {
    current_user(request)?;

    let deleted = service
        .get_storage(request)
        .delete_event(event_id)
        .await
        .or_internal("Failed to delete event")?;

    if !deleted {
        return Err(not_found(ErrorCode::EventNotFound, "Event not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Event deleted")))
}
