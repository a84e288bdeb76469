use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::events::{entities::validate_event_window, requests::UpdateEventRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, bad_request, current_user, not_found, respond};

pub async fn update_event(
    service: &EventService,
    event_id: i64,
    update: UpdateEventRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(update_one(service, event_id, update, request).await)
}

async fn update_one(
    service: &EventService,
    event_id: i64,
    update: UpdateEventRequest,
    request: &HttpRequest,
) -> Reply {
    current_user(request)?;
    let storage = service.get_storage(request);

    let existing = storage
        .get_event_by_id(event_id)
        .await
        .or_internal("Failed to get event")?
        .ok_or_else(|| not_found(ErrorCode::EventNotFound, "Event not found"))?;

    if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(bad_request(ErrorCode::BadRequest, "Title must not be empty"));
    }
    validate_event_window(
        update.start_at.unwrap_or(existing.start_at),
        update.end_at.or(existing.end_at),
    )
    .map_err(|msg| bad_request(ErrorCode::BadRequest, msg))?;

    let updated = storage
        .update_event(event_id, update)
        .await
        .or_internal("Failed to update event")?
        .ok_or_else(|| not_found(ErrorCode::EventNotFound, "Event not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Event updated")))
}
