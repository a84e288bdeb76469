use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EventService;
use crate::models::events::{entities::validate_event_window, requests::CreateEventRequest};
use crate::models::notifications::{entities::NotificationType, requests::NewNotification};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::notify;
use crate::services::{OrInternal, Reply, bad_request, current_user, non_blank, respond};

pub async fn create_event(
    service: &EventService,
    event: CreateEventRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(create(service, event, request).await)
}

async fn create(service: &EventService, mut event: CreateEventRequest, request: &HttpRequest) -> Reply {
    let admin = current_user(request)?;
    let storage = service.get_storage(request);

    if event.title.trim().is_empty() {
        return Err(bad_request(ErrorCode::BadRequest, "Title must not be empty"));
    }
    validate_event_window(event.start_at, event.end_at)
        .map_err(|msg| bad_request(ErrorCode::BadRequest, msg))?;

    event.description = non_blank(event.description);
    event.location = non_blank(event.location);

    let created = storage
        .create_event(admin.id, event)
        .await
        .or_internal("Failed to create event")?;

    info!("Admin {} created event {}", admin.username, created.id);

    let recipients = storage
        .list_active_user_ids(&[UserRole::Teacher, UserRole::Student, UserRole::Parent])
        .await
        .or_internal("Failed to list users")?;
    let when = created.start_at.format("%Y-%m-%d %H:%M UTC").to_string();
    notify(
        &storage,
        &recipients,
        NewNotification::new(NotificationType::Event, created.title.clone())
            .content(match &created.location {
                Some(location) => format!("{when} at {location}"),
                None => when,
            })
            .reference("event", created.id),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Event created")))
}
