use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TimetableService, prepare_slot};
use crate::models::timetable::requests::SlotRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, not_found, respond};

pub async fn create_slot(
    service: &TimetableService,
    slot: SlotRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(create(service, slot, request).await)
}

async fn create(service: &TimetableService, slot: SlotRequest, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let slot = prepare_slot(&storage, 0, slot).await?;
    let created = storage
        .create_slot(slot)
        .await
        .or_internal("Failed to create timetable slot")?;

    info!(
        "Created timetable slot {} (class {}, day {}, {}-{})",
        created.id, created.class_id, created.day_of_week, created.start_time, created.end_time
    );

    let entry = storage
        .get_timetable_entry(created.id)
        .await
        .or_internal("Failed to load timetable slot")?
        .ok_or_else(|| not_found(ErrorCode::TimetableSlotNotFound, "Timetable slot not found"))?;

    Ok(HttpResponse::Created().json(ApiResponse::success(entry, "Timetable slot created")))
}
