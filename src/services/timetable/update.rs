use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TimetableService, prepare_slot};
use crate::models::timetable::requests::SlotRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, not_found, respond};

pub async fn update_slot(
    service: &TimetableService,
    slot_id: i64,
    slot: SlotRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(update(service, slot_id, slot, request).await)
}

async fn update(
    service: &TimetableService,
    slot_id: i64,
    slot: SlotRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    let missing = || not_found(ErrorCode::TimetableSlotNotFound, "Timetable slot not found");

    storage
        .get_slot_by_id(slot_id)
        .await
        .or_internal("Failed to get timetable slot")?
        .ok_or_else(missing)?;

    let slot = prepare_slot(&storage, slot_id, slot).await?;
    storage
        .update_slot(slot_id, slot)
        .await
        .or_internal("Failed to update timetable slot")?
        .ok_or_else(missing)?;

    let entry = storage
        .get_timetable_entry(slot_id)
        .await
        .or_internal("Failed to load timetable slot")?
        .ok_or_else(missing)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(entry, "Timetable slot updated")))
}
