use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TimetableService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, not_found, respond};

pub async fn delete_slot(
    service: &TimetableService,
    slot_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(delete(service, slot_id, request).await)
}

async fn delete(service: &TimetableService, slot_id: i64, request: &HttpRequest) -> Reply {
    // 该时段的考勤记录随之级联删除
    let deleted = service
        .get_storage(request)
        .delete_slot(slot_id)
        .await
        .or_internal("Failed to delete timetable slot")?;

    if !deleted {
        return Err(not_found(ErrorCode::TimetableSlotNotFound, "Timetable slot not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Timetable slot deleted")))
}
