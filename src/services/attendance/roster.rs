use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AttendanceService, teacher_slot};
use crate::models::attendance::{
    requests::RosterQuery,
    responses::{RosterEntry, RosterResponse},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, current_user, not_found, respond};

pub async fn get_roster(
    service: &AttendanceService,
    query: RosterQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(roster(service, query, request).await)
}

async fn roster(service: &AttendanceService, query: RosterQuery, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    let (slot, date) = teacher_slot(&storage, teacher.id, query.slot_id, &query.date).await?;

    let entry = storage
        .get_timetable_entry(slot.id)
        .await
        .or_internal("Failed to get timetable slot")?
        .ok_or_else(|| not_found(ErrorCode::TimetableSlotNotFound, "Timetable slot not found"))?;

    let mut marked: HashMap<i64, _> = storage
        .list_slot_attendance(slot.id, date)
        .await
        .or_internal("Failed to load attendance")?
        .into_iter()
        .map(|r| (r.student_id, r))
        .collect();

    let entries = storage
        .list_class_students(slot.class_id)
        .await
        .or_internal("Failed to list class students")?
        .into_iter()
        .map(|student| {
            let record = marked.remove(&student.user_id);
            RosterEntry {
                status: record.as_ref().map(|r| r.status),
                remarks: record.and_then(|r| r.remarks),
                student,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RosterResponse {
            slot: entry,
            date: date.format("%Y-%m-%d").to_string(),
            entries,
        },
        "Roster retrieved",
    )))
}
