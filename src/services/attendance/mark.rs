use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AttendanceService, teacher_slot};
use crate::models::attendance::{
    entities::{AttendanceStatus, AttendanceSummary},
    requests::{AttendanceEntryInput, AttendanceUpsert, MarkAttendanceRequest},
    responses::MarkAttendanceResponse,
};
use crate::models::notifications::{entities::NotificationType, requests::NewNotification};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{name_of, notify, subject_names};
use crate::services::{OrInternal, Reply, bad_request, current_user, non_blank, respond};

pub async fn mark_attendance(
    service: &AttendanceService,
    attendance: MarkAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(mark(service, attendance, request).await)
}

/// 同一名学生在一次点名中只能出现一次，且必须属于该班级
fn check_entries(
    entries: &[AttendanceEntryInput],
    class_students: &HashSet<i64>,
) -> Result<(), HttpResponse> {
    if entries.is_empty() {
        return Err(bad_request(ErrorCode::BadRequest, "No attendance entries provided"));
    }

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !class_students.contains(&entry.student_id) {
            return Err(bad_request(
                ErrorCode::AttendanceStudentNotInClass,
                format!("Student {} does not belong to this class", entry.student_id),
            ));
        }
        if !seen.insert(entry.student_id) {
            return Err(bad_request(
                ErrorCode::BadRequest,
                format!("Student {} is listed more than once", entry.student_id),
            ));
        }
    }

    Ok(())
}

async fn mark(
    service: &AttendanceService,
    attendance: MarkAttendanceRequest,
    request: &HttpRequest,
) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    let (slot, date) =
        teacher_slot(&storage, teacher.id, attendance.slot_id, &attendance.date).await?;

    let class_students: HashSet<i64> = storage
        .list_class_students(slot.class_id)
        .await
        .or_internal("Failed to list class students")?
        .into_iter()
        .map(|s| s.user_id)
        .collect();
    check_entries(&attendance.entries, &class_students)?;

    let entries: Vec<AttendanceUpsert> = attendance
        .entries
        .into_iter()
        .map(|e| AttendanceUpsert {
            student_id: e.student_id,
            status: e.status,
            remarks: non_blank(e.remarks),
        })
        .collect();

    let records = storage
        .upsert_attendance(&slot, date, entries, teacher.id)
        .await
        .or_internal("Failed to save attendance")?;

    let summary = AttendanceSummary::from_records(&records);
    info!(
        "Teacher {} marked slot {} on {}: {} present, {} absent, {} late, {} excused",
        teacher.username, slot.id, date, summary.present, summary.absent, summary.late, summary.excused
    );

    let absent: Vec<i64> = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Absent)
        .map(|r| r.student_id)
        .collect();

    if !absent.is_empty() {
        let subjects = subject_names(&storage, &[slot.subject_id]).await?;
        let subject = name_of(&subjects, slot.subject_id);

        for student_id in absent {
            let parents = storage
                .list_parent_ids(student_id)
                .await
                .or_internal("Failed to list parents")?;
            notify(
                &storage,
                &parents,
                NewNotification::new(NotificationType::AttendanceAbsent, "Absence recorded")
                    .content(format!(
                        "Your child was marked absent for {} ({}-{}) on {}",
                        subject, slot.start_time, slot.end_time, date
                    ))
                    .reference("student", student_id),
            )
            .await;
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MarkAttendanceResponse {
            saved: records.len(),
            summary,
        },
        "Attendance saved",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(student_id: i64) -> AttendanceEntryInput {
        AttendanceEntryInput {
            student_id,
            status: AttendanceStatus::Present,
            remarks: None,
        }
    }

    #[test]
    fn test_check_entries() {
        let class: HashSet<i64> = [1, 2, 3].into_iter().collect();

        assert!(check_entries(&[entry(1), entry(3)], &class).is_ok());
        assert!(check_entries(&[], &class).is_err());
        assert!(check_entries(&[entry(1), entry(1)], &class).is_err());
        assert!(check_entries(&[entry(4)], &class).is_err());
    }
}
