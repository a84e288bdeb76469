use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AttendanceService, parse_range};
use crate::models::attendance::{
    entities::{AttendanceStatus, AttendanceSummary},
    requests::ClassAttendanceQuery,
    responses::{ClassAttendanceReport, StudentAttendanceRow},
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::require_teaches;
use crate::services::system::DynamicConfig;
use crate::services::{OrInternal, Reply, current_user, not_found, respond};

pub async fn class_report(
    service: &AttendanceService,
    query: ClassAttendanceQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(report(service, query, request).await)
}

async fn report(service: &AttendanceService, query: ClassAttendanceQuery, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    storage
        .get_class_by_id(query.class_id)
        .await
        .or_internal("Failed to get class")?
        .ok_or_else(|| not_found(ErrorCode::ClassNotFound, "Class not found"))?;

    // 教师只能查看自己任课的班级
    if user.role == UserRole::Teacher {
        require_teaches(&storage, user.id, query.class_id, None).await?;
    }

    let (from, to) = parse_range(query.from.as_deref(), query.to.as_deref())?;

    let records = storage
        .list_class_attendance(query.class_id, from, to)
        .await
        .or_internal("Failed to load attendance")?;

    let mut by_student: HashMap<i64, Vec<AttendanceStatus>> = HashMap::new();
    for record in &records {
        by_student
            .entry(record.student_id)
            .or_default()
            .push(record.status);
    }

    let threshold = DynamicConfig::attendance_warning_threshold().await;
    let students = storage
        .list_class_students(query.class_id)
        .await
        .or_internal("Failed to list class students")?
        .into_iter()
        .map(|student| {
            let summary = AttendanceSummary::from_statuses(
                by_student.remove(&student.user_id).unwrap_or_default(),
            );
            StudentAttendanceRow {
                flagged: summary.below(threshold),
                summary,
                student,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ClassAttendanceReport {
            class_id: query.class_id,
            from: from.map(|d| d.format("%Y-%m-%d").to_string()),
            to: to.map(|d| d.format("%Y-%m-%d").to_string()),
            threshold,
            overall: AttendanceSummary::from_records(&records),
            students,
        },
        "Attendance report retrieved",
    )))
}
