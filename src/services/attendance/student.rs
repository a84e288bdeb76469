use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AttendanceService, parse_range};
use crate::models::ApiResponse;
use crate::models::attendance::{
    entities::AttendanceSummary, requests::AttendanceRangeQuery,
    responses::StudentAttendanceResponse,
};
use crate::services::access::{own_student, require_child};
use crate::services::system::DynamicConfig;
use crate::services::{OrInternal, Reply, current_user, respond};

pub async fn my_attendance(
    service: &AttendanceService,
    query: AttendanceRangeQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(mine(service, query, request).await)
}

pub async fn child_attendance(
    service: &AttendanceService,
    student_id: i64,
    query: AttendanceRangeQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(child(service, student_id, query, request).await)
}

async fn mine(service: &AttendanceService, query: AttendanceRangeQuery, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    own_student(&storage, user.id).await?;

    load(service, user.id, query, request).await
}

async fn child(
    service: &AttendanceService,
    student_id: i64,
    query: AttendanceRangeQuery,
    request: &HttpRequest,
) -> Reply {
    let parent = current_user(request)?;
    let storage = service.get_storage(request);
    require_child(&storage, parent.id, student_id).await?;

    load(service, student_id, query, request).await
}

async fn load(
    service: &AttendanceService,
    student_id: i64,
    query: AttendanceRangeQuery,
    request: &HttpRequest,
) -> Reply {
    let (from, to) = parse_range(query.from.as_deref(), query.to.as_deref())?;

    let records = service
        .get_storage(request)
        .list_student_attendance(student_id, from, to)
        .await
        .or_internal("Failed to load attendance")?;

    let threshold = DynamicConfig::attendance_warning_threshold().await;
    let summary = AttendanceSummary::from_records(&records);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentAttendanceResponse {
            below_threshold: summary.below(threshold),
            summary,
            threshold,
            records,
        },
        "Attendance retrieved",
    )))
}
