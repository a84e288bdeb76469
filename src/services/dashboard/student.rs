use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::{DashboardService, UPCOMING_LIMIT, today_slots};
use crate::models::assignments::{entities::SubmissionStatus, requests::AssignmentListParams};
use crate::models::attendance::entities::AttendanceSummary;
use crate::models::dashboard::responses::StudentDashboard;
use crate::models::timetable::requests::TimetableQuery;
use crate::models::{ApiResponse, PaginationQuery};
use crate::services::access::own_student;
use crate::services::assignments::student_list::assignments_for;
use crate::services::{OrInternal, Reply, current_user, respond};

pub async fn student_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(overview(service, request).await)
}

async fn overview(service: &DashboardService, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let student = own_student(&storage, user.id).await?;
    let now = Utc::now();

    let (today_slots, upcoming_exams) = match student.class_id {
        Some(class_id) => (
            today_slots(
                &storage,
                TimetableQuery {
                    class_id: Some(class_id),
                    ..Default::default()
                },
            )
            .await?,
            storage
                .list_upcoming_exams(&[class_id], None, now, UPCOMING_LIMIT)
                .await
                .or_internal("Failed to list exams")?,
        ),
        None => (Vec::new(), Vec::new()),
    };

    // 取最近一页作业，保留未提交且未截止的
    let mut due_assignments: Vec<_> = assignments_for(
        &storage,
        &student,
        AssignmentListParams {
            pagination: PaginationQuery { page: 1, size: 100 },
            class_id: None,
            subject_id: None,
        },
    )
    .await?
    .items
    .into_iter()
    .filter(|v| v.status == SubmissionStatus::NotSubmitted && v.assignment.due_at > now)
    .collect();
    due_assignments.sort_by_key(|v| v.assignment.due_at);
    due_assignments.truncate(UPCOMING_LIMIT as usize);

    let records = storage
        .list_student_attendance(user.id, None, None)
        .await
        .or_internal("Failed to load attendance")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentDashboard {
            today_slots,
            due_assignments,
            upcoming_exams,
            attendance: AttendanceSummary::from_records(&records),
        },
        "Dashboard retrieved",
    )))
}
