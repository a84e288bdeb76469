use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::{DashboardService, UPCOMING_LIMIT, today_slots};
use crate::models::ApiResponse;
use crate::models::dashboard::responses::TeacherDashboard;
use crate::models::ptm::entities::PtmStatus;
use crate::models::timetable::requests::TimetableQuery;
use crate::services::ptm::list::booking_views;
use crate::services::{OrInternal, Reply, current_user, respond};

pub async fn teacher_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(overview(service, request).await)
}

async fn overview(service: &DashboardService, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    let today_slots = today_slots(
        &storage,
        TimetableQuery {
            teacher_id: Some(teacher.id),
            ..Default::default()
        },
    )
    .await?;

    let pending_submissions = storage
        .count_pending_submissions(teacher.id)
        .await
        .or_internal("Failed to count submissions")?;

    let upcoming_exams = storage
        .list_upcoming_exams(&[], Some(teacher.id), Utc::now(), UPCOMING_LIMIT)
        .await
        .or_internal("Failed to list exams")?;

    let pending = storage
        .list_ptm_bookings(None, Some(teacher.id), &[PtmStatus::Pending])
        .await
        .or_internal("Failed to list bookings")?;
    let pending_ptm = booking_views(&storage, pending).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TeacherDashboard {
            today_slots,
            pending_submissions,
            upcoming_exams,
            pending_ptm,
        },
        "Dashboard retrieved",
    )))
}
