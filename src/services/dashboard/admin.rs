use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DashboardService, UPCOMING_LIMIT};
use crate::models::ApiResponse;
use crate::models::attendance::entities::AttendanceSummary;
use crate::models::dashboard::responses::AdminDashboard;
use crate::models::events::requests::EventListQuery;
use crate::models::users::entities::UserRole;
use crate::services::{OrInternal, Reply, respond, today};

pub async fn admin_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(overview(service, request).await)
}

async fn overview(service: &DashboardService, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let total_students = storage
        .count_users(Some(UserRole::Student))
        .await
        .or_internal("Failed to count students")?;
    let total_teachers = storage
        .count_users(Some(UserRole::Teacher))
        .await
        .or_internal("Failed to count teachers")?;
    let total_parents = storage
        .count_users(Some(UserRole::Parent))
        .await
        .or_internal("Failed to count parents")?;
    let total_classes = storage
        .count_classes()
        .await
        .or_internal("Failed to count classes")?;

    let today_records = storage
        .list_attendance_on(today())
        .await
        .or_internal("Failed to load attendance")?;

    let upcoming_events = storage
        .list_events_with_pagination(EventListQuery {
            page: Some(1),
            size: Some(UPCOMING_LIMIT as i64),
            ..Default::default()
        })
        .await
        .or_internal("Failed to list events")?
        .items;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AdminDashboard {
            total_students,
            total_teachers,
            total_parents,
            total_classes,
            today_attendance: AttendanceSummary::from_records(&today_records),
            upcoming_events,
        },
        "Dashboard retrieved",
    )))
}
