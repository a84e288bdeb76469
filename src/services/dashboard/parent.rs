use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::models::ApiResponse;
use crate::models::attendance::entities::AttendanceSummary;
use crate::models::dashboard::responses::{ChildOverview, ParentDashboard};
use crate::models::ptm::entities::PtmStatus;
use crate::services::ptm::list::booking_views;
use crate::services::system::DynamicConfig;
use crate::services::{OrInternal, Reply, current_user, respond};

pub async fn parent_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(overview(service, request).await)
}

async fn overview(service: &DashboardService, request: &HttpRequest) -> Reply {
    let parent = current_user(request)?;
    let storage = service.get_storage(request);
    let threshold = DynamicConfig::attendance_warning_threshold().await;

    let mut children = Vec::new();
    for child in storage
        .list_children(parent.id)
        .await
        .or_internal("Failed to list children")?
    {
        let records = storage
            .list_student_attendance(child.student.user_id, None, None)
            .await
            .or_internal("Failed to load attendance")?;
        let attendance = AttendanceSummary::from_records(&records);
        children.push(ChildOverview {
            below_threshold: attendance.below(threshold),
            attendance,
            student: child.student,
        });
    }

    // 待教师审批或待本人确认改期
    let pending = storage
        .list_ptm_bookings(
            Some(parent.id),
            None,
            &[PtmStatus::Pending, PtmStatus::RescheduleRequested],
        )
        .await
        .or_internal("Failed to list bookings")?;
    let pending_ptm = booking_views(&storage, pending).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ParentDashboard {
            children,
            pending_ptm,
        },
        "Dashboard retrieved",
    )))
}
