use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::PtmService;
use crate::models::notifications::{entities::NotificationType, requests::NewNotification};
use crate::models::ptm::requests::{CreatePtmRequest, NewPtmBooking};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{notify, require_child, require_user_with_role};
use crate::services::system::DynamicConfig;
use crate::services::{
    OrInternal, Reply, bad_request, current_user, forbidden, non_blank, respond,
};

/// 单次家长会最长时长（分钟）
const MAX_DURATION_MINUTES: i32 = 240;

pub async fn create_booking(
    service: &PtmService,
    booking: CreatePtmRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(create(service, booking, request).await)
}

async fn create(service: &PtmService, booking: CreatePtmRequest, request: &HttpRequest) -> Reply {
    let parent = current_user(request)?;
    let storage = service.get_storage(request);

    if booking.scheduled_at <= Utc::now() {
        return Err(bad_request(
            ErrorCode::PtmInvalidTime,
            "The meeting must be scheduled in the future",
        ));
    }

    let duration = match booking.duration_minutes {
        Some(minutes) => minutes,
        None => DynamicConfig::ptm_default_duration().await,
    };
    if !(1..=MAX_DURATION_MINUTES).contains(&duration) {
        return Err(bad_request(
            ErrorCode::PtmInvalidTime,
            format!("Duration must be between 1 and {MAX_DURATION_MINUTES} minutes"),
        ));
    }

    let student = require_child(&storage, parent.id, booking.student_id).await?;
    let teacher = require_user_with_role(&storage, booking.teacher_id, UserRole::Teacher).await?;

    // 只能约见孩子的任课教师
    let teaches = match student.class_id {
        Some(class_id) => storage
            .teacher_teaches(teacher.id, class_id, None)
            .await
            .or_internal("Failed to check teaching assignment")?,
        None => false,
    };
    if !teaches {
        return Err(forbidden(
            ErrorCode::NotTeachingClass,
            "This teacher does not teach your child",
        ));
    }

    let created = storage
        .create_ptm_booking(NewPtmBooking {
            parent_id: parent.id,
            teacher_id: teacher.id,
            student_id: student.user_id,
            scheduled_at: booking.scheduled_at,
            duration_minutes: duration,
            agenda: non_blank(booking.agenda),
        })
        .await
        .or_internal("Failed to create booking")?;

    info!(
        "Parent {} requested PTM {} with teacher {} at {}",
        parent.username, created.id, teacher.username, created.scheduled_at
    );

    notify(
        &storage,
        &[teacher.id],
        NewNotification::new(NotificationType::PtmUpdate, "New meeting request")
            .content(format!(
                "{} requested a meeting about {} on {}",
                parent.name(),
                student.display_name.as_deref().unwrap_or(&student.username),
                created.scheduled_at.format("%Y-%m-%d %H:%M UTC")
            ))
            .reference("ptm", created.id),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Meeting requested")))
}
