use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};
use tracing::info;

use super::PtmService;
use crate::models::notifications::{entities::NotificationType, requests::NewNotification};
use crate::models::ptm::{
    entities::{PtmAction, PtmActor, PtmBooking, PtmStatus, find_overlap},
    requests::PtmTransition,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::notify;
use crate::services::{
    OrInternal, Reply, bad_request, conflict, current_user, non_blank, not_found, respond,
};

pub async fn transition(
    service: &PtmService,
    booking_id: i64,
    actor: PtmActor,
    action: PtmAction,
    note: Option<String>,
    proposed_at: Option<DateTime<Utc>>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(apply(service, booking_id, actor, action, note, proposed_at, request).await)
}

/// 计算状态变更；不涉及其他预约的时间冲突
fn plan(
    booking: &PtmBooking,
    actor: PtmActor,
    action: PtmAction,
    note: Option<String>,
    proposed_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<PtmTransition, HttpResponse> {
    let status = booking.status.apply(action, actor).ok_or_else(|| {
        conflict(
            ErrorCode::PtmInvalidTransition,
            format!("Cannot {} a booking that is {}", action, booking.status),
        )
    })?;

    let mut transition = PtmTransition {
        status,
        scheduled_at: None,
        proposed_at: None,
        teacher_note: None,
        parent_note: None,
    };
    match actor {
        PtmActor::Teacher => transition.teacher_note = non_blank(note),
        PtmActor::Parent => transition.parent_note = non_blank(note),
    }

    match action {
        PtmAction::Reschedule => {
            let proposed = proposed_at
                .filter(|p| *p > now)
                .ok_or_else(|| {
                    bad_request(ErrorCode::PtmInvalidTime, "The proposed time must be in the future")
                })?;
            transition.proposed_at = Some(Some(proposed));
        }
        PtmAction::Accept => {
            let proposed = booking
                .proposed_at
                .filter(|p| *p > now)
                .ok_or_else(|| {
                    bad_request(ErrorCode::PtmInvalidTime, "The proposed time has already passed")
                })?;
            transition.scheduled_at = Some(proposed);
            transition.proposed_at = Some(None);
        }
        PtmAction::Decline => transition.proposed_at = Some(None),
        PtmAction::Approve if booking.scheduled_at <= now => {
            return Err(bad_request(
                ErrorCode::PtmInvalidTime,
                "The scheduled time has already passed",
            ));
        }
        _ => {}
    }

    Ok(transition)
}

async fn apply(
    service: &PtmService,
    booking_id: i64,
    actor: PtmActor,
    action: PtmAction,
    note: Option<String>,
    proposed_at: Option<DateTime<Utc>>,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    // 只能操作自己参与的预约
    let booking = storage
        .get_ptm_booking(booking_id)
        .await
        .or_internal("Failed to get booking")?
        .filter(|b| match actor {
            PtmActor::Teacher => b.teacher_id == user.id,
            PtmActor::Parent => b.parent_id == user.id,
        })
        .ok_or_else(|| not_found(ErrorCode::PtmNotFound, "Booking not found"))?;

    let transition = plan(&booking, actor, action, note, proposed_at, chrono::Utc::now())?;

    // 批准后占用教师时间，需与已批准的其他预约错开
    if transition.status == PtmStatus::Approved {
        let start = transition.scheduled_at.unwrap_or(booking.scheduled_at);
        let approved = storage
            .list_ptm_bookings(None, Some(booking.teacher_id), &[PtmStatus::Approved])
            .await
            .or_internal("Failed to list bookings")?;
        if let Some(clash) = find_overlap(&approved, booking.id, start, booking.duration_minutes) {
            return Err(conflict(
                ErrorCode::PtmSlotConflict,
                format!(
                    "The teacher already has a meeting at {}",
                    clash.scheduled_at.format("%Y-%m-%d %H:%M UTC")
                ),
            ));
        }
    }

    let updated = storage
        .transition_ptm_booking(booking.id, booking.status, transition)
        .await
        .or_internal("Failed to update booking")?
        .ok_or_else(|| {
            conflict(
                ErrorCode::PtmInvalidTransition,
                "The booking was changed by someone else, please reload",
            )
        })?;

    info!(
        "PTM {} {} -> {} by {} ({})",
        updated.id, booking.status, updated.status, user.username, action
    );

    let counterpart = match actor {
        PtmActor::Teacher => updated.parent_id,
        PtmActor::Parent => updated.teacher_id,
    };
    let content = match updated.status {
        PtmStatus::RescheduleRequested => format!(
            "{} proposed a new time: {}",
            user.name(),
            updated
                .proposed_at
                .map(|p| p.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_default()
        ),
        status => format!(
            "{} changed the meeting on {} to {}",
            user.name(),
            updated.scheduled_at.format("%Y-%m-%d %H:%M UTC"),
            status
        ),
    };
    notify(
        &storage,
        &[counterpart],
        NewNotification::new(NotificationType::PtmUpdate, "Meeting update")
            .content(content)
            .reference("ptm", updated.id),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Booking updated")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn booking(status: PtmStatus, scheduled_in_hours: i64) -> PtmBooking {
        let now = Utc::now();
        PtmBooking {
            id: 1,
            parent_id: 10,
            teacher_id: 20,
            student_id: 30,
            scheduled_at: now + Duration::hours(scheduled_in_hours),
            duration_minutes: 15,
            agenda: None,
            status,
            proposed_at: None,
            teacher_note: None,
            parent_note: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_plan_reschedule_requires_future_time() {
        let now = Utc::now();
        let b = booking(PtmStatus::Pending, 24);

        let later = Some(now + Duration::hours(48));
        let t = plan(&b, PtmActor::Teacher, PtmAction::Reschedule, Some(" later ".into()), later, now)
            .unwrap();
        assert_eq!(t.status, PtmStatus::RescheduleRequested);
        assert_eq!(t.proposed_at, Some(Some(now + Duration::hours(48))));
        assert_eq!(t.teacher_note.as_deref(), Some("later"));

        let earlier = Some(now - Duration::hours(1));
        assert!(plan(&b, PtmActor::Teacher, PtmAction::Reschedule, None, earlier, now).is_err());
        assert!(plan(&b, PtmActor::Teacher, PtmAction::Reschedule, None, None, now).is_err());
    }

    #[test]
    fn test_plan_accept_moves_schedule() {
        let now = Utc::now();
        let mut b = booking(PtmStatus::RescheduleRequested, 24);
        let proposed = now + Duration::hours(72);
        b.proposed_at = Some(proposed);

        let t = plan(&b, PtmActor::Parent, PtmAction::Accept, None, None, now).unwrap();
        assert_eq!(t.status, PtmStatus::Approved);
        assert_eq!(t.scheduled_at, Some(proposed));
        assert_eq!(t.proposed_at, Some(None));

        b.proposed_at = Some(now - Duration::minutes(5));
        assert!(plan(&b, PtmActor::Parent, PtmAction::Accept, None, None, now).is_err());
    }

    #[test]
    fn test_plan_rejects_invalid_transitions() {
        let now = Utc::now();
        let done = booking(PtmStatus::Completed, 24);
        let resp = plan(&done, PtmActor::Parent, PtmAction::Cancel, None, None, now).unwrap_err();
        assert_eq!(resp.status(), actix_web::http::StatusCode::CONFLICT);

        let past = booking(PtmStatus::Pending, -1);
        assert!(plan(&past, PtmActor::Teacher, PtmAction::Approve, None, None, now).is_err());
    }
}
