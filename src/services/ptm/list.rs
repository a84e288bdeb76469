use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PtmService;
use crate::models::ApiResponse;
use crate::models::ptm::{
    entities::{PtmActor, PtmBooking},
    requests::PtmListParams,
    responses::{PtmBookingView, PtmListResponse},
};
use crate::services::access::{name_of, user_names};
use crate::services::{OrInternal, Reply, current_user, respond};
use crate::storage::Storage;

pub async fn list_bookings(
    service: &PtmService,
    actor: PtmActor,
    query: PtmListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, actor, query, request).await)
}

async fn list(
    service: &PtmService,
    actor: PtmActor,
    query: PtmListParams,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (parent_id, teacher_id) = match actor {
        PtmActor::Parent => (Some(user.id), None),
        PtmActor::Teacher => (None, Some(user.id)),
    };
    let statuses: Vec<_> = query.status.into_iter().collect();

    let bookings = storage
        .list_ptm_bookings(parent_id, teacher_id, &statuses)
        .await
        .or_internal("Failed to list bookings")?;

    let items = booking_views(&storage, bookings).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PtmListResponse { items },
        "Bookings retrieved",
    )))
}

/// 补全家长、教师、学生姓名
pub(crate) async fn booking_views(
    storage: &Arc<dyn Storage>,
    bookings: Vec<PtmBooking>,
) -> Result<Vec<PtmBookingView>, HttpResponse> {
    let mut ids: Vec<i64> = bookings
        .iter()
        .flat_map(|b| [b.parent_id, b.teacher_id, b.student_id])
        .collect();
    ids.sort_unstable();
    ids.dedup();
    let names = user_names(storage, &ids).await?;

    Ok(bookings
        .into_iter()
        .map(|booking| PtmBookingView {
            parent_name: name_of(&names, booking.parent_id),
            teacher_name: name_of(&names, booking.teacher_id),
            student_name: name_of(&names, booking.student_id),
            booking,
        })
        .collect())
}
