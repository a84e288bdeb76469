use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TimetableService;
use crate::models::ApiResponse;
use crate::models::timetable::{requests::TimetableQuery, responses::TimetableResponse};
use crate::services::{OrInternal, Reply, respond};

pub async fn list_slots(
    service: &TimetableService,
    query: TimetableQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, query, request).await)
}

async fn list(service: &TimetableService, query: TimetableQuery, request: &HttpRequest) -> Reply {
    let items = service
        .get_storage(request)
        .list_timetable(query)
        .await
        .or_internal("Failed to list timetable")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TimetableResponse { items },
        "Timetable retrieved",
    )))
}
