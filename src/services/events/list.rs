use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::events::requests::{EventListParams, EventListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, bad_request, respond};

pub async fn list_events(
    service: &EventService,
    query: EventListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, query, request).await)
}

async fn list(service: &EventService, query: EventListParams, request: &HttpRequest) -> Reply {
    if let (Some(from), Some(to)) = (query.from, query.to)
        && from > to
    {
        return Err(bad_request(ErrorCode::BadRequest, "'from' must not be after 'to'"));
    }

    let response = service
        .get_storage(request)
        .list_events_with_pagination(EventListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            from: query.from,
            to: query.to,
        })
        .await
        .or_internal("Failed to list events")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Events retrieved")))
}
