use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::ApiResponse;
use crate::models::classes::requests::SubjectQueryParams;
use crate::services::{OrInternal, Reply, non_blank, respond};

pub async fn list_subjects(
    service: &SubjectService,
    query: SubjectQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, query, request).await)
}

async fn list(service: &SubjectService, query: SubjectQueryParams, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let response = storage
        .list_subjects_with_pagination(
            Some(query.pagination.page),
            Some(query.pagination.size),
            non_blank(query.search),
        )
        .await
        .or_internal("Failed to list subjects")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Subjects retrieved")))
}
