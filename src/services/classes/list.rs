use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::ApiResponse;
use crate::models::classes::requests::{ClassListQuery, ClassQueryParams};
use crate::services::{OrInternal, Reply, non_blank, respond};

pub async fn list_classes(
    service: &ClassService,
    query: ClassQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, query, request).await)
}

async fn list(service: &ClassService, query: ClassQueryParams, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let list_query = ClassListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        academic_year: non_blank(query.academic_year),
        search: non_blank(query.search),
    };

    let response = storage
        .list_classes_with_pagination(list_query)
        .await
        .or_internal("Failed to list classes")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Classes retrieved")))
}
