use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::ApiResponse;
use crate::models::assignments::requests::{AssignmentListParams, AssignmentListQuery};
use crate::services::{OrInternal, Reply, current_user, respond};

pub async fn list_assignments(
    service: &AssignmentService,
    query: AssignmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, query, request).await)
}

async fn list(service: &AssignmentService, query: AssignmentListParams, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;

    let response = service
        .get_storage(request)
        .list_assignments_with_pagination(AssignmentListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            class_id: query.class_id,
            subject_id: query.subject_id,
            teacher_id: Some(teacher.id),
            ..Default::default()
        })
        .await
        .or_internal("Failed to list assignments")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Assignments retrieved")))
}
