use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, summarize};
use crate::models::ApiResponse;
use crate::models::exams::{
    requests::{ExamListParams, ExamListQuery},
    responses::ExamListResponse,
};
use crate::services::{OrInternal, Reply, current_user, respond};

pub async fn list_exams(
    service: &ExamService,
    query: ExamListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, query, request).await)
}

async fn list(service: &ExamService, query: ExamListParams, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    let (exams, pagination) = storage
        .list_exams_with_pagination(ExamListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            class_id: query.class_id,
            subject_id: query.subject_id,
            teacher_id: Some(teacher.id),
            published_only: false,
        })
        .await
        .or_internal("Failed to list exams")?;

    let items = summarize(&storage, exams).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ExamListResponse { items, pagination },
        "Exams retrieved",
    )))
}
