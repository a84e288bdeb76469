use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, not_found, respond};

pub async fn get_subject(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(get(service, subject_id, request).await)
}

async fn get(service: &SubjectService, subject_id: i64, request: &HttpRequest) -> Reply {
    let subject = service
        .get_storage(request)
        .get_subject_by_id(subject_id)
        .await
        .or_internal("Failed to get subject")?
        .ok_or_else(|| not_found(ErrorCode::SubjectNotFound, "Subject not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(subject, "Subject retrieved")))
}
