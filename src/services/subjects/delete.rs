use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, not_found, respond};

pub async fn delete_subject(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(delete(service, subject_id, request).await)
}

async fn delete(service: &SubjectService, subject_id: i64, request: &HttpRequest) -> Reply {
    let deleted = service
        .get_storage(request)
        .delete_subject(subject_id)
        .await
        .or_internal("Failed to delete subject")?;

    if !deleted {
        return Err(not_found(ErrorCode::SubjectNotFound, "Subject not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deleted")))
}
