use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, validate_subject_code};
use crate::models::classes::requests::UpdateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, bad_request, not_found, respond};

pub async fn update_subject(
    service: &SubjectService,
    subject_id: i64,
    update: UpdateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(update_one(service, subject_id, update, request).await)
}

async fn update_one(
    service: &SubjectService,
    subject_id: i64,
    update: UpdateSubjectRequest,
    request: &HttpRequest,
) -> Reply {
    if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(bad_request(ErrorCode::BadRequest, "Subject name must not be empty"));
    }
    if let Some(code) = &update.code {
        validate_subject_code(code)?;
    }

    let subject = service
        .get_storage(request)
        .update_subject(subject_id, update)
        .await
        .or_conflict(
            ErrorCode::SubjectCodeAlreadyExists,
            "Subject code already exists",
            "Subject update failed",
        )?
        .ok_or_else(|| not_found(ErrorCode::SubjectNotFound, "Subject not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(subject, "Subject updated")))
}
