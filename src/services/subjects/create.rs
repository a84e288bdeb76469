use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, validate_subject_code};
use crate::models::classes::requests::CreateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, bad_request, respond};

pub async fn create_subject(
    service: &SubjectService,
    subject: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(create(service, subject, request).await)
}

async fn create(service: &SubjectService, subject: CreateSubjectRequest, request: &HttpRequest) -> Reply {
    if subject.name.trim().is_empty() {
        return Err(bad_request(ErrorCode::BadRequest, "Subject name must not be empty"));
    }
    validate_subject_code(&subject.code)?;

    let storage = service.get_storage(request);

    let created = storage
        .create_subject(subject)
        .await
        .or_conflict(
            ErrorCode::SubjectCodeAlreadyExists,
            "Subject code already exists",
            "Subject creation failed",
        )?;

    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Subject created")))
}
