use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, own_assignment, valid_max_marks};
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, bad_request, current_user, not_found, respond};

pub async fn update_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    update: UpdateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(update_one(service, assignment_id, update, request).await)
}

async fn update_one(
    service: &AssignmentService,
    assignment_id: i64,
    update: UpdateAssignmentRequest,
    request: &HttpRequest,
) -> Reply {
    let teacher = current_user(request)?;

    if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(bad_request(ErrorCode::BadRequest, "Title must not be empty"));
    }
    if update.max_marks.is_some_and(|m| !valid_max_marks(m)) {
        return Err(bad_request(ErrorCode::MarksOutOfRange, "max_marks must be greater than 0"));
    }

    let storage = service.get_storage(request);
    own_assignment(&storage, teacher.id, assignment_id).await?;

    let updated = storage
        .update_assignment(assignment_id, update)
        .await
        .or_internal("Failed to update assignment")?
        .ok_or_else(|| not_found(ErrorCode::AssignmentNotFound, "Assignment not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Assignment updated")))
}
