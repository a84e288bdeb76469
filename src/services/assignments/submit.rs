use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::{
    entities::SubmissionRejection, requests::SubmitAssignmentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::own_student;
use crate::services::{
    OrInternal, Reply, bad_request, conflict, current_user, non_blank, not_found, respond,
};

pub async fn submit_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    submission: SubmitAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(submit(service, assignment_id, submission, request).await)
}

fn already_graded() -> HttpResponse {
    conflict(
        ErrorCode::SubmissionAlreadyGraded,
        "This submission has already been graded",
    )
}

async fn submit(
    service: &AssignmentService,
    assignment_id: i64,
    submission: SubmitAssignmentRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let student = own_student(&storage, user.id).await?;

    // 其他班级的作业对学生不可见
    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await
        .or_internal("Failed to get assignment")?
        .filter(|a| Some(a.class_id) == student.class_id)
        .ok_or_else(|| not_found(ErrorCode::AssignmentNotFound, "Assignment not found"))?;

    let existing = storage
        .get_student_submission(assignment_id, user.id)
        .await
        .or_internal("Failed to get submission")?;

    let content = non_blank(submission.content);
    let attachment_url = non_blank(submission.attachment_url);

    let is_late = assignment
        .check_submission(
            content.as_deref(),
            attachment_url.as_deref(),
            existing.as_ref(),
            chrono::Utc::now(),
        )
        .map_err(|rejection| match rejection {
            SubmissionRejection::Empty => bad_request(
                ErrorCode::SubmissionEmpty,
                "Submission needs content or an attachment URL",
            ),
            SubmissionRejection::Closed => bad_request(
                ErrorCode::SubmissionClosed,
                "The due date has passed and late submissions are not allowed",
            ),
            SubmissionRejection::AlreadyGraded => already_graded(),
        })?;

    let saved = storage
        .upsert_submission(assignment_id, user.id, content, attachment_url, is_late)
        .await
        .or_conflict(
            ErrorCode::SubmissionConflict,
            "Another submission is being saved, please retry",
            "Failed to save submission",
        )?
        .ok_or_else(already_graded)?;

    let message = if is_late {
        "Submitted after the due date"
    } else {
        "Submitted"
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(saved, message)))
}
