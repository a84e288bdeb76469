use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssignmentService, own_assignment};
use crate::models::assignments::{entities::marks_in_range, requests::GradeSubmissionRequest};
use crate::models::notifications::{entities::NotificationType, requests::NewNotification};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::notify;
use crate::services::{OrInternal, Reply, bad_request, current_user, non_blank, not_found, respond};

pub async fn grade_submission(
    service: &AssignmentService,
    submission_id: i64,
    grade: GradeSubmissionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(grade_one(service, submission_id, grade, request).await)
}

async fn grade_one(
    service: &AssignmentService,
    submission_id: i64,
    grade: GradeSubmissionRequest,
    request: &HttpRequest,
) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);
    let missing = || not_found(ErrorCode::SubmissionNotFound, "Submission not found");

    let submission = storage
        .get_submission_by_id(submission_id)
        .await
        .or_internal("Failed to get submission")?
        .ok_or_else(missing)?;

    let assignment = own_assignment(&storage, teacher.id, submission.assignment_id).await?;

    if !marks_in_range(grade.marks, assignment.max_marks) {
        return Err(bad_request(
            ErrorCode::MarksOutOfRange,
            format!("Marks must be between 0 and {}", assignment.max_marks),
        ));
    }

    let graded = storage
        .grade_submission(submission_id, grade.marks, non_blank(grade.feedback), teacher.id)
        .await
        .or_internal("Failed to grade submission")?
        .ok_or_else(missing)?;

    info!(
        "Submission {} graded {}/{} by {}",
        graded.id, grade.marks, assignment.max_marks, teacher.username
    );

    notify(
        &storage,
        &[graded.student_id],
        NewNotification::new(
            NotificationType::AssignmentGraded,
            format!("Assignment graded: {}", assignment.title),
        )
        .content(format!("You scored {} / {}", grade.marks, assignment.max_marks))
        .reference("assignment", assignment.id),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(graded, "Submission graded")))
}
