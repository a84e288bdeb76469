use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExamService;
use crate::models::exams::{
    entities::validate_exam_window,
    requests::{CreateExamRequest, NewExam},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::require_teaches;
use crate::services::{OrInternal, Reply, bad_request, current_user, non_blank, respond};

pub async fn create_exam(
    service: &ExamService,
    exam: CreateExamRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(create(service, exam, request).await)
}

async fn create(service: &ExamService, exam: CreateExamRequest, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;

    if exam.title.trim().is_empty() {
        return Err(bad_request(ErrorCode::BadRequest, "Title must not be empty"));
    }
    validate_exam_window(exam.start_at, exam.end_at, exam.duration_minutes)
        .map_err(|msg| bad_request(ErrorCode::BadRequest, msg))?;

    let storage = service.get_storage(request);
    require_teaches(&storage, teacher.id, exam.class_id, Some(exam.subject_id)).await?;

    // 新建考试总是草稿
    let created = storage
        .create_exam(NewExam {
            class_id: exam.class_id,
            subject_id: exam.subject_id,
            teacher_id: teacher.id,
            title: exam.title.trim().to_string(),
            instructions: non_blank(exam.instructions),
            start_at: exam.start_at,
            end_at: exam.end_at,
            duration_minutes: exam.duration_minutes,
        })
        .await
        .or_internal("Failed to create exam")?;

    info!("Teacher {} created exam {}", teacher.username, created.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Exam created")))
}
