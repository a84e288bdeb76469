use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, own_exam, require_draft};
use crate::models::exams::{entities::validate_exam_window, requests::UpdateExamRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, bad_request, current_user, not_found, respond};

pub async fn update_exam(
    service: &ExamService,
    exam_id: i64,
    update: UpdateExamRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(update_one(service, exam_id, update, request).await)
}

async fn update_one(
    service: &ExamService,
    exam_id: i64,
    update: UpdateExamRequest,
    request: &HttpRequest,
) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    let exam = own_exam(&storage, teacher.id, exam_id).await?;
    require_draft(&exam)?;

    if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(bad_request(ErrorCode::BadRequest, "Title must not be empty"));
    }

    // 与现有值合并后再校验时间窗口
    validate_exam_window(
        update.start_at.unwrap_or(exam.start_at),
        update.end_at.unwrap_or(exam.end_at),
        update.duration_minutes.unwrap_or(exam.duration_minutes),
    )
    .map_err(|msg| bad_request(ErrorCode::BadRequest, msg))?;

    let updated = storage
        .update_exam(exam_id, update)
        .await
        .or_internal("Failed to update exam")?
        .ok_or_else(|| not_found(ErrorCode::ExamNotFound, "Exam not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Exam updated")))
}
