use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, own_exam};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, conflict, current_user, not_found, respond};

pub async fn delete_exam(
    service: &ExamService,
    exam_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(delete(service, exam_id, request).await)
}

async fn delete(service: &ExamService, exam_id: i64, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    own_exam(&storage, teacher.id, exam_id).await?;

    // 已有学生作答的考试保留成绩记录
    let attempts = storage
        .list_exam_attempts(exam_id)
        .await
        .or_internal("Failed to list attempts")?;
    if !attempts.is_empty() {
        return Err(conflict(
            ErrorCode::ExamNotEditable,
            "Exams that students have attempted cannot be deleted",
        ));
    }

    let deleted = storage
        .delete_exam(exam_id)
        .await
        .or_internal("Failed to delete exam")?;

    if !deleted {
        return Err(not_found(ErrorCode::ExamNotFound, "Exam not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Exam deleted")))
}
