use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, own_exam};
use crate::models::ApiResponse;
use crate::models::exams::{entities::total_marks, responses::ExamDetail};
use crate::services::{OrInternal, Reply, current_user, respond};

pub async fn get_exam(
    service: &ExamService,
    exam_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(detail(service, exam_id, request).await)
}

async fn detail(service: &ExamService, exam_id: i64, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    let exam = own_exam(&storage, teacher.id, exam_id).await?;
    let questions = storage
        .list_questions(exam_id)
        .await
        .or_internal("Failed to load questions")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ExamDetail {
            total_marks: total_marks(&questions),
            exam,
            questions,
        },
        "Exam retrieved",
    )))
}
