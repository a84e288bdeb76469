use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, own_exam, require_draft};
use crate::models::exams::{
    entities::{Exam, ExamQuestion, validate_question},
    requests::{NewQuestion, QuestionRequest},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, bad_request, current_user, not_found, respond};
use crate::storage::Storage;

pub async fn add_question(
    service: &ExamService,
    exam_id: i64,
    question: QuestionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(add(service, exam_id, question, request).await)
}

pub async fn update_question(
    service: &ExamService,
    question_id: i64,
    question: QuestionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(update(service, question_id, question, request).await)
}

pub async fn delete_question(
    service: &ExamService,
    question_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(delete(service, question_id, request).await)
}

/// 校验题目；position 缺省时取 fallback_position
fn build_question(question: QuestionRequest, fallback_position: i32) -> Result<NewQuestion, HttpResponse> {
    let prompt = question.prompt.trim().to_string();
    if prompt.is_empty() {
        return Err(bad_request(ErrorCode::ExamQuestionInvalid, "Question prompt must not be empty"));
    }

    let (options, correct_answer) = validate_question(
        question.question_type,
        &question.options,
        question.correct_answer.as_deref(),
        question.marks,
    )
    .map_err(|msg| bad_request(ErrorCode::ExamQuestionInvalid, msg))?;

    Ok(NewQuestion {
        question_type: question.question_type,
        prompt,
        options,
        correct_answer,
        marks: question.marks,
        position: question.position.unwrap_or(fallback_position),
    })
}

/// 题目所属考试必须是本人的草稿
async fn editable_question(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
    question_id: i64,
) -> Result<(ExamQuestion, Exam), HttpResponse> {
    let question = storage
        .get_question_by_id(question_id)
        .await
        .or_internal("Failed to get question")?
        .ok_or_else(|| not_found(ErrorCode::ExamQuestionNotFound, "Question not found"))?;

    let exam = own_exam(storage, teacher_id, question.exam_id).await?;
    require_draft(&exam)?;

    Ok((question, exam))
}

async fn add(service: &ExamService, exam_id: i64, question: QuestionRequest, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    let exam = own_exam(&storage, teacher.id, exam_id).await?;
    require_draft(&exam)?;

    // 默认追加到末尾
    let next_position = storage
        .list_questions(exam_id)
        .await
        .or_internal("Failed to load questions")?
        .iter()
        .map(|q| q.position)
        .max()
        .map_or(1, |p| p + 1);

    let new_question = build_question(question, next_position)?;
    let created = storage
        .add_question(exam_id, new_question)
        .await
        .or_internal("Failed to add question")?;

    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Question added")))
}

async fn update(
    service: &ExamService,
    question_id: i64,
    question: QuestionRequest,
    request: &HttpRequest,
) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    let (existing, _) = editable_question(&storage, teacher.id, question_id).await?;
    let new_question = build_question(question, existing.position)?;

    let updated = storage
        .update_question(question_id, new_question)
        .await
        .or_internal("Failed to update question")?
        .ok_or_else(|| not_found(ErrorCode::ExamQuestionNotFound, "Question not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Question updated")))
}

async fn delete(service: &ExamService, question_id: i64, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    editable_question(&storage, teacher.id, question_id).await?;

    let deleted = storage
        .delete_question(question_id)
        .await
        .or_internal("Failed to delete question")?;

    if !deleted {
        return Err(not_found(ErrorCode::ExamQuestionNotFound, "Question not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Question deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exams::entities::QuestionType;

    fn request(kind: QuestionType, options: &[&str], answer: Option<&str>) -> QuestionRequest {
        QuestionRequest {
            question_type: kind,
            prompt: "What is 2 + 2?".into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: answer.map(str::to_string),
            marks: 2.0,
            position: None,
        }
    }

    #[test]
    fn test_build_question_uses_fallback_position() {
        let q = build_question(request(QuestionType::Mcq, &["3", "4"], Some("4")), 5).unwrap();
        assert_eq!(q.position, 5);
        assert_eq!(q.correct_answer.as_deref(), Some("4"));
    }

    #[test]
    fn test_build_question_rejects_blank_prompt() {
        let mut req = request(QuestionType::ShortAnswer, &[], None);
        req.prompt = "   ".into();
        assert!(build_question(req, 1).is_err());
    }

    #[test]
    fn test_build_question_rejects_answer_outside_options() {
        assert!(build_question(request(QuestionType::Mcq, &["3", "4"], Some("5")), 1).is_err());
    }
}
