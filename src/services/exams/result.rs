use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::lifecycle::settle;
use super::{ExamService, own_attempt};
use crate::models::exams::{
    entities::{
        AttemptStatus, Exam, ExamAnswer, ExamAttempt, ExamQuestion, PublicQuestion, total_marks,
    },
    responses::{AnswerReview, AttemptResult},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::require_child;
use crate::services::{OrInternal, Reply, conflict, current_user, not_found, respond};
use crate::storage::Storage;

pub async fn get_result(
    service: &ExamService,
    attempt_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(mine(service, attempt_id, request).await)
}

pub async fn get_child_result(
    service: &ExamService,
    student_id: i64,
    attempt_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(child(service, student_id, attempt_id, request).await)
}

/// 每题回顾；批改完成前只返回学生自己的作答
fn build_reviews(questions: &[ExamQuestion], answers: &[ExamAnswer], graded: bool) -> Vec<AnswerReview> {
    let by_question: HashMap<i64, &ExamAnswer> =
        answers.iter().map(|a| (a.question_id, a)).collect();

    questions
        .iter()
        .map(|question| {
            let answer = by_question.get(&question.id);
            AnswerReview {
                question: PublicQuestion::from(question),
                answer: answer.map(|a| a.answer.clone()),
                is_correct: answer.and_then(|a| a.is_correct).filter(|_| graded),
                awarded_marks: answer.and_then(|a| a.awarded_marks).filter(|_| graded),
                feedback: answer.and_then(|a| a.feedback.clone()).filter(|_| graded),
                correct_answer: question.correct_answer.clone().filter(|_| graded),
            }
        })
        .collect()
}

pub(crate) async fn build_result(
    storage: &Arc<dyn Storage>,
    mut attempt: ExamAttempt,
    exam: Exam,
) -> Result<AttemptResult, HttpResponse> {
    let questions = storage
        .list_questions(exam.id)
        .await
        .or_internal("Failed to load questions")?;
    let answers = storage
        .list_answers(attempt.id)
        .await
        .or_internal("Failed to load answers")?;

    let graded = attempt.status == AttemptStatus::Graded;
    if !graded {
        // 部分得分在批改完成前不公开
        attempt.score = None;
    }

    Ok(AttemptResult {
        total_marks: total_marks(&questions),
        answers: build_reviews(&questions, &answers, graded),
        attempt,
        exam,
    })
}

async fn result_for(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    attempt_id: i64,
) -> Result<AttemptResult, HttpResponse> {
    let attempt = own_attempt(storage, student_id, attempt_id).await?;
    let attempt = settle(storage, attempt, Utc::now()).await?;

    if attempt.status == AttemptStatus::InProgress {
        return Err(conflict(
            ErrorCode::Conflict,
            "The attempt is still in progress",
        ));
    }

    let exam = storage
        .get_exam_by_id(attempt.exam_id)
        .await
        .or_internal("Failed to get exam")?
        .ok_or_else(|| not_found(ErrorCode::ExamNotFound, "Exam not found"))?;

    build_result(storage, attempt, exam).await
}

async fn mine(service: &ExamService, attempt_id: i64, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let result = result_for(&storage, user.id, attempt_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Result retrieved")))
}

async fn child(
    service: &ExamService,
    student_id: i64,
    attempt_id: i64,
    request: &HttpRequest,
) -> Reply {
    let parent = current_user(request)?;
    let storage = service.get_storage(request);
    require_child(&storage, parent.id, student_id).await?;

    let result = result_for(&storage, student_id, attempt_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Result retrieved")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exams::entities::QuestionType;

    fn question(id: i64, kind: QuestionType, correct: Option<&str>) -> ExamQuestion {
        ExamQuestion {
            id,
            exam_id: 1,
            question_type: kind,
            prompt: format!("Q{id}"),
            options: vec![],
            correct_answer: correct.map(str::to_string),
            marks: 2.0,
            position: id as i32,
        }
    }

    fn answer(question_id: i64, text: &str, correct: Option<bool>, marks: Option<f64>) -> ExamAnswer {
        ExamAnswer {
            id: question_id * 10,
            attempt_id: 1,
            question_id,
            answer: text.into(),
            is_correct: correct,
            awarded_marks: marks,
            feedback: Some("ok".into()),
            saved_at: Utc::now(),
        }
    }

    #[test]
    fn test_reviews_hide_grading_until_graded() {
        let questions = vec![
            question(1, QuestionType::TrueFalse, Some("true")),
            question(2, QuestionType::ShortAnswer, None),
        ];
        let answers = vec![answer(1, "true", Some(true), Some(2.0))];

        let pending = build_reviews(&questions, &answers, false);
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].answer.as_deref(), Some("true"));
        assert!(pending[0].is_correct.is_none());
        assert!(pending[0].correct_answer.is_none());
        assert!(pending[0].feedback.is_none());

        let graded = build_reviews(&questions, &answers, true);
        assert_eq!(graded[0].is_correct, Some(true));
        assert_eq!(graded[0].awarded_marks, Some(2.0));
        assert_eq!(graded[0].correct_answer.as_deref(), Some("true"));
        // 未作答的题目也列出
        assert!(graded[1].answer.is_none());
    }
}
