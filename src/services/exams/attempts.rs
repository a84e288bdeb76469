use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::lifecycle::{settle, settle_all};
use super::{ExamService, own_exam};
use crate::models::exams::{
    entities::total_marks,
    responses::{AttemptGradingView, AttemptListResponse, AttemptWithStudent},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{name_of, user_names};
use crate::services::{OrInternal, Reply, current_user, not_found, respond};

pub async fn list_attempts(
    service: &ExamService,
    exam_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, exam_id, request).await)
}

pub async fn get_attempt(
    service: &ExamService,
    attempt_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(detail(service, attempt_id, request).await)
}

async fn list(service: &ExamService, exam_id: i64, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    let exam = own_exam(&storage, teacher.id, exam_id).await?;
    let attempts = storage
        .list_exam_attempts(exam_id)
        .await
        .or_internal("Failed to list attempts")?;
    let attempts = settle_all(&storage, attempts, Utc::now()).await?;

    let student_ids: Vec<i64> = attempts.iter().map(|a| a.student_id).collect();
    let names = user_names(&storage, &student_ids).await?;
    // 学号以当前班级名单为准，已转班的学生没有学号
    let rolls: HashMap<i64, Option<i32>> = storage
        .list_class_students(exam.class_id)
        .await
        .or_internal("Failed to list class students")?
        .into_iter()
        .map(|s| (s.user_id, s.roll_number))
        .collect();

    let questions = storage
        .list_questions(exam_id)
        .await
        .or_internal("Failed to load questions")?;

    let items = attempts
        .into_iter()
        .map(|attempt| AttemptWithStudent {
            student_name: name_of(&names, attempt.student_id),
            roll_number: rolls.get(&attempt.student_id).copied().flatten(),
            attempt,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AttemptListResponse {
            total_marks: total_marks(&questions),
            exam,
            items,
        },
        "Attempts retrieved",
    )))
}

async fn detail(service: &ExamService, attempt_id: i64, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    let attempt = storage
        .get_attempt_by_id(attempt_id)
        .await
        .or_internal("Failed to get attempt")?
        .ok_or_else(|| not_found(ErrorCode::ExamAttemptNotFound, "Attempt not found"))?;
    own_exam(&storage, teacher.id, attempt.exam_id).await?;

    let attempt = settle(&storage, attempt, Utc::now()).await?;

    let questions = storage
        .list_questions(attempt.exam_id)
        .await
        .or_internal("Failed to load questions")?;
    let answers = storage
        .list_answers(attempt.id)
        .await
        .or_internal("Failed to load answers")?;
    let names = user_names(&storage, &[attempt.student_id]).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AttemptGradingView {
            student_name: name_of(&names, attempt.student_id),
            attempt,
            questions,
            answers,
        },
        "Attempt retrieved",
    )))
}
