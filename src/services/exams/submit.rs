use std::collections::HashSet;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::lifecycle::{finalize, settle};
use super::result::build_result;
use super::{ExamService, own_attempt};
use crate::models::exams::{
    entities::{AttemptStatus, ExamAttempt},
    requests::{AnswerInput, SaveAnswersRequest},
    responses::AutosaveResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::system::DynamicConfig;
use crate::services::{OrInternal, Reply, bad_request, conflict, current_user, not_found, respond};
use crate::storage::Storage;

pub async fn save_answers(
    service: &ExamService,
    attempt_id: i64,
    answers: SaveAnswersRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(save(service, attempt_id, answers, request).await)
}

pub async fn submit_attempt(
    service: &ExamService,
    attempt_id: i64,
    answers: SaveAnswersRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(submit(service, attempt_id, answers, request).await)
}

fn attempt_finished() -> HttpResponse {
    conflict(
        ErrorCode::ExamAttemptFinished,
        "This attempt has already been submitted",
    )
}

fn require_in_progress(attempt: &ExamAttempt) -> Result<(), HttpResponse> {
    if attempt.status == AttemptStatus::InProgress {
        Ok(())
    } else {
        Err(attempt_finished())
    }
}

/// 答案只能针对本考试的题目，且每题最多一条
async fn check_answers(
    storage: &Arc<dyn Storage>,
    exam_id: i64,
    answers: &[AnswerInput],
) -> Result<(), HttpResponse> {
    let question_ids: HashSet<i64> = storage
        .list_questions(exam_id)
        .await
        .or_internal("Failed to load questions")?
        .iter()
        .map(|q| q.id)
        .collect();

    let mut seen = HashSet::new();
    for answer in answers {
        if !question_ids.contains(&answer.question_id) {
            return Err(bad_request(
                ErrorCode::ExamQuestionNotFound,
                format!("Question {} does not belong to this exam", answer.question_id),
            ));
        }
        if !seen.insert(answer.question_id) {
            return Err(bad_request(
                ErrorCode::BadRequest,
                format!("Question {} is answered more than once", answer.question_id),
            ));
        }
    }
    Ok(())
}

async fn save(
    service: &ExamService,
    attempt_id: i64,
    answers: SaveAnswersRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let now = Utc::now();

    let attempt = own_attempt(&storage, user.id, attempt_id).await?;
    require_in_progress(&attempt)?;

    let grace = DynamicConfig::exam_autosave_grace_secs().await;
    if !attempt.accepts_answers(now, grace) {
        settle(&storage, attempt, now).await?;
        return Err(conflict(
            ErrorCode::ExamAttemptClosed,
            "Time is up, the attempt has been submitted",
        ));
    }

    check_answers(&storage, attempt.exam_id, &answers.answers).await?;

    let saved = storage
        .save_answers(attempt.id, &answers.answers)
        .await
        .or_internal("Failed to save answers")?
        .ok_or_else(attempt_finished)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AutosaveResponse {
            saved,
            remaining_seconds: attempt.remaining_seconds(now),
            saved_at: now,
        },
        "Answers saved",
    )))
}

async fn submit(
    service: &ExamService,
    attempt_id: i64,
    answers: SaveAnswersRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let now = Utc::now();

    let attempt = own_attempt(&storage, user.id, attempt_id).await?;
    require_in_progress(&attempt)?;

    // 宽限期之后交卷只保留已保存的答案
    let grace = DynamicConfig::exam_autosave_grace_secs().await;
    let on_time = attempt.accepts_answers(now, grace);
    if on_time && !answers.answers.is_empty() {
        check_answers(&storage, attempt.exam_id, &answers.answers).await?;
        storage
            .save_answers(attempt.id, &answers.answers)
            .await
            .or_internal("Failed to save answers")?
            .ok_or_else(attempt_finished)?;
    }

    let finished = finalize(&storage, &attempt, !on_time, now).await?;
    info!(
        "Attempt {} submitted by {} (status {}, auto {})",
        finished.id, user.username, finished.status, finished.auto_submitted
    );

    let exam = storage
        .get_exam_by_id(finished.exam_id)
        .await
        .or_internal("Failed to get exam")?
        .ok_or_else(|| not_found(ErrorCode::ExamNotFound, "Exam not found"))?;

    let message = if on_time {
        "Attempt submitted"
    } else {
        "Time was up, saved answers were submitted"
    };
    let result = build_result(&storage, finished, exam).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(result, message)))
}
