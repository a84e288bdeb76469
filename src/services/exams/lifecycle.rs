//! 作答结束：手动交卷与宽限期过后的自动交卷

use std::sync::Arc;

use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::models::ErrorCode;
use crate::models::exams::entities::{AttemptStatus, ExamAttempt, grade_answers};
use crate::services::system::DynamicConfig;
use crate::services::{OrInternal, not_found};
use crate::storage::Storage;

/// 自动批改客观题并结束作答；没有待批改的简答题时直接进入 graded
pub(crate) async fn finalize(
    storage: &Arc<dyn Storage>,
    attempt: &ExamAttempt,
    auto_submitted: bool,
    now: DateTime<Utc>,
) -> Result<ExamAttempt, HttpResponse> {
    let questions = storage
        .list_questions(attempt.exam_id)
        .await
        .or_internal("Failed to load questions")?;
    let answers = storage
        .list_answers(attempt.id)
        .await
        .or_internal("Failed to load answers")?;

    let (grades, needs_manual) = grade_answers(&questions, &answers);
    let status = if needs_manual {
        AttemptStatus::Submitted
    } else {
        AttemptStatus::Graded
    };

    let finalized = storage
        .finalize_attempt(attempt.id, grades, status, auto_submitted, now)
        .await
        .or_internal("Failed to submit attempt")?;

    match finalized {
        Some(done) => Ok(done),
        // 已被并发请求结束，读取最新状态
        None => storage
            .get_attempt_by_id(attempt.id)
            .await
            .or_internal("Failed to get attempt")?
            .ok_or_else(|| not_found(ErrorCode::ExamAttemptNotFound, "Attempt not found")),
    }
}

/// 宽限期已过仍在作答中的记录，读取时补做自动交卷
pub(crate) async fn settle(
    storage: &Arc<dyn Storage>,
    attempt: ExamAttempt,
    now: DateTime<Utc>,
) -> Result<ExamAttempt, HttpResponse> {
    let grace = DynamicConfig::exam_autosave_grace_secs().await;
    if !attempt.needs_auto_submit(now, grace) {
        return Ok(attempt);
    }

    info!(
        "Auto-submitting attempt {} (exam {}, student {})",
        attempt.id, attempt.exam_id, attempt.student_id
    );
    finalize(storage, &attempt, true, now).await
}

/// 批量补做自动交卷
pub(crate) async fn settle_all(
    storage: &Arc<dyn Storage>,
    attempts: Vec<ExamAttempt>,
    now: DateTime<Utc>,
) -> Result<Vec<ExamAttempt>, HttpResponse> {
    let mut settled = Vec::with_capacity(attempts.len());
    for attempt in attempts {
        settled.push(settle(storage, attempt, now).await?);
    }
    Ok(settled)
}
