use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};
use tracing::info;

use super::ExamService;
use super::lifecycle::settle;
use crate::models::exams::{
    entities::{AttemptStatus, Exam, ExamAttempt, ExamStatus, PublicQuestion},
    responses::AttemptSession,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::own_student;
use crate::services::{OrInternal, Reply, bad_request, conflict, current_user, not_found, respond};
use crate::storage::Storage;

pub async fn start_exam(
    service: &ExamService,
    exam_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(start(service, exam_id, request).await)
}

/// 恢复作答时服务端计算剩余时间，客户端计时仅作展示
pub(crate) async fn session(
    storage: &Arc<dyn Storage>,
    attempt: ExamAttempt,
    exam: Exam,
    now: DateTime<Utc>,
) -> Result<AttemptSession, HttpResponse> {
    let questions = storage
        .list_questions(exam.id)
        .await
        .or_internal("Failed to load questions")?;
    let answers = storage
        .list_answers(attempt.id)
        .await
        .or_internal("Failed to load answers")?;

    Ok(AttemptSession {
        remaining_seconds: attempt.remaining_seconds(now),
        questions: questions.iter().map(PublicQuestion::from).collect(),
        answers,
        attempt,
        exam,
        server_time: now,
    })
}

async fn start(service: &ExamService, exam_id: i64, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let student = own_student(&storage, user.id).await?;

    // 草稿与其他班级的考试对学生不可见
    let exam = storage
        .get_exam_by_id(exam_id)
        .await
        .or_internal("Failed to get exam")?
        .filter(|e| e.status == ExamStatus::Published && Some(e.class_id) == student.class_id)
        .ok_or_else(|| not_found(ErrorCode::ExamNotFound, "Exam not found"))?;

    let now = Utc::now();

    let existing = storage
        .get_student_attempt(exam_id, user.id)
        .await
        .or_internal("Failed to get attempt")?;

    if let Some(existing) = existing {
        let attempt = settle(&storage, existing, now).await?;
        if attempt.status != AttemptStatus::InProgress {
            return Err(conflict(
                ErrorCode::ExamAttemptFinished,
                "You have already completed this exam",
            ));
        }

        let resumed = session(&storage, attempt, exam, now).await?;
        return Ok(HttpResponse::Ok().json(ApiResponse::success(resumed, "Attempt resumed")));
    }

    exam.check_available(now)
        .map_err(|reason| bad_request(ErrorCode::ExamNotAvailable, reason.message()))?;

    let created = storage
        .create_attempt(exam_id, user.id, now, exam.attempt_deadline(now))
        .await;

    let attempt = match created {
        // 同一学生并发开始，以先写入的记录为准
        Err(ref e) if e.is_conflict() => storage
            .get_student_attempt(exam_id, user.id)
            .await
            .or_internal("Failed to get attempt")?
            .ok_or_else(|| not_found(ErrorCode::ExamAttemptNotFound, "Attempt not found"))?,
        other => other.or_internal("Failed to start attempt")?,
    };

    info!(
        "Student {} started exam {} (attempt {}, deadline {})",
        user.username, exam_id, attempt.id, attempt.deadline_at
    );

    let started = session(&storage, attempt, exam, now).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(started, "Attempt started")))
}
