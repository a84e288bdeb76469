use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ExamService, own_exam, require_draft};
use crate::models::notifications::{entities::NotificationType, requests::NewNotification};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::notify;
use crate::services::{OrInternal, Reply, bad_request, current_user, not_found, respond};

pub async fn publish_exam(
    service: &ExamService,
    exam_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(publish(service, exam_id, request).await)
}

async fn publish(service: &ExamService, exam_id: i64, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    let exam = own_exam(&storage, teacher.id, exam_id).await?;
    require_draft(&exam)?;

    let questions = storage
        .list_questions(exam_id)
        .await
        .or_internal("Failed to load questions")?;
    if questions.is_empty() {
        return Err(bad_request(
            ErrorCode::ExamNoQuestions,
            "Add at least one question before publishing",
        ));
    }

    if exam.end_at <= chrono::Utc::now() {
        return Err(bad_request(
            ErrorCode::ExamNotAvailable,
            "The exam window has already ended",
        ));
    }

    let published = storage
        .publish_exam(exam_id)
        .await
        .or_internal("Failed to publish exam")?
        .ok_or_else(|| not_found(ErrorCode::ExamNotFound, "Exam not found"))?;

    info!("Exam {} published by {}", exam_id, teacher.username);

    let student_ids: Vec<i64> = storage
        .list_class_students(published.class_id)
        .await
        .or_internal("Failed to list class students")?
        .into_iter()
        .map(|s| s.user_id)
        .collect();

    notify(
        &storage,
        &student_ids,
        NewNotification::new(
            NotificationType::ExamPublished,
            format!("Exam scheduled: {}", published.title),
        )
        .content(format!(
            "Opens {} and closes {} ({} minutes)",
            published.start_at.format("%Y-%m-%d %H:%M UTC"),
            published.end_at.format("%Y-%m-%d %H:%M UTC"),
            published.duration_minutes
        ))
        .reference("exam", published.id),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(published, "Exam published")))
}
