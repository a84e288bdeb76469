use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssignmentService, valid_max_marks};
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::notifications::{entities::NotificationType, requests::NewNotification};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{notify, require_teaches};
use crate::services::{OrInternal, Reply, bad_request, current_user, non_blank, respond};

pub async fn create_assignment(
    service: &AssignmentService,
    assignment: CreateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(create(service, assignment, request).await)
}

async fn create(
    service: &AssignmentService,
    mut assignment: CreateAssignmentRequest,
    request: &HttpRequest,
) -> Reply {
    let teacher = current_user(request)?;

    if assignment.title.trim().is_empty() {
        return Err(bad_request(ErrorCode::BadRequest, "Title must not be empty"));
    }
    if !valid_max_marks(assignment.max_marks) {
        return Err(bad_request(ErrorCode::MarksOutOfRange, "max_marks must be greater than 0"));
    }

    let storage = service.get_storage(request);

    // 必须任教该班级的该科目
    require_teaches(&storage, teacher.id, assignment.class_id, Some(assignment.subject_id)).await?;

    assignment.title = assignment.title.trim().to_string();
    assignment.attachment_url = non_blank(assignment.attachment_url);

    let created = storage
        .create_assignment(teacher.id, assignment)
        .await
        .or_internal("Failed to create assignment")?;

    info!("Teacher {} created assignment {}", teacher.username, created.id);

    // 通知全班学生
    let student_ids: Vec<i64> = storage
        .list_class_students(created.class_id)
        .await
        .or_internal("Failed to list class students")?
        .into_iter()
        .map(|s| s.user_id)
        .collect();

    notify(
        &storage,
        &student_ids,
        NewNotification::new(
            NotificationType::AssignmentCreated,
            format!("New assignment: {}", created.title),
        )
        .content(format!("Due {}", created.due_at.format("%Y-%m-%d %H:%M UTC")))
        .reference("assignment", created.id),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Assignment created")))
}
