use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AnnouncementService, recipients};
use crate::models::announcements::requests::CreateAnnouncementRequest;
use crate::models::notifications::{entities::NotificationType, requests::NewNotification};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{notify, require_teaches};
use crate::services::{OrInternal, Reply, bad_request, current_user, not_found, respond};

pub async fn create_announcement(
    service: &AnnouncementService,
    announcement: CreateAnnouncementRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(create(service, announcement, request).await)
}

async fn create(
    service: &AnnouncementService,
    announcement: CreateAnnouncementRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    if announcement.title.trim().is_empty() || announcement.content.trim().is_empty() {
        return Err(bad_request(
            ErrorCode::BadRequest,
            "Title and content must not be empty",
        ));
    }

    match announcement.class_id {
        Some(class_id) => {
            storage
                .get_class_by_id(class_id)
                .await
                .or_internal("Failed to get class")?
                .ok_or_else(|| not_found(ErrorCode::ClassNotFound, "Class not found"))?;
            if user.role == UserRole::Teacher {
                require_teaches(&storage, user.id, class_id, None).await?;
            }
        }
        // 教师只能发布班级公告
        None if user.role == UserRole::Teacher => {
            return Err(bad_request(
                ErrorCode::BadRequest,
                "Teachers must choose one of their classes",
            ));
        }
        None => {}
    }

    let created = storage
        .create_announcement(user.id, announcement)
        .await
        .or_internal("Failed to create announcement")?;

    info!(
        "{} {} posted announcement {} (audience {}, class {:?})",
        user.role, user.username, created.id, created.audience, created.class_id
    );

    let targets: Vec<i64> = recipients(&storage, created.audience, created.class_id)
        .await?
        .into_iter()
        .filter(|id| *id != user.id)
        .collect();
    notify(
        &storage,
        &targets,
        NewNotification::new(NotificationType::Announcement, created.title.clone())
            .reference("announcement", created.id),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Announcement posted")))
}
