use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::users::{
    entities::UserRole, requests::LinkChildRequest, responses::ChildrenResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::require_user_with_role;
use crate::services::{OrInternal, Reply, current_user, non_blank, not_found, respond};

const DEFAULT_RELATIONSHIP: &str = "guardian";

pub async fn list_children(
    service: &UserService,
    parent_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, parent_id, request).await)
}

pub async fn link_child(
    service: &UserService,
    parent_id: i64,
    link: LinkChildRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(link_parent(service, parent_id, link, request).await)
}

pub async fn unlink_child(
    service: &UserService,
    parent_id: i64,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(unlink(service, parent_id, student_id, request).await)
}

/// 家长本人的子女
pub async fn list_my_children(
    service: &UserService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(my_children(service, request).await)
}

async fn my_children(service: &UserService, request: &HttpRequest) -> Reply {
    let parent = current_user(request)?;
    let items = service
        .get_storage(request)
        .list_children(parent.id)
        .await
        .or_internal("Failed to list children")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ChildrenResponse { items },
        "Children retrieved",
    )))
}

async fn list(service: &UserService, parent_id: i64, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    require_user_with_role(&storage, parent_id, UserRole::Parent).await?;

    let items = storage
        .list_children(parent_id)
        .await
        .or_internal("Failed to list children")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ChildrenResponse { items },
        "Children retrieved",
    )))
}

async fn link_parent(
    service: &UserService,
    parent_id: i64,
    link: LinkChildRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    // 两端角色必须分别是家长和学生
    let parent = require_user_with_role(&storage, parent_id, UserRole::Parent).await?;
    let student = require_user_with_role(&storage, link.student_id, UserRole::Student).await?;

    let relationship = non_blank(link.relationship)
        .map(|r| r.to_lowercase())
        .unwrap_or_else(|| DEFAULT_RELATIONSHIP.to_string());

    let created = storage
        .link_parent(parent.id, student.id, &relationship)
        .await
        .or_conflict(
            ErrorCode::ParentLinkAlreadyExists,
            "Student is already linked to this parent",
            "Failed to link student",
        )?;

    info!("Linked parent {} to student {}", parent.username, student.username);

    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Student linked")))
}

async fn unlink(
    service: &UserService,
    parent_id: i64,
    student_id: i64,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    let removed = storage
        .unlink_parent(parent_id, student_id)
        .await
        .or_internal("Failed to unlink student")?;

    if !removed {
        return Err(not_found(ErrorCode::ParentLinkNotFound, "Parent link not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student unlinked")))
}
