use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::classes::responses::ClassRosterResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::require_teaches;
use crate::services::{OrInternal, Reply, current_user, not_found, respond};

pub async fn get_roster(
    service: &ClassService,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(roster(service, class_id, request).await)
}

async fn roster(service: &ClassService, class_id: i64, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let class = storage
        .get_class_by_id(class_id)
        .await
        .or_internal("Failed to get class")?
        .ok_or_else(|| not_found(ErrorCode::ClassNotFound, "Class not found"))?;

    if user.role == UserRole::Teacher {
        require_teaches(&storage, user.id, class_id, None).await?;
    }

    let students = storage
        .list_class_students(class_id)
        .await
        .or_internal("Failed to list students")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ClassRosterResponse { class, students },
        "Roster retrieved",
    )))
}
