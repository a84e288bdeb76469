use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, check_class_teacher, require_text};
use crate::models::classes::requests::UpdateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, not_found, respond};

pub async fn update_class(
    service: &ClassService,
    class_id: i64,
    update_data: UpdateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(update(service, class_id, update_data, request).await)
}

async fn update(
    service: &ClassService,
    class_id: i64,
    update_data: UpdateClassRequest,
    request: &HttpRequest,
) -> Reply {
    if let Some(name) = &update_data.name {
        require_text(name, "Class name")?;
    }
    if let Some(year) = &update_data.academic_year {
        require_text(year, "Academic year")?;
    }

    let storage = service.get_storage(request);
    check_class_teacher(&storage, update_data.class_teacher_id).await?;

    let class = storage
        .update_class(class_id, update_data)
        .await
        .or_conflict(
            ErrorCode::ClassAlreadyExists,
            "A class with this name and section already exists for the academic year",
            "Class update failed",
        )?
        .ok_or_else(|| not_found(ErrorCode::ClassNotFound, "Class not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated")))
}
