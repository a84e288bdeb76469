use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, check_class_teacher, require_text};
use crate::models::classes::requests::CreateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, respond};

pub async fn create_class(
    service: &ClassService,
    class_data: CreateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(create(service, class_data, request).await)
}

async fn create(service: &ClassService, class_data: CreateClassRequest, request: &HttpRequest) -> Reply {
    require_text(&class_data.name, "Class name")?;
    require_text(&class_data.academic_year, "Academic year")?;

    let storage = service.get_storage(request);
    check_class_teacher(&storage, class_data.class_teacher_id).await?;

    let class = storage
        .create_class(class_data)
        .await
        .or_conflict(
            ErrorCode::ClassAlreadyExists,
            "A class with this name and section already exists for the academic year",
            "Class creation failed",
        )?;

    info!("Created class {} ({})", class.label(), class.academic_year);

    Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created")))
}
