use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::ApiResponse;
use crate::models::classes::responses::TeacherClassesResponse;
use crate::services::{OrInternal, Reply, current_user, respond};

pub async fn list_my_classes(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, request).await)
}

async fn list(service: &ClassService, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    let items = storage
        .list_teacher_classes(teacher.id)
        .await
        .or_internal("Failed to list classes")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TeacherClassesResponse { items },
        "Classes retrieved",
    )))
}
