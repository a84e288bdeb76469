use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, not_found, respond};

pub async fn get_class(
    service: &ClassService,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(get(service, class_id, request).await)
}

async fn get(service: &ClassService, class_id: i64, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let class = storage
        .get_class_by_id(class_id)
        .await
        .or_internal("Failed to get class")?
        .ok_or_else(|| not_found(ErrorCode::ClassNotFound, "Class not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class retrieved")))
}
