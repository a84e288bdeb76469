use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, not_found, respond};

pub async fn delete_class(
    service: &ClassService,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(delete(service, class_id, request).await)
}

async fn delete(service: &ClassService, class_id: i64, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    // 课表、作业、考试随班级级联删除，学生学籍的班级置空
    let deleted = storage
        .delete_class(class_id)
        .await
        .or_internal("Failed to delete class")?;

    if !deleted {
        return Err(not_found(ErrorCode::ClassNotFound, "Class not found"));
    }

    info!("Class {} deleted", class_id);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted")))
}
