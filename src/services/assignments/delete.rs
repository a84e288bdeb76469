use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, own_assignment};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, current_user, not_found, respond};

pub async fn delete_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(delete(service, assignment_id, request).await)
}

async fn delete(service: &AssignmentService, assignment_id: i64, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    own_assignment(&storage, teacher.id, assignment_id).await?;

    // 提交记录随作业级联删除
    let deleted = storage
        .delete_assignment(assignment_id)
        .await
        .or_internal("Failed to delete assignment")?;

    if !deleted {
        return Err(not_found(ErrorCode::AssignmentNotFound, "Assignment not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Assignment deleted")))
}
