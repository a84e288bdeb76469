use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, own_assignment};
use crate::models::ApiResponse;
use crate::services::{Reply, current_user, respond};

pub async fn get_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(get(service, assignment_id, request).await)
}

async fn get(service: &AssignmentService, assignment_id: i64, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    let assignment = own_assignment(&storage, teacher.id, assignment_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "Assignment retrieved")))
}
