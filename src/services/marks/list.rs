use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarksService;
use crate::models::marks::{requests::TermMarkQuery, responses::TermMarkListResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::require_teaches;
use crate::services::{OrInternal, Reply, bad_request, current_user, respond};

pub async fn list_marks(
    service: &MarksService,
    query: TermMarkQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, query, request).await)
}

async fn list(service: &MarksService, query: TermMarkQuery, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    // 教师按班级查看，科目可选
    let Some(class_id) = query.class_id else {
        return Err(bad_request(ErrorCode::BadRequest, "class_id is required"));
    };
    require_teaches(&storage, teacher.id, class_id, query.subject_id).await?;

    let items = storage
        .list_term_marks(query)
        .await
        .or_internal("Failed to list term marks")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TermMarkListResponse { items },
        "Term marks retrieved",
    )))
}
