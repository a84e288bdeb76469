use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PortfolioService;
use crate::models::portfolio::requests::CreatePortfolioRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::require_taught_student;
use crate::services::{OrInternal, Reply, bad_request, current_user, non_blank, respond};

pub async fn create_entry(
    service: &PortfolioService,
    entry: CreatePortfolioRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(create(service, entry, request).await)
}

async fn create(service: &PortfolioService, mut entry: CreatePortfolioRequest, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    entry.title = entry.title.trim().to_string();
    if entry.title.is_empty() || entry.content.trim().is_empty() {
        return Err(bad_request(
            ErrorCode::BadRequest,
            "Title and content must not be empty",
        ));
    }
    entry.term = non_blank(entry.term);

    require_taught_student(&storage, teacher.id, entry.student_id).await?;

    let created = storage
        .create_portfolio_entry(teacher.id, entry)
        .await
        .or_internal("Failed to create portfolio entry")?;

    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Portfolio entry created")))
}
