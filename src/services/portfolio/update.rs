use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PortfolioService, own_entry};
use crate::models::portfolio::requests::UpdatePortfolioRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, bad_request, current_user, not_found, respond};

pub async fn update_entry(
    service: &PortfolioService,
    entry_id: i64,
    update: UpdatePortfolioRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(update_one(service, entry_id, update, request).await)
}

async fn update_one(
    service: &PortfolioService,
    entry_id: i64,
    update: UpdatePortfolioRequest,
    request: &HttpRequest,
) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    own_entry(&storage, teacher.id, entry_id).await?;

    let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
    if blank(&update.title) || blank(&update.content) {
        return Err(bad_request(
            ErrorCode::BadRequest,
            "Title and content must not be empty",
        ));
    }

    let updated = storage
        .update_portfolio_entry(entry_id, update)
        .await
        .or_internal("Failed to update portfolio entry")?
        .ok_or_else(|| not_found(ErrorCode::PortfolioNotFound, "Portfolio entry not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Portfolio entry updated")))
}
