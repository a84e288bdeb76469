use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PortfolioService, own_entry};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{OrInternal, Reply, current_user, not_found, respond};

pub async fn delete_entry(
    service: &PortfolioService,
    entry_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(delete(service, entry_id, request).await)
}

async fn delete(service: &PortfolioService, entry_id: i64, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    own_entry(&storage, teacher.id, entry_id).await?;

    if !storage
        .delete_portfolio_entry(entry_id)
        .await
        .or_internal("Failed to delete portfolio entry")?
    {
        return Err(not_found(ErrorCode::PortfolioNotFound, "Portfolio entry not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Portfolio entry deleted")))
}
