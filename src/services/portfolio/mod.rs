//! 成长档案

pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ErrorCode;
use crate::models::portfolio::{
    entities::PortfolioEntry,
    requests::{CreatePortfolioRequest, PortfolioQuery, UpdatePortfolioRequest},
};
use crate::services::{OrInternal, forbidden, not_found};
use crate::storage::Storage;

lazy_service!(PortfolioService);

impl PortfolioService {
    pub async fn create_entry(
        &self,
        entry: CreatePortfolioRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_entry(self, entry, request).await
    }

    pub async fn list_entries(
        &self,
        query: PortfolioQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_entries(self, query, request).await
    }

    pub async fn update_entry(
        &self,
        entry_id: i64,
        update: UpdatePortfolioRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_entry(self, entry_id, update, request).await
    }

    pub async fn delete_entry(&self, entry_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_entry(self, entry_id, request).await
    }

    pub async fn my_portfolio(
        &self,
        query: PortfolioQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::my_portfolio(self, query, request).await
    }

    pub async fn child_portfolio(
        &self,
        student_id: i64,
        query: PortfolioQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::child_portfolio(self, student_id, query, request).await
    }
}

/// 教师只能修改自己写的条目
async fn own_entry(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
    entry_id: i64,
) -> Result<PortfolioEntry, HttpResponse> {
    let entry = storage
        .get_portfolio_entry(entry_id)
        .await
        .or_internal("Failed to get portfolio entry")?
        .ok_or_else(|| not_found(ErrorCode::PortfolioNotFound, "Portfolio entry not found"))?;

    if entry.teacher_id != teacher_id {
        return Err(forbidden(
            ErrorCode::Forbidden,
            "You can only manage your own portfolio entries",
        ));
    }

    Ok(entry)
}
