use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PortfolioService;
use crate::models::ApiResponse;
use crate::models::portfolio::{
    requests::{PortfolioFilter, PortfolioQuery},
    responses::PortfolioListResponse,
};
use crate::services::access::{own_student, require_child};
use crate::services::{OrInternal, Reply, current_user, non_blank, respond};

pub async fn list_entries(
    service: &PortfolioService,
    query: PortfolioQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(teacher(service, query, request).await)
}

pub async fn my_portfolio(
    service: &PortfolioService,
    query: PortfolioQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(mine(service, query, request).await)
}

pub async fn child_portfolio(
    service: &PortfolioService,
    student_id: i64,
    query: PortfolioQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(child(service, student_id, query, request).await)
}

// 教师看到自己写的全部条目
async fn teacher(service: &PortfolioService, query: PortfolioQuery, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;

    load(
        service,
        PortfolioFilter {
            student_id: query.student_id,
            teacher_id: Some(user.id),
            category: query.category,
            term: non_blank(query.term),
            parent_visible_only: false,
        },
        request,
    )
    .await
}

async fn mine(service: &PortfolioService, query: PortfolioQuery, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    own_student(&service.get_storage(request), user.id).await?;

    load(
        service,
        PortfolioFilter {
            student_id: Some(user.id),
            teacher_id: None,
            category: query.category,
            term: non_blank(query.term),
            parent_visible_only: false,
        },
        request,
    )
    .await
}

// 家长只能看到对家长可见的条目
async fn child(
    service: &PortfolioService,
    student_id: i64,
    query: PortfolioQuery,
    request: &HttpRequest,
) -> Reply {
    let parent = current_user(request)?;
    require_child(&service.get_storage(request), parent.id, student_id).await?;

    load(
        service,
        PortfolioFilter {
            student_id: Some(student_id),
            teacher_id: None,
            category: query.category,
            term: non_blank(query.term),
            parent_visible_only: true,
        },
        request,
    )
    .await
}

async fn load(service: &PortfolioService, filter: PortfolioFilter, request: &HttpRequest) -> Reply {
    let items = service
        .get_storage(request)
        .list_portfolio_entries(filter)
        .await
        .or_internal("Failed to list portfolio entries")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PortfolioListResponse { items },
        "Portfolio retrieved",
    )))
}
