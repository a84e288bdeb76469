use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::ApiResponse;
use crate::models::users::requests::{UserListParams, UserListQuery};
use crate::services::{OrInternal, Reply, non_blank, respond};

pub async fn list_users(
    service: &UserService,
    query: UserListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, query, request).await)
}

async fn list(service: &UserService, query: UserListParams, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let mut list_query = UserListQuery::from(query);
    list_query.search = non_blank(list_query.search);

    let response = storage
        .list_users_with_pagination(list_query)
        .await
        .or_internal("Failed to list users")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Users retrieved")))
}
