use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnnouncementService;
use crate::models::ApiResponse;
use crate::models::announcements::{
    entities::AnnouncementAudience,
    requests::{AnnouncementListParams, AnnouncementListQuery},
};
use crate::models::users::entities::UserRole;
use crate::services::access::visible_class_ids;
use crate::services::{OrInternal, Reply, current_user, respond};

pub async fn list_announcements(
    service: &AnnouncementService,
    query: AnnouncementListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, query, request).await)
}

async fn list(service: &AnnouncementService, query: AnnouncementListParams, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    // 管理员不过滤
    let audiences = (user.role != UserRole::Admin).then(|| AnnouncementAudience::visible_to(user.role));
    let class_ids = visible_class_ids(&storage, &user).await?;

    let response = storage
        .list_announcements_with_pagination(AnnouncementListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            audiences,
            class_ids,
            created_by: Some(user.id),
        })
        .await
        .or_internal("Failed to list announcements")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Announcements retrieved")))
}
