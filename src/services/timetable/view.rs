use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TimetableService;
use crate::models::ApiResponse;
use crate::models::timetable::{requests::TimetableQuery, responses::TimetableResponse};
use crate::models::users::entities::UserRole;
use crate::services::access::{own_student, require_child};
use crate::services::{OrInternal, Reply, current_user, respond};

pub async fn my_timetable(
    service: &TimetableService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(own(service, request).await)
}

pub async fn child_timetable(
    service: &TimetableService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(child(service, student_id, request).await)
}

async fn own(service: &TimetableService, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let query = match user.role {
        UserRole::Teacher => Some(TimetableQuery {
            teacher_id: Some(user.id),
            ..Default::default()
        }),
        // 尚未分班的学生没有课表
        _ => own_student(&storage, user.id).await?.class_id.map(|class_id| TimetableQuery {
            class_id: Some(class_id),
            ..Default::default()
        }),
    };

    load(service, query, request).await
}

async fn child(service: &TimetableService, student_id: i64, request: &HttpRequest) -> Reply {
    let parent = current_user(request)?;
    let storage = service.get_storage(request);

    let student = require_child(&storage, parent.id, student_id).await?;
    let query = student.class_id.map(|class_id| TimetableQuery {
        class_id: Some(class_id),
        ..Default::default()
    });

    load(service, query, request).await
}

async fn load(
    service: &TimetableService,
    query: Option<TimetableQuery>,
    request: &HttpRequest,
) -> Reply {
    let items = match query {
        Some(query) => service
            .get_storage(request)
            .list_timetable(query)
            .await
            .or_internal("Failed to list timetable")?,
        None => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TimetableResponse { items },
        "Timetable retrieved",
    )))
}
