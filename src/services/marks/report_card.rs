use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MarksService, term_or_current};
use crate::models::ApiResponse;
use crate::models::marks::{
    entities::ReportCard,
    requests::{ReportCardQuery, TermMarkQuery},
};
use crate::services::access::{name_of, own_student, require_child, subject_names};
use crate::services::{OrInternal, Reply, current_user, respond};

pub async fn my_report_card(
    service: &MarksService,
    query: ReportCardQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(mine(service, query, request).await)
}

pub async fn child_report_card(
    service: &MarksService,
    student_id: i64,
    query: ReportCardQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(child(service, student_id, query, request).await)
}

async fn mine(service: &MarksService, query: ReportCardQuery, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    own_student(&service.get_storage(request), user.id).await?;

    build(service, user.id, query, request).await
}

async fn child(
    service: &MarksService,
    student_id: i64,
    query: ReportCardQuery,
    request: &HttpRequest,
) -> Reply {
    let parent = current_user(request)?;
    require_child(&service.get_storage(request), parent.id, student_id).await?;

    build(service, student_id, query, request).await
}

async fn build(
    service: &MarksService,
    student_id: i64,
    query: ReportCardQuery,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    let (term, academic_year) = term_or_current(query.term, query.academic_year).await;

    let marks = storage
        .list_term_marks(TermMarkQuery {
            student_id: Some(student_id),
            term: Some(term.clone()),
            academic_year: Some(academic_year.clone()),
            ..Default::default()
        })
        .await
        .or_internal("Failed to list term marks")?;

    let mut subject_ids: Vec<i64> = marks.iter().map(|m| m.subject_id).collect();
    subject_ids.sort_unstable();
    subject_ids.dedup();
    let subjects = subject_names(&storage, &subject_ids).await?;

    let card = ReportCard::build(student_id, &term, &academic_year, &marks, |id| {
        name_of(&subjects, id)
    });

    Ok(HttpResponse::Ok().json(ApiResponse::success(card, "Report card retrieved")))
}
