use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::lifecycle::settle_all;
use super::{ExamService, summarize};
use crate::models::exams::{
    entities::AttemptStatus,
    requests::{ExamListParams, ExamListQuery},
    responses::{StudentExamListResponse, StudentExamView},
};
use crate::models::users::entities::StudentSummary;
use crate::models::{ApiResponse, PaginationInfo};
use crate::services::access::{own_student, require_child};
use crate::services::{OrInternal, Reply, current_user, respond};
use crate::storage::Storage;

pub async fn list_my_exams(
    service: &ExamService,
    query: ExamListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(mine(service, query, request).await)
}

pub async fn list_child_exams(
    service: &ExamService,
    student_id: i64,
    query: ExamListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(child(service, student_id, query, request).await)
}

async fn mine(service: &ExamService, query: ExamListParams, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let student = own_student(&storage, user.id).await?;

    let response = exams_for(&storage, &student, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Exams retrieved")))
}

async fn child(
    service: &ExamService,
    student_id: i64,
    query: ExamListParams,
    request: &HttpRequest,
) -> Reply {
    let parent = current_user(request)?;
    let storage = service.get_storage(request);
    let student = require_child(&storage, parent.id, student_id).await?;

    let response = exams_for(&storage, &student, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Exams retrieved")))
}

/// 学生所在班级已发布的考试，附带本人作答
pub(crate) async fn exams_for(
    storage: &Arc<dyn Storage>,
    student: &StudentSummary,
    query: ExamListParams,
) -> Result<StudentExamListResponse, HttpResponse> {
    let Some(class_id) = student.class_id else {
        return Ok(StudentExamListResponse {
            items: Vec::new(),
            pagination: PaginationInfo {
                page: query.pagination.page,
                page_size: query.pagination.size,
                total: 0,
                total_pages: 0,
            },
        });
    };

    let (exams, pagination) = storage
        .list_exams_with_pagination(ExamListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            class_id: Some(class_id),
            subject_id: query.subject_id,
            teacher_id: None,
            published_only: true,
        })
        .await
        .or_internal("Failed to list exams")?;

    let exam_ids: Vec<i64> = exams.iter().map(|e| e.id).collect();
    let attempts = storage
        .list_student_attempts(student.user_id, &exam_ids)
        .await
        .or_internal("Failed to list attempts")?;
    let mut attempts: HashMap<i64, _> = settle_all(storage, attempts, Utc::now())
        .await?
        .into_iter()
        .map(|a| (a.exam_id, a))
        .collect();

    let items = summarize(storage, exams)
        .await?
        .into_iter()
        .map(|summary| {
            let attempt = attempts.remove(&summary.exam.id).map(|mut a| {
                if a.status != AttemptStatus::Graded {
                    a.score = None;
                }
                a
            });
            StudentExamView {
                exam: summary.exam,
                subject_name: summary.subject_name,
                total_marks: summary.total_marks,
                attempt,
            }
        })
        .collect();

    Ok(StudentExamListResponse { items, pagination })
}
