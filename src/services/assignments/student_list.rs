use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::{
    entities::student_status,
    requests::{AssignmentListParams, AssignmentListQuery},
    responses::{StudentAssignmentListResponse, StudentAssignmentView},
};
use crate::models::users::entities::StudentSummary;
use crate::models::{ApiResponse, PaginationInfo};
use crate::services::access::{name_of, own_student, require_child, subject_names};
use crate::services::{OrInternal, Reply, current_user, respond};
use crate::storage::Storage;

pub async fn list_my_assignments(
    service: &AssignmentService,
    query: AssignmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(mine(service, query, request).await)
}

pub async fn list_child_assignments(
    service: &AssignmentService,
    student_id: i64,
    query: AssignmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(child(service, student_id, query, request).await)
}

async fn mine(service: &AssignmentService, query: AssignmentListParams, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let student = own_student(&storage, user.id).await?;

    let response = assignments_for(&storage, &student, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Assignments retrieved")))
}

async fn child(
    service: &AssignmentService,
    student_id: i64,
    query: AssignmentListParams,
    request: &HttpRequest,
) -> Reply {
    let parent = current_user(request)?;
    let storage = service.get_storage(request);
    let student = require_child(&storage, parent.id, student_id).await?;

    let response = assignments_for(&storage, &student, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Assignments retrieved")))
}

/// 学生所在班级的作业，附带本人提交状态
pub(crate) async fn assignments_for(
    storage: &Arc<dyn Storage>,
    student: &StudentSummary,
    query: AssignmentListParams,
) -> Result<StudentAssignmentListResponse, HttpResponse> {
    let Some(class_id) = student.class_id else {
        return Ok(StudentAssignmentListResponse {
            items: Vec::new(),
            pagination: PaginationInfo {
                page: query.pagination.page,
                page_size: query.pagination.size,
                total: 0,
                total_pages: 0,
            },
        });
    };

    let page = storage
        .list_assignments_with_pagination(AssignmentListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            class_id: Some(class_id),
            subject_id: query.subject_id,
            ..Default::default()
        })
        .await
        .or_internal("Failed to list assignments")?;

    let assignment_ids: Vec<i64> = page.items.iter().map(|a| a.id).collect();
    let mut subject_ids: Vec<i64> = page.items.iter().map(|a| a.subject_id).collect();
    subject_ids.sort_unstable();
    subject_ids.dedup();

    let subjects = subject_names(storage, &subject_ids).await?;
    let mut submissions: HashMap<i64, _> = storage
        .list_student_submissions(student.user_id, &assignment_ids)
        .await
        .or_internal("Failed to list submissions")?
        .into_iter()
        .map(|s| (s.assignment_id, s))
        .collect();

    let items = page
        .items
        .into_iter()
        .map(|assignment| {
            let submission = submissions.remove(&assignment.id);
            StudentAssignmentView {
                subject_name: name_of(&subjects, assignment.subject_id),
                status: student_status(submission.as_ref()),
                submission,
                assignment,
            }
        })
        .collect();

    Ok(StudentAssignmentListResponse {
        items,
        pagination: page.pagination,
    })
}
