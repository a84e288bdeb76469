use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, own_assignment};
use crate::models::ApiResponse;
use crate::models::assignments::responses::{SubmissionListResponse, SubmissionWithStudent};
use crate::services::access::{name_of, user_names};
use crate::services::{OrInternal, Reply, current_user, respond};

pub async fn list_submissions(
    service: &AssignmentService,
    assignment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, assignment_id, request).await)
}

async fn list(service: &AssignmentService, assignment_id: i64, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    let assignment = own_assignment(&storage, teacher.id, assignment_id).await?;

    let roster = storage
        .list_class_students(assignment.class_id)
        .await
        .or_internal("Failed to list class students")?;
    let submissions = storage
        .list_assignment_submissions(assignment_id)
        .await
        .or_internal("Failed to list submissions")?;

    let roll_numbers: HashMap<i64, Option<i32>> =
        roster.iter().map(|s| (s.user_id, s.roll_number)).collect();

    // 已转班的学生不在名单中，单独补全姓名
    let missing: Vec<i64> = submissions
        .iter()
        .map(|s| s.student_id)
        .filter(|id| !roll_numbers.contains_key(id))
        .collect();
    let mut names: HashMap<i64, String> = roster
        .iter()
        .map(|s| {
            let name = s.display_name.clone().unwrap_or_else(|| s.username.clone());
            (s.user_id, name)
        })
        .collect();
    names.extend(user_names(&storage, &missing).await?);

    let submitted_count = submissions.len() as i64;
    let not_submitted_count = roster
        .iter()
        .filter(|s| !submissions.iter().any(|sub| sub.student_id == s.user_id))
        .count() as i64;

    let mut items: Vec<SubmissionWithStudent> = submissions
        .into_iter()
        .map(|submission| SubmissionWithStudent {
            student_name: name_of(&names, submission.student_id),
            roll_number: roll_numbers.get(&submission.student_id).copied().flatten(),
            submission,
        })
        .collect();
    items.sort_by_key(|s| (s.roll_number.is_none(), s.roll_number, s.submission.student_id));

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmissionListResponse {
            assignment,
            items,
            submitted_count,
            not_submitted_count,
        },
        "Submissions retrieved",
    )))
}
