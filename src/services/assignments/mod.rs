pub mod create;
pub mod delete;
pub mod get;
pub mod grade;
pub mod list;
pub mod student_list;
pub mod submissions;
pub mod submit;
pub mod update;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ErrorCode;
use crate::models::assignments::{
    entities::Assignment,
    requests::{
        AssignmentListParams, CreateAssignmentRequest, GradeSubmissionRequest,
        SubmitAssignmentRequest, UpdateAssignmentRequest,
    },
};
use crate::services::{OrInternal, forbidden, not_found};
use crate::storage::Storage;

lazy_service!(AssignmentService);

impl AssignmentService {
    // 教师布置作业
    pub async fn create_assignment(
        &self,
        assignment: CreateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, assignment, request).await
    }

    // 教师本人的作业列表
    pub async fn list_assignments(
        &self,
        query: AssignmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, query, request).await
    }

    pub async fn get_assignment(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_assignment(self, assignment_id, request).await
    }

    pub async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, assignment_id, update, request).await
    }

    pub async fn delete_assignment(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, assignment_id, request).await
    }

    // 某作业的提交列表
    pub async fn list_submissions(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submissions::list_submissions(self, assignment_id, request).await
    }

    // 批改提交
    pub async fn grade_submission(
        &self,
        submission_id: i64,
        grade: GradeSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, submission_id, grade, request).await
    }

    // 学生提交或重新提交
    pub async fn submit_assignment(
        &self,
        assignment_id: i64,
        submission: SubmitAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assignment(self, assignment_id, submission, request).await
    }

    // 学生本人的作业及提交状态
    pub async fn list_my_assignments(
        &self,
        query: AssignmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student_list::list_my_assignments(self, query, request).await
    }

    // 家长查看子女的作业
    pub async fn list_child_assignments(
        &self,
        student_id: i64,
        query: AssignmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student_list::list_child_assignments(self, student_id, query, request).await
    }
}

/// 教师只能操作自己布置的作业
async fn own_assignment(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
    assignment_id: i64,
) -> Result<Assignment, HttpResponse> {
    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await
        .or_internal("Failed to get assignment")?
        .ok_or_else(|| not_found(ErrorCode::AssignmentNotFound, "Assignment not found"))?;

    if assignment.teacher_id != teacher_id {
        return Err(forbidden(
            ErrorCode::Forbidden,
            "You can only manage your own assignments",
        ));
    }

    Ok(assignment)
}

fn valid_max_marks(max_marks: f64) -> bool {
    max_marks.is_finite() && max_marks > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_max_marks() {
        assert!(valid_max_marks(10.0));
        assert!(!valid_max_marks(0.0));
        assert!(!valid_max_marks(-5.0));
        assert!(!valid_max_marks(f64::NAN));
    }
}
