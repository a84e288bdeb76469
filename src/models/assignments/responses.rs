use super::entities::{Assignment, Submission, SubmissionStatus};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
    pub pagination: PaginationInfo,
}

/// 学生/家长视角：作业及本人提交情况
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct StudentAssignmentView {
    pub assignment: Assignment,
    pub subject_name: String,
    pub status: SubmissionStatus,
    pub submission: Option<Submission>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct StudentAssignmentListResponse {
    pub items: Vec<StudentAssignmentView>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmissionWithStudent {
    pub submission: Submission,
    pub student_name: String,
    pub roll_number: Option<i32>,
}

/// 教师查看某作业的提交列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmissionListResponse {
    pub assignment: Assignment,
    pub items: Vec<SubmissionWithStudent>,
    pub submitted_count: i64,
    pub not_submitted_count: i64,
}
