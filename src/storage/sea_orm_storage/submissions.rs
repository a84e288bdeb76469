//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{EduBridgeError, Result};
use crate::models::assignments::entities::{Submission, SubmissionStatus};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub(crate) async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub(crate) async fn get_student_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 每个学生每份作业只保留一条提交，重新提交时覆盖内容并清空评分
    ///
    /// 已批改的提交不会被覆盖，此时返回 None。
    pub(crate) async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
        attachment_url: Option<String>,
        is_late: bool,
    ) -> Result<Option<Submission>> {
        let now = chrono::Utc::now().timestamp();
        let status = if is_late {
            SubmissionStatus::Late
        } else {
            SubmissionStatus::Submitted
        };

        // 状态条件与覆盖在同一条语句内，和教师评分并发时不会抹掉分数
        let updated = Submissions::update_many()
            .col_expr(Column::Content, Expr::value(content.clone()))
            .col_expr(Column::AttachmentUrl, Expr::value(attachment_url.clone()))
            .col_expr(Column::Status, Expr::value(status.to_string()))
            .col_expr(Column::IsLate, Expr::value(is_late))
            .col_expr(Column::SubmittedAt, Expr::value(now))
            .col_expr(Column::Marks, Expr::value(Option::<f64>::None))
            .col_expr(Column::Feedback, Expr::value(Option::<String>::None))
            .col_expr(Column::GradedBy, Expr::value(Option::<i64>::None))
            .col_expr(Column::GradedAt, Expr::value(Option::<i64>::None))
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.ne(SubmissionStatus::Graded.to_string()))
            .exec(&self.db)
            .await?;

        if updated.rows_affected == 0 {
            // MySQL 对未改变的行返回 0，需再读一次区分三种情况
            match self
                .get_student_submission_impl(assignment_id, student_id)
                .await?
            {
                Some(existing) if existing.status == SubmissionStatus::Graded => return Ok(None),
                Some(existing) => return Ok(Some(existing)),
                None => {
                    // 并发的首次提交会撞上唯一约束，转换为冲突错误
                    let inserted = ActiveModel {
                        assignment_id: Set(assignment_id),
                        student_id: Set(student_id),
                        content: Set(content),
                        attachment_url: Set(attachment_url),
                        status: Set(status.to_string()),
                        is_late: Set(is_late),
                        submitted_at: Set(now),
                        ..Default::default()
                    }
                    .insert(&self.db)
                    .await?;
                    return Ok(Some(inserted.into_submission()));
                }
            }
        }

        self.get_student_submission_impl(assignment_id, student_id)
            .await
    }

    pub(crate) async fn list_assignment_submissions_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_submission()).collect())
    }

    pub(crate) async fn list_student_submissions_impl(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::AssignmentId.is_in(assignment_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询学生提交失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_submission()).collect())
    }

    pub(crate) async fn grade_submission_impl(
        &self,
        submission_id: i64,
        marks: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        let Some(existing) = Submissions::find_by_id(submission_id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.marks = Set(Some(marks));
        active.feedback = Set(feedback);
        active.status = Set(SubmissionStatus::Graded.to_string());
        active.graded_by = Set(Some(graded_by));
        active.graded_at = Set(Some(chrono::Utc::now().timestamp()));

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("批改提交失败: {e}")))?;

        Ok(Some(updated.into_submission()))
    }

    pub(crate) async fn count_pending_submissions_impl(&self, teacher_id: i64) -> Result<i64> {
        let count = Submissions::find()
            .inner_join(Assignments)
            .filter(AssignmentColumn::TeacherId.eq(teacher_id))
            .filter(Column::Status.is_in([
                SubmissionStatus::Submitted.to_string(),
                SubmissionStatus::Late.to_string(),
            ]))
            .count(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("统计待批改提交失败: {e}")))?;

        Ok(count as i64)
    }
}
