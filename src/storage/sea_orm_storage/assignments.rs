//! 作业存储操作

use super::{SeaOrmStorage, page_bounds};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{EduBridgeError, Result};
use crate::models::assignments::{
    entities::{Assignment, Submission},
    requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
    responses::AssignmentListResponse,
};
use crate::storage::AssignmentStorage;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

#[async_trait]
impl AssignmentStorage for SeaOrmStorage {
    async fn create_assignment(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(req.class_id),
            subject_id: Set(req.subject_id),
            teacher_id: Set(teacher_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            attachment_url: Set(req.attachment_url),
            due_at: Set(req.due_at.timestamp()),
            max_marks: Set(req.max_marks),
            allow_late: Set(req.allow_late),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let (page, size) = page_bounds(query.page, query.size);

        let mut select = Assignments::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        if let Some(class_ids) = query.class_ids {
            select = select.filter(Column::ClassId.is_in(class_ids));
        }

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        select = select.order_by_desc(Column::DueAt).order_by_desc(Column::Id);

        let (assignments, pagination) = self.fetch_page(select, page, size).await?;

        Ok(AssignmentListResponse {
            items: assignments
                .into_iter()
                .map(|m| m.into_assignment())
                .collect(),
            pagination,
        })
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let Some(existing) = Assignments::find_by_id(assignment_id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(url) = update.attachment_url {
            model.attachment_url = Set(Some(url).filter(|u| !u.trim().is_empty()));
        }

        if let Some(due_at) = update.due_at {
            model.due_at = Set(due_at.timestamp());
        }

        if let Some(max_marks) = update.max_marks {
            model.max_marks = Set(max_marks);
        }

        if let Some(allow_late) = update.allow_late {
            model.allow_late = Set(allow_late);
        }

        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("更新作业失败: {e}")))?;

        Ok(Some(updated.into_assignment()))
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(assignment_id)
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn get_student_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_student_submission_impl(assignment_id, student_id)
            .await
    }

    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
        attachment_url: Option<String>,
        is_late: bool,
    ) -> Result<Option<Submission>> {
        self.upsert_submission_impl(assignment_id, student_id, content, attachment_url, is_late)
            .await
    }

    async fn list_assignment_submissions(&self, assignment_id: i64) -> Result<Vec<Submission>> {
        self.list_assignment_submissions_impl(assignment_id).await
    }

    async fn list_student_submissions(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        self.list_student_submissions_impl(student_id, assignment_ids)
            .await
    }

    async fn grade_submission(
        &self,
        submission_id: i64,
        marks: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(submission_id, marks, feedback, graded_by)
            .await
    }

    async fn count_pending_submissions(&self, teacher_id: i64) -> Result<i64> {
        self.count_pending_submissions_impl(teacher_id).await
    }
}
