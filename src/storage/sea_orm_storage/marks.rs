//! 学期成绩存储

use super::SeaOrmStorage;
use crate::entity::term_marks::{ActiveModel, Column, Entity as TermMarks};
use crate::errors::{EduBridgeError, Result};
use crate::models::marks::{
    entities::TermMark,
    requests::{TermMarkQuery, TermMarkUpsert},
};
use crate::storage::MarksStorage;
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

#[async_trait]
impl MarksStorage for SeaOrmStorage {
    async fn upsert_term_marks(&self, marks: Vec<TermMarkUpsert>) -> Result<Vec<TermMark>> {
        if marks.is_empty() {
            return Ok(Vec::new());
        }

        let now = chrono::Utc::now().timestamp();

        // 写入后按唯一键取回
        let mut keys = Condition::any();
        for m in &marks {
            keys = keys.add(
                Condition::all()
                    .add(Column::StudentId.eq(m.student_id))
                    .add(Column::SubjectId.eq(m.subject_id))
                    .add(Column::Term.eq(m.term.clone()))
                    .add(Column::AcademicYear.eq(m.academic_year.clone())),
            );
        }

        let models = marks.into_iter().map(|m| ActiveModel {
            student_id: Set(m.student_id),
            subject_id: Set(m.subject_id),
            class_id: Set(m.class_id),
            teacher_id: Set(m.teacher_id),
            term: Set(m.term),
            academic_year: Set(m.academic_year),
            marks: Set(m.marks),
            max_marks: Set(m.max_marks),
            remarks: Set(m.remarks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        });

        TermMarks::insert_many(models)
            .on_conflict(
                OnConflict::columns([
                    Column::StudentId,
                    Column::SubjectId,
                    Column::Term,
                    Column::AcademicYear,
                ])
                .update_columns([
                    Column::ClassId,
                    Column::TeacherId,
                    Column::Marks,
                    Column::MaxMarks,
                    Column::Remarks,
                    Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("保存学期成绩失败: {e}")))?;

        let saved = TermMarks::find()
            .filter(keys)
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await?;

        Ok(saved.into_iter().map(|m| m.into_term_mark()).collect())
    }

    async fn list_term_marks(&self, query: TermMarkQuery) -> Result<Vec<TermMark>> {
        let mut select = TermMarks::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(term) = query.term {
            select = select.filter(Column::Term.eq(term));
        }

        if let Some(year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(year));
        }

        let result = select
            .order_by_desc(Column::AcademicYear)
            .order_by_asc(Column::Term)
            .order_by_asc(Column::StudentId)
            .order_by_asc(Column::SubjectId)
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询学期成绩失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_term_mark()).collect())
    }
}
