//! 考试作答实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub status: String,
    pub started_at: i64,
    pub deadline_at: i64,
    pub submitted_at: Option<i64>,
    pub score: Option<f64>,
    pub auto_submitted: bool,
    pub graded_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exams::Entity",
        from = "Column::ExamId",
        to = "super::exams::Column::Id"
    )]
    Exam,
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attempt(self) -> crate::models::exams::entities::ExamAttempt {
        use crate::models::exams::entities::{AttemptStatus, ExamAttempt};

        ExamAttempt {
            id: self.id,
            exam_id: self.exam_id,
            student_id: self.student_id,
            status: self
                .status
                .parse::<AttemptStatus>()
                .unwrap_or(AttemptStatus::InProgress),
            started_at: super::to_datetime(self.started_at),
            deadline_at: super::to_datetime(self.deadline_at),
            submitted_at: self.submitted_at.map(super::to_datetime),
            score: self.score,
            auto_submitted: self.auto_submitted,
            graded_at: self.graded_at.map(super::to_datetime),
        }
    }
}
