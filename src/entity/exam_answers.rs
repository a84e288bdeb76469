//! 考试答案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub attempt_id: i64,
    pub question_id: i64,
    #[sea_orm(column_type = "Text")]
    pub answer: String,
    pub is_correct: Option<bool>,
    pub awarded_marks: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub saved_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exam_attempts::Entity",
        from = "Column::AttemptId",
        to = "super::exam_attempts::Column::Id"
    )]
    Attempt,
}

impl Related<super::exam_attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attempt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_answer(self) -> crate::models::exams::entities::ExamAnswer {
        crate::models::exams::entities::ExamAnswer {
            id: self.id,
            attempt_id: self.attempt_id,
            question_id: self.question_id,
            answer: self.answer,
            is_correct: self.is_correct,
            awarded_marks: self.awarded_marks,
            feedback: self.feedback,
            saved_at: super::to_datetime(self.saved_at),
        }
    }
}
