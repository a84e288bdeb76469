//! 家长会预约实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ptm_bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub parent_id: i64,
    pub teacher_id: i64,
    pub student_id: i64,
    pub scheduled_at: i64,
    pub duration_minutes: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub agenda: Option<String>,
    pub status: String,
    pub proposed_at: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub teacher_note: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub parent_note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_booking(self) -> crate::models::ptm::entities::PtmBooking {
        use crate::models::ptm::entities::{PtmBooking, PtmStatus};

        PtmBooking {
            id: self.id,
            parent_id: self.parent_id,
            teacher_id: self.teacher_id,
            student_id: self.student_id,
            scheduled_at: super::to_datetime(self.scheduled_at),
            duration_minutes: self.duration_minutes,
            agenda: self.agenda,
            status: self.status.parse::<PtmStatus>().unwrap_or(PtmStatus::Pending),
            proposed_at: self.proposed_at.map(super::to_datetime),
            teacher_note: self.teacher_note,
            parent_note: self.parent_note,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
