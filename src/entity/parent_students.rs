//! 家长-学生关联实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parent_students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub parent_id: i64,
    pub student_id: i64,
    pub relationship: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_link(self) -> crate::models::users::entities::ParentLink {
        crate::models::users::entities::ParentLink {
            parent_id: self.parent_id,
            student_id: self.student_id,
            relationship: self.relationship,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
