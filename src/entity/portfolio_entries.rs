//! 成长档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "portfolio_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub term: Option<String>,
    pub visible_to_parent: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_entry(self) -> crate::models::portfolio::entities::PortfolioEntry {
        use crate::models::portfolio::entities::{PortfolioCategory, PortfolioEntry};

        PortfolioEntry {
            id: self.id,
            student_id: self.student_id,
            teacher_id: self.teacher_id,
            title: self.title,
            category: self
                .category
                .parse::<PortfolioCategory>()
                .unwrap_or(PortfolioCategory::Other),
            content: self.content,
            term: self.term,
            visible_to_parent: self.visible_to_parent,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
