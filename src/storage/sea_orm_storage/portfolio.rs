//! 成长档案存储

use super::SeaOrmStorage;
use crate::entity::portfolio_entries::{ActiveModel, Column, Entity as PortfolioEntries};
use crate::errors::{EduBridgeError, Result};
use crate::models::portfolio::{
    entities::PortfolioEntry,
    requests::{CreatePortfolioRequest, PortfolioFilter, UpdatePortfolioRequest},
};
use crate::storage::PortfolioStorage;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

#[async_trait]
impl PortfolioStorage for SeaOrmStorage {
    async fn create_portfolio_entry(
        &self,
        teacher_id: i64,
        req: CreatePortfolioRequest,
    ) -> Result<PortfolioEntry> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            teacher_id: Set(teacher_id),
            title: Set(req.title.trim().to_string()),
            category: Set(req.category.to_string()),
            content: Set(req.content),
            term: Set(req.term),
            visible_to_parent: Set(req.visible_to_parent),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("创建档案条目失败: {e}")))?;

        Ok(result.into_entry())
    }

    async fn get_portfolio_entry(&self, entry_id: i64) -> Result<Option<PortfolioEntry>> {
        let result = PortfolioEntries::find_by_id(entry_id)
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询档案条目失败: {e}")))?;

        Ok(result.map(|m| m.into_entry()))
    }

    async fn update_portfolio_entry(
        &self,
        entry_id: i64,
        update: UpdatePortfolioRequest,
    ) -> Result<Option<PortfolioEntry>> {
        let Some(existing) = PortfolioEntries::find_by_id(entry_id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }

        if let Some(category) = update.category {
            model.category = Set(category.to_string());
        }

        if let Some(content) = update.content {
            model.content = Set(content);
        }

        if let Some(term) = update.term {
            model.term = Set(Some(term));
        }

        if let Some(visible) = update.visible_to_parent {
            model.visible_to_parent = Set(visible);
        }

        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("更新档案条目失败: {e}")))?;

        Ok(Some(updated.into_entry()))
    }

    async fn delete_portfolio_entry(&self, entry_id: i64) -> Result<bool> {
        let result = PortfolioEntries::delete_by_id(entry_id)
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("删除档案条目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn list_portfolio_entries(&self, filter: PortfolioFilter) -> Result<Vec<PortfolioEntry>> {
        let mut select = PortfolioEntries::find();

        if let Some(student_id) = filter.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(teacher_id) = filter.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        if let Some(category) = filter.category {
            select = select.filter(Column::Category.eq(category.to_string()));
        }

        if let Some(term) = filter.term {
            select = select.filter(Column::Term.eq(term));
        }

        if filter.parent_visible_only {
            select = select.filter(Column::VisibleToParent.eq(true));
        }

        let result = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询档案失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_entry()).collect())
    }
}
