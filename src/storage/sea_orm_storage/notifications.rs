//! 通知存储操作

use super::{SeaOrmStorage, page_bounds};
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{EduBridgeError, Result};
use crate::models::notifications::{
    requests::NewNotification, responses::NotificationListResponse,
};
use crate::storage::NotificationStorage;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

#[async_trait]
impl NotificationStorage for SeaOrmStorage {
    async fn create_notifications(
        &self,
        user_ids: &[i64],
        notification: NewNotification,
    ) -> Result<usize> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();
        let kind = notification.notification_type.to_string();

        let models = user_ids.iter().map(|&user_id| ActiveModel {
            user_id: Set(user_id),
            notification_type: Set(kind.clone()),
            title: Set(notification.title.clone()),
            content: Set(notification.content.clone()),
            reference_type: Set(notification.reference_type.clone()),
            reference_id: Set(notification.reference_id),
            is_read: Set(false),
            created_at: Set(now),
            ..Default::default()
        });

        Notifications::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("批量创建通知失败: {e}")))?;

        Ok(user_ids.len())
    }

    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        page: Option<i64>,
        size: Option<i64>,
        unread_only: bool,
    ) -> Result<NotificationListResponse> {
        let (page, size) = page_bounds(page, size);

        let mut select = Notifications::find().filter(Column::UserId.eq(user_id));

        // 未读筛选
        if unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let (notifications, pagination) = self.fetch_page(select, page, size).await?;

        Ok(NotificationListResponse {
            items: notifications
                .into_iter()
                .map(|m| m.into_notification())
                .collect(),
            pagination,
        })
    }

    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64> {
        let count = Notifications::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| {
                EduBridgeError::database_operation(format!("查询未读通知数量失败: {e}"))
            })?;

        Ok(count as i64)
    }

    async fn mark_notification_as_read(&self, notification_id: i64, user_id: i64) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::Id.eq(notification_id))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("标记通知已读失败: {e}")))?;

        if result.rows_affected > 0 {
            return Ok(true);
        }

        // 已读的通知再次标记也算成功，只有不存在或不属于该用户时返回 false
        let owned = Notifications::find()
            .filter(Column::Id.eq(notification_id))
            .filter(Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询通知失败: {e}")))?;

        Ok(owned > 0)
    }

    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| {
                EduBridgeError::database_operation(format!("标记全部通知已读失败: {e}"))
            })?;

        Ok(result.rows_affected as i64)
    }

    async fn delete_notification(&self, notification_id: i64, user_id: i64) -> Result<bool> {
        let result = Notifications::delete_many()
            .filter(Column::Id.eq(notification_id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("删除通知失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
