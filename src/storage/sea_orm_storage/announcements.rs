//! 公告存储

use super::{SeaOrmStorage, page_bounds};
use crate::entity::announcements::{ActiveModel, Column, Entity as Announcements};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{EduBridgeError, Result};
use crate::models::{
    announcements::{
        entities::Announcement,
        requests::{AnnouncementListQuery, CreateAnnouncementRequest, UpdateAnnouncementRequest},
        responses::AnnouncementListResponse,
    },
    users::entities::{UserRole, UserStatus},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

impl SeaOrmStorage {
    pub(crate) async fn create_announcement_impl(
        &self,
        created_by: i64,
        req: CreateAnnouncementRequest,
    ) -> Result<Announcement> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title.trim().to_string()),
            content: Set(req.content),
            audience: Set(req.audience.to_string()),
            class_id: Set(req.class_id),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("创建公告失败: {e}")))?;

        Ok(result.into_announcement())
    }

    pub(crate) async fn get_announcement_by_id_impl(
        &self,
        announcement_id: i64,
    ) -> Result<Option<Announcement>> {
        let result = Announcements::find_by_id(announcement_id)
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询公告失败: {e}")))?;

        Ok(result.map(|m| m.into_announcement()))
    }

    pub(crate) async fn update_announcement_impl(
        &self,
        announcement_id: i64,
        update: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>> {
        let Some(existing) = Announcements::find_by_id(announcement_id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }

        if let Some(content) = update.content {
            model.content = Set(content);
        }

        if let Some(audience) = update.audience {
            model.audience = Set(audience.to_string());
        }

        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("更新公告失败: {e}")))?;

        Ok(Some(updated.into_announcement()))
    }

    pub(crate) async fn delete_announcement_impl(&self, announcement_id: i64) -> Result<bool> {
        let result = Announcements::delete_by_id(announcement_id)
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("删除公告失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 可见性：受众匹配且（全校公告或班级在可见范围内），本人发布的始终可见
    pub(crate) async fn list_announcements_with_pagination_impl(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<AnnouncementListResponse> {
        let (page, size) = page_bounds(query.page, query.size);

        let mut select = Announcements::find();

        if let Some(audiences) = query.audiences {
            let matching = Condition::all()
                .add(Column::Audience.is_in(audiences.iter().map(|a| a.to_string())))
                .add(
                    Condition::any()
                        .add(Column::ClassId.is_null())
                        .add(Column::ClassId.is_in(query.class_ids.iter().copied())),
                );

            let mut visible = Condition::any().add(matching);
            if let Some(author) = query.created_by {
                visible = visible.add(Column::CreatedBy.eq(author));
            }
            select = select.filter(visible);
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let (items, pagination) = self.fetch_page(select, page, size).await?;

        Ok(AnnouncementListResponse {
            items: items.into_iter().map(|m| m.into_announcement()).collect(),
            pagination,
        })
    }

    pub(crate) async fn list_active_user_ids_impl(&self, roles: &[UserRole]) -> Result<Vec<i64>> {
        if roles.is_empty() {
            return Ok(Vec::new());
        }

        let ids = Users::find()
            .select_only()
            .column(UserColumn::Id)
            .filter(UserColumn::Role.is_in(roles.iter().map(|r| r.to_string())))
            .filter(UserColumn::Status.eq(UserStatus::Active.to_string()))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(ids)
    }
}
