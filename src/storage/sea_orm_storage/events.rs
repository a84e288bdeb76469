//! 校园活动存储

use super::{SeaOrmStorage, page_bounds};
use crate::entity::events::{ActiveModel, Column, Entity as Events};
use crate::errors::{EduBridgeError, Result};
use crate::models::{
    announcements::{
        entities::Announcement,
        requests::{AnnouncementListQuery, CreateAnnouncementRequest, UpdateAnnouncementRequest},
        responses::AnnouncementListResponse,
    },
    events::{
        entities::Event,
        requests::{CreateEventRequest, EventListQuery, UpdateEventRequest},
        responses::EventListResponse,
    },
    users::entities::UserRole,
};
use crate::storage::BulletinStorage;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

#[async_trait]
impl BulletinStorage for SeaOrmStorage {
    async fn create_event(&self, created_by: i64, req: CreateEventRequest) -> Result<Event> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            location: Set(req.location),
            start_at: Set(req.start_at.timestamp()),
            end_at: Set(req.end_at.map(|t| t.timestamp())),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("创建活动失败: {e}")))?;

        Ok(result.into_event())
    }

    async fn get_event_by_id(&self, event_id: i64) -> Result<Option<Event>> {
        let result = Events::find_by_id(event_id)
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询活动失败: {e}")))?;

        Ok(result.map(|m| m.into_event()))
    }

    async fn update_event(&self, event_id: i64, update: UpdateEventRequest) -> Result<Option<Event>> {
        let Some(existing) = Events::find_by_id(event_id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(location) = update.location {
            model.location = Set(Some(location));
        }

        if let Some(start_at) = update.start_at {
            model.start_at = Set(start_at.timestamp());
        }

        if let Some(end_at) = update.end_at {
            model.end_at = Set(Some(end_at.timestamp()));
        }

        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("更新活动失败: {e}")))?;

        Ok(Some(updated.into_event()))
    }

    async fn delete_event(&self, event_id: i64) -> Result<bool> {
        let result = Events::delete_by_id(event_id)
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("删除活动失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn list_events_with_pagination(&self, query: EventListQuery) -> Result<EventListResponse> {
        let (page, size) = page_bounds(query.page, query.size);

        // 缺省从当前时间起，只列出尚未结束的活动
        let from = query.from.unwrap_or_else(chrono::Utc::now).timestamp();
        let mut select = Events::find().filter(
            Condition::any()
                .add(Column::EndAt.gte(from))
                .add(
                    Condition::all()
                        .add(Column::EndAt.is_null())
                        .add(Column::StartAt.gte(from)),
                ),
        );

        if let Some(to) = query.to {
            select = select.filter(Column::StartAt.lte(to.timestamp()));
        }

        select = select.order_by_asc(Column::StartAt).order_by_asc(Column::Id);

        let (events, pagination) = self.fetch_page(select, page, size).await?;

        Ok(EventListResponse {
            items: events.into_iter().map(|m| m.into_event()).collect(),
            pagination,
        })
    }

    async fn create_announcement(
        &self,
        created_by: i64,
        req: CreateAnnouncementRequest,
    ) -> Result<Announcement> {
        self.create_announcement_impl(created_by, req).await
    }

    async fn get_announcement_by_id(&self, announcement_id: i64) -> Result<Option<Announcement>> {
        self.get_announcement_by_id_impl(announcement_id).await
    }

    async fn update_announcement(
        &self,
        announcement_id: i64,
        update: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>> {
        self.update_announcement_impl(announcement_id, update).await
    }

    async fn delete_announcement(&self, announcement_id: i64) -> Result<bool> {
        self.delete_announcement_impl(announcement_id).await
    }

    async fn list_announcements_with_pagination(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<AnnouncementListResponse> {
        self.list_announcements_with_pagination_impl(query).await
    }

    async fn list_active_user_ids(&self, roles: &[UserRole]) -> Result<Vec<i64>> {
        self.list_active_user_ids_impl(roles).await
    }
}
