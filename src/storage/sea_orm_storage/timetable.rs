//! 课表存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::prelude::{Classes, Subjects, Users};
use crate::entity::timetable_slots::{ActiveModel, Column, Entity as TimetableSlots, Model};
use crate::entity::{classes, subjects, users};
use crate::errors::{EduBridgeError, Result};
use crate::models::timetable::{
    entities::{TimetableEntry, TimetableSlot},
    requests::{SlotRequest, TimetableQuery},
};
use crate::storage::TimetableStorage;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 为时段补全班级、科目、教师名称
    async fn timetable_entries(&self, slots: Vec<Model>) -> Result<Vec<TimetableEntry>> {
        if slots.is_empty() {
            return Ok(Vec::new());
        }

        let class_names: HashMap<i64, String> = Classes::find()
            .filter(classes::Column::Id.is_in(slots.iter().map(|s| s.class_id)))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| {
                let class = c.into_class();
                (class.id, class.label())
            })
            .collect();

        let subject_names: HashMap<i64, String> = Subjects::find()
            .filter(subjects::Column::Id.is_in(slots.iter().map(|s| s.subject_id)))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        let teacher_names: HashMap<i64, String> = Users::find()
            .filter(users::Column::Id.is_in(slots.iter().map(|s| s.teacher_id)))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| {
                let user = u.into_user();
                (user.id, user.name().to_string())
            })
            .collect();

        Ok(slots
            .into_iter()
            .map(|m| {
                let slot = m.into_slot();
                TimetableEntry {
                    class_name: class_names.get(&slot.class_id).cloned().unwrap_or_default(),
                    subject_name: subject_names
                        .get(&slot.subject_id)
                        .cloned()
                        .unwrap_or_default(),
                    teacher_name: teacher_names
                        .get(&slot.teacher_id)
                        .cloned()
                        .unwrap_or_default(),
                    slot,
                }
            })
            .collect())
    }
}

#[async_trait]
impl TimetableStorage for SeaOrmStorage {
    async fn create_slot(&self, req: SlotRequest) -> Result<TimetableSlot> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(req.class_id),
            subject_id: Set(req.subject_id),
            teacher_id: Set(req.teacher_id),
            day_of_week: Set(req.day_of_week),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            room: Set(req.room),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("创建课表时段失败: {e}")))?;

        Ok(result.into_slot())
    }

    async fn get_slot_by_id(&self, slot_id: i64) -> Result<Option<TimetableSlot>> {
        let result = TimetableSlots::find_by_id(slot_id)
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询课表时段失败: {e}")))?;

        Ok(result.map(|m| m.into_slot()))
    }

    async fn update_slot(&self, slot_id: i64, req: SlotRequest) -> Result<Option<TimetableSlot>> {
        let Some(existing) = TimetableSlots::find_by_id(slot_id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.class_id = Set(req.class_id);
        model.subject_id = Set(req.subject_id);
        model.teacher_id = Set(req.teacher_id);
        model.day_of_week = Set(req.day_of_week);
        model.start_time = Set(req.start_time);
        model.end_time = Set(req.end_time);
        model.room = Set(req.room);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("更新课表时段失败: {e}")))?;

        Ok(Some(updated.into_slot()))
    }

    async fn delete_slot(&self, slot_id: i64) -> Result<bool> {
        let result = TimetableSlots::delete_by_id(slot_id)
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("删除课表时段失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn list_day_slots(
        &self,
        day_of_week: i32,
        class_id: i64,
        teacher_id: i64,
    ) -> Result<Vec<TimetableSlot>> {
        let result = TimetableSlots::find()
            .filter(Column::DayOfWeek.eq(day_of_week))
            .filter(
                Condition::any()
                    .add(Column::ClassId.eq(class_id))
                    .add(Column::TeacherId.eq(teacher_id)),
            )
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询课表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_slot()).collect())
    }

    async fn list_timetable(&self, query: TimetableQuery) -> Result<Vec<TimetableEntry>> {
        let mut select = TimetableSlots::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        if let Some(day) = query.day_of_week {
            select = select.filter(Column::DayOfWeek.eq(day));
        }

        // HH:MM 定长，按字符串排序即按时间排序
        let slots = select
            .order_by_asc(Column::DayOfWeek)
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询课表失败: {e}")))?;

        self.timetable_entries(slots).await
    }

    async fn get_timetable_entry(&self, slot_id: i64) -> Result<Option<TimetableEntry>> {
        let Some(slot) = TimetableSlots::find_by_id(slot_id).one(&self.db).await? else {
            return Ok(None);
        };

        Ok(self.timetable_entries(vec![slot]).await?.into_iter().next())
    }
}
