//! 考勤存储操作

use chrono::NaiveDate;

use super::{SeaOrmStorage, date_key};
use crate::entity::attendance_records::{ActiveModel, Column, Entity as AttendanceRecords};
use crate::errors::{EduBridgeError, Result};
use crate::models::{
    attendance::{entities::AttendanceRecord, requests::AttendanceUpsert},
    timetable::entities::TimetableSlot,
};
use crate::storage::AttendanceStorage;
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Select, Set};

/// 日期区间（含首尾）筛选，YYYY-MM-DD 可直接按字符串比较
fn within_range(
    mut select: Select<AttendanceRecords>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Select<AttendanceRecords> {
    if let Some(from) = from {
        select = select.filter(Column::Date.gte(date_key(from)));
    }
    if let Some(to) = to {
        select = select.filter(Column::Date.lte(date_key(to)));
    }
    select
}

#[async_trait]
impl AttendanceStorage for SeaOrmStorage {
    async fn upsert_attendance(
        &self,
        slot: &TimetableSlot,
        date: NaiveDate,
        entries: Vec<AttendanceUpsert>,
        marked_by: i64,
    ) -> Result<Vec<AttendanceRecord>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let now = chrono::Utc::now().timestamp();
        let day = date_key(date);
        let student_ids: Vec<i64> = entries.iter().map(|e| e.student_id).collect();

        let models = entries.into_iter().map(|e| ActiveModel {
            student_id: Set(e.student_id),
            slot_id: Set(slot.id),
            class_id: Set(slot.class_id),
            date: Set(day.clone()),
            status: Set(e.status.to_string()),
            remarks: Set(e.remarks),
            marked_by: Set(marked_by),
            marked_at: Set(now),
            ..Default::default()
        });

        AttendanceRecords::insert_many(models)
            .on_conflict(
                OnConflict::columns([Column::StudentId, Column::SlotId, Column::Date])
                    .update_columns([
                        Column::Status,
                        Column::Remarks,
                        Column::MarkedBy,
                        Column::MarkedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("保存考勤失败: {e}")))?;

        let records = AttendanceRecords::find()
            .filter(Column::SlotId.eq(slot.id))
            .filter(Column::Date.eq(day))
            .filter(Column::StudentId.is_in(student_ids))
            .all(&self.db)
            .await?;

        Ok(records.into_iter().map(|m| m.into_record()).collect())
    }

    async fn list_slot_attendance(
        &self,
        slot_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        let result = AttendanceRecords::find()
            .filter(Column::SlotId.eq(slot_id))
            .filter(Column::Date.eq(date_key(date)))
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_record()).collect())
    }

    async fn list_student_attendance(
        &self,
        student_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>> {
        let select = AttendanceRecords::find().filter(Column::StudentId.eq(student_id));

        let result = within_range(select, from, to)
            .order_by_desc(Column::Date)
            .order_by_asc(Column::SlotId)
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询学生考勤失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_record()).collect())
    }

    async fn list_class_attendance(
        &self,
        class_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>> {
        let select = AttendanceRecords::find().filter(Column::ClassId.eq(class_id));

        let result = within_range(select, from, to)
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询班级考勤失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_record()).collect())
    }

    async fn list_attendance_on(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        let result = AttendanceRecords::find()
            .filter(Column::Date.eq(date_key(date)))
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询当日考勤失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_record()).collect())
    }
}
