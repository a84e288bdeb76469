//! 家长会预约存储

use super::SeaOrmStorage;
use crate::entity::ptm_bookings::{ActiveModel, Column, Entity as PtmBookings};
use crate::errors::{EduBridgeError, Result};
use crate::models::ptm::{
    entities::{PtmBooking, PtmStatus},
    requests::{NewPtmBooking, PtmTransition},
};
use crate::storage::PtmStorage;
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

#[async_trait]
impl PtmStorage for SeaOrmStorage {
    async fn create_ptm_booking(&self, booking: NewPtmBooking) -> Result<PtmBooking> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            parent_id: Set(booking.parent_id),
            teacher_id: Set(booking.teacher_id),
            student_id: Set(booking.student_id),
            scheduled_at: Set(booking.scheduled_at.timestamp()),
            duration_minutes: Set(booking.duration_minutes),
            agenda: Set(booking.agenda),
            status: Set(PtmStatus::Pending.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("创建家长会预约失败: {e}")))?;

        Ok(result.into_booking())
    }

    async fn get_ptm_booking(&self, booking_id: i64) -> Result<Option<PtmBooking>> {
        let result = PtmBookings::find_by_id(booking_id)
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询家长会预约失败: {e}")))?;

        Ok(result.map(|m| m.into_booking()))
    }

    async fn list_ptm_bookings(
        &self,
        parent_id: Option<i64>,
        teacher_id: Option<i64>,
        statuses: &[PtmStatus],
    ) -> Result<Vec<PtmBooking>> {
        let mut select = PtmBookings::find();

        if let Some(parent_id) = parent_id {
            select = select.filter(Column::ParentId.eq(parent_id));
        }

        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        if !statuses.is_empty() {
            select = select.filter(Column::Status.is_in(statuses.iter().map(|s| s.to_string())));
        }

        let result = select
            .order_by_asc(Column::ScheduledAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询家长会预约失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_booking()).collect())
    }

    async fn transition_ptm_booking(
        &self,
        booking_id: i64,
        expected: PtmStatus,
        transition: PtmTransition,
    ) -> Result<Option<PtmBooking>> {
        let mut update = PtmBookings::update_many()
            .col_expr(Column::Status, Expr::value(transition.status.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()));

        if let Some(scheduled_at) = transition.scheduled_at {
            update = update.col_expr(Column::ScheduledAt, Expr::value(scheduled_at.timestamp()));
        }

        if let Some(proposed_at) = transition.proposed_at {
            update = update.col_expr(
                Column::ProposedAt,
                Expr::value(proposed_at.map(|p| p.timestamp())),
            );
        }

        if let Some(note) = transition.teacher_note {
            update = update.col_expr(Column::TeacherNote, Expr::value(Some(note)));
        }

        if let Some(note) = transition.parent_note {
            update = update.col_expr(Column::ParentNote, Expr::value(Some(note)));
        }

        // 当前状态已被他人改变时不生效
        let result = update
            .filter(Column::Id.eq(booking_id))
            .filter(Column::Status.eq(expected.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("更新家长会状态失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_ptm_booking(booking_id).await
    }
}
