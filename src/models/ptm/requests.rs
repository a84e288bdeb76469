use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::PtmStatus;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ptm.ts")]
pub struct CreatePtmRequest {
    pub teacher_id: i64,
    pub student_id: i64,
    pub scheduled_at: DateTime<Utc>,
    /// 缺省使用 school.ptm_default_duration
    pub duration_minutes: Option<i32>,
    pub agenda: Option<String>,
}

/// 批准/拒绝/完成/接受/拒绝改期/取消时附带的备注
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ptm.ts")]
pub struct PtmNoteRequest {
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ptm.ts")]
pub struct RescheduleRequest {
    pub proposed_at: DateTime<Utc>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ptm.ts")]
pub struct PtmListParams {
    pub status: Option<PtmStatus>,
}

/// 存储层写入
#[derive(Debug, Clone)]
pub struct NewPtmBooking {
    pub parent_id: i64,
    pub teacher_id: i64,
    pub student_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub agenda: Option<String>,
}

/// 存储层状态变更
#[derive(Debug, Clone)]
pub struct PtmTransition {
    pub status: PtmStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Some(None) 清空提议时间
    pub proposed_at: Option<Option<DateTime<Utc>>>,
    pub teacher_note: Option<String>,
    pub parent_note: Option<String>,
}
