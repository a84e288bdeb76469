use super::entities::TimetableEntry;
use serde::Serialize;
use ts_rs::TS;

/// 按星期、开始时间排序
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/timetable.ts")]
pub struct TimetableResponse {
    pub items: Vec<TimetableEntry>,
}
