use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;

/// 点名名单查询
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct RosterQuery {
    pub slot_id: i64,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceEntryInput {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

/// 按时段整体点名（覆盖已有记录）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceRequest {
    pub slot_id: i64,
    pub date: String,
    pub entries: Vec<AttendanceEntryInput>,
}

/// 日期区间（含首尾），均可省略
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct ClassAttendanceQuery {
    pub class_id: i64,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// 存储层写入的一条考勤
#[derive(Debug, Clone)]
pub struct AttendanceUpsert {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}
