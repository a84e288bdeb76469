use serde::Serialize;
use ts_rs::TS;

use super::entities::{AttendanceRecord, AttendanceStatus, AttendanceSummary};
use crate::models::timetable::entities::TimetableEntry;
use crate::models::users::entities::StudentSummary;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct RosterEntry {
    pub student: StudentSummary,
    /// 尚未点名时为空
    pub status: Option<AttendanceStatus>,
    pub remarks: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct RosterResponse {
    pub slot: TimetableEntry,
    pub date: String,
    pub entries: Vec<RosterEntry>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceResponse {
    pub saved: usize,
    pub summary: AttendanceSummary,
}

/// 学生/家长查看的个人考勤
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct StudentAttendanceResponse {
    pub summary: AttendanceSummary,
    pub below_threshold: bool,
    pub threshold: f64,
    pub records: Vec<AttendanceRecord>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct StudentAttendanceRow {
    pub student: StudentSummary,
    pub summary: AttendanceSummary,
    pub flagged: bool,
}

/// 管理员按班级查看的出勤报表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct ClassAttendanceReport {
    pub class_id: i64,
    pub from: Option<String>,
    pub to: Option<String>,
    pub threshold: f64,
    pub overall: AttendanceSummary,
    pub students: Vec<StudentAttendanceRow>,
}
