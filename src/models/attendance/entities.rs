use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::timetable::entities::weekday_number;
use crate::string_enum;

string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
    pub enum AttendanceStatus {
        Present => "present",
        Absent => "absent",
        Late => "late",
        Excused => "excused",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub slot_id: i64,
    pub class_id: i64,
    /// YYYY-MM-DD
    pub date: String,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub marked_by: i64,
    pub marked_at: chrono::DateTime<chrono::Utc>,
}

/// 出勤统计；出勤率 = (出勤 + 迟到) / 总数，无记录时为 100
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSummary {
    pub total: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub excused: i64,
    pub percentage: f64,
}

impl AttendanceSummary {
    pub fn from_statuses<I: IntoIterator<Item = AttendanceStatus>>(statuses: I) -> Self {
        let mut summary = Self::default();
        for status in statuses {
            summary.total += 1;
            match status {
                AttendanceStatus::Present => summary.present += 1,
                AttendanceStatus::Absent => summary.absent += 1,
                AttendanceStatus::Late => summary.late += 1,
                AttendanceStatus::Excused => summary.excused += 1,
            }
        }
        summary.percentage = attendance_percentage(summary.present + summary.late, summary.total);
        summary
    }

    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        Self::from_statuses(records.iter().map(|r| r.status))
    }

    pub fn below(&self, threshold: f64) -> bool {
        self.percentage < threshold
    }
}

/// 百分比保留两位小数
pub fn attendance_percentage(attended: i64, total: i64) -> f64 {
    if total <= 0 {
        return 100.0;
    }
    let pct = attended as f64 * 100.0 / total as f64;
    (pct * 100.0).round() / 100.0
}

/// 点名日期不合法的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceDateError {
    Malformed(String),
    InFuture,
    WrongWeekday { expected: i32, actual: i32 },
}

impl std::fmt::Display for AttendanceDateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceDateError::Malformed(v) => write!(f, "Invalid date '{v}', expected YYYY-MM-DD"),
            AttendanceDateError::InFuture => write!(f, "Attendance cannot be marked for a future date"),
            AttendanceDateError::WrongWeekday { expected, actual } => write!(
                f,
                "Slot is held on day {expected} but the date falls on day {actual}"
            ),
        }
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, AttendanceDateError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AttendanceDateError::Malformed(value.to_string()))
}

/// 校验点名日期：格式正确、不晚于今天、星期与时段一致
pub fn validate_attendance_date(
    value: &str,
    slot_day_of_week: i32,
    today: NaiveDate,
) -> Result<NaiveDate, AttendanceDateError> {
    let date = parse_date(value)?;
    if date > today {
        return Err(AttendanceDateError::InFuture);
    }
    let actual = weekday_number(date);
    if actual != slot_day_of_week {
        return Err(AttendanceDateError::WrongWeekday {
            expected: slot_day_of_week,
            actual,
        });
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary_is_full_attendance() {
        let s = AttendanceSummary::from_statuses(Vec::new());
        assert_eq!(s.total, 0);
        assert_eq!(s.percentage, 100.0);
        assert!(!s.below(75.0));
    }

    #[test]
    fn test_late_counts_as_attended() {
        use AttendanceStatus::*;
        let s = AttendanceSummary::from_statuses(vec![Present, Late, Absent, Excused]);
        assert_eq!((s.present, s.late, s.absent, s.excused), (1, 1, 1, 1));
        assert_eq!(s.percentage, 50.0);
        assert!(s.below(75.0));
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(attendance_percentage(2, 3), 66.67);
        assert_eq!(attendance_percentage(0, 4), 0.0);
    }

    #[test]
    fn test_validate_attendance_date() {
        // 2026-09-07 是周一
        let today = NaiveDate::from_ymd_opt(2026, 9, 10).unwrap();
        assert_eq!(
            validate_attendance_date("2026-09-07", 1, today),
            Ok(NaiveDate::from_ymd_opt(2026, 9, 7).unwrap())
        );
        assert_eq!(
            validate_attendance_date("2026-09-08", 1, today),
            Err(AttendanceDateError::WrongWeekday { expected: 1, actual: 2 })
        );
        assert_eq!(
            validate_attendance_date("2026-09-14", 1, today),
            Err(AttendanceDateError::InFuture)
        );
        assert!(matches!(
            validate_attendance_date("07/09/2026", 1, today),
            Err(AttendanceDateError::Malformed(_))
        ));
    }
}
