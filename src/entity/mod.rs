//! SeaORM 实体定义
//!
//! 与 models 中的业务实体分离：时间戳以 Unix 秒存储，枚举以字符串存储，
//! 由各实体的 `into_*` 方法转换为业务实体。

pub mod prelude;

pub mod announcements;
pub mod assignments;
pub mod attendance_records;
pub mod classes;
pub mod events;
pub mod exam_answers;
pub mod exam_attempts;
pub mod exam_questions;
pub mod exams;
pub mod notifications;
pub mod parent_students;
pub mod portfolio_entries;
pub mod ptm_bookings;
pub mod student_profiles;
pub mod subjects;
pub mod submissions;
pub mod system_settings;
pub mod system_settings_audit;
pub mod term_marks;
pub mod timetable_slots;
pub mod users;

use chrono::{DateTime, Utc};

/// Unix 秒转 UTC 时间，非法值回退为纪元时间
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
