use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 课表时段
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/timetable.ts")]
pub struct TimetableSlot {
    pub id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    /// 1 = 周一 … 7 = 周日
    pub day_of_week: i32,
    /// HH:MM
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 带名称的课表条目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/timetable.ts")]
pub struct TimetableEntry {
    #[serde(flatten)]
    #[ts(flatten)]
    pub slot: TimetableSlot,
    pub class_name: String,
    pub subject_name: String,
    pub teacher_name: String,
}

/// 冲突类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotConflict {
    /// 同一班级同一天时间重叠
    Class(i64),
    /// 同一教师同一天时间重叠
    Teacher(i64),
}

impl SlotConflict {
    pub fn describe(&self) -> String {
        match self {
            SlotConflict::Class(id) => format!("Class already has slot {id} at this time"),
            SlotConflict::Teacher(id) => format!("Teacher is already teaching slot {id} at this time"),
        }
    }
}

/// 解析 "HH:MM"，返回自零点起的分钟数
pub fn parse_time_of_day(value: &str) -> Result<u32, String> {
    let (h, m) = value
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("Invalid time '{value}', expected HH:MM"))?;
    let hour: u32 = h
        .parse()
        .map_err(|_| format!("Invalid hour in '{value}'"))?;
    let minute: u32 = m
        .parse()
        .map_err(|_| format!("Invalid minute in '{value}'"))?;
    if hour > 23 || minute > 59 || m.len() != 2 {
        return Err(format!("Invalid time '{value}', expected HH:MM"));
    }
    Ok(hour * 60 + minute)
}

/// 统一为两位补零格式
pub fn format_time_of_day(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// 校验时段参数并返回规范化的 (start, end)
pub fn normalize_slot_times(
    day_of_week: i32,
    start: &str,
    end: &str,
) -> Result<(String, String), String> {
    if !(1..=7).contains(&day_of_week) {
        return Err("day_of_week must be between 1 (Monday) and 7 (Sunday)".to_string());
    }
    let start_min = parse_time_of_day(start)?;
    let end_min = parse_time_of_day(end)?;
    if start_min >= end_min {
        return Err("start_time must be before end_time".to_string());
    }
    Ok((format_time_of_day(start_min), format_time_of_day(end_min)))
}

/// 半开区间 [start, end) 是否重叠，首尾相接不算冲突
pub fn ranges_overlap(a: (u32, u32), b: (u32, u32)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// 在同一天已有的时段中查找与候选时段冲突者
pub fn find_conflict(candidate: &TimetableSlot, existing: &[TimetableSlot]) -> Option<SlotConflict> {
    let (Ok(cs), Ok(ce)) = (
        parse_time_of_day(&candidate.start_time),
        parse_time_of_day(&candidate.end_time),
    ) else {
        return None;
    };

    for slot in existing {
        if slot.id == candidate.id || slot.day_of_week != candidate.day_of_week {
            continue;
        }
        let (Ok(s), Ok(e)) = (
            parse_time_of_day(&slot.start_time),
            parse_time_of_day(&slot.end_time),
        ) else {
            continue;
        };
        if !ranges_overlap((cs, ce), (s, e)) {
            continue;
        }
        if slot.class_id == candidate.class_id {
            return Some(SlotConflict::Class(slot.id));
        }
        if slot.teacher_id == candidate.teacher_id {
            return Some(SlotConflict::Teacher(slot.id));
        }
    }
    None
}

/// 日期对应的 day_of_week（周一为 1）
pub fn weekday_number(date: NaiveDate) -> i32 {
    date.weekday().number_from_monday() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: i64, class_id: i64, teacher_id: i64, day: i32, start: &str, end: &str) -> TimetableSlot {
        let now = chrono::Utc::now();
        TimetableSlot {
            id,
            class_id,
            subject_id: 1,
            teacher_id,
            day_of_week: day,
            start_time: start.into(),
            end_time: end.into(),
            room: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("08:30"), Ok(510));
        assert_eq!(parse_time_of_day("8:05"), Ok(485));
        assert!(parse_time_of_day("24:00").is_err());
        assert!(parse_time_of_day("10:7").is_err());
        assert!(parse_time_of_day("noon").is_err());
    }

    #[test]
    fn test_normalize_slot_times() {
        assert_eq!(
            normalize_slot_times(1, "8:00", "8:45"),
            Ok(("08:00".to_string(), "08:45".to_string()))
        );
        assert!(normalize_slot_times(0, "08:00", "09:00").is_err());
        assert!(normalize_slot_times(8, "08:00", "09:00").is_err());
        assert!(normalize_slot_times(2, "09:00", "09:00").is_err());
        assert!(normalize_slot_times(2, "10:00", "09:00").is_err());
    }

    #[test]
    fn test_touching_slots_do_not_conflict() {
        let existing = vec![slot(1, 10, 100, 1, "08:00", "09:00")];
        let candidate = slot(0, 10, 100, 1, "09:00", "10:00");
        assert_eq!(find_conflict(&candidate, &existing), None);
    }

    #[test]
    fn test_class_and_teacher_conflicts() {
        let existing = vec![
            slot(1, 10, 100, 1, "08:00", "09:00"),
            slot(2, 11, 200, 1, "10:00", "11:00"),
        ];
        let same_class = slot(0, 10, 300, 1, "08:30", "09:30");
        assert_eq!(find_conflict(&same_class, &existing), Some(SlotConflict::Class(1)));

        let same_teacher = slot(0, 12, 200, 1, "10:15", "10:45");
        assert_eq!(find_conflict(&same_teacher, &existing), Some(SlotConflict::Teacher(2)));

        let other_day = slot(0, 10, 100, 2, "08:00", "09:00");
        assert_eq!(find_conflict(&other_day, &existing), None);
    }

    #[test]
    fn test_update_ignores_itself() {
        let existing = vec![slot(1, 10, 100, 1, "08:00", "09:00")];
        let moved = slot(1, 10, 100, 1, "08:15", "09:15");
        assert_eq!(find_conflict(&moved, &existing), None);
    }

    #[test]
    fn test_weekday_number() {
        let monday = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();
        assert_eq!(weekday_number(monday), 1);
        let sunday = NaiveDate::from_ymd_opt(2026, 9, 13).unwrap();
        assert_eq!(weekday_number(sunday), 7);
    }
}
