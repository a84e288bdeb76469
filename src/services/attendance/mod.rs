//! 考勤：教师按课表时段点名，学生、家长、管理员查看统计

pub mod mark;
pub mod report;
pub mod roster;
pub mod student;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;

use crate::models::ErrorCode;
use crate::models::attendance::{
    entities::{parse_date, validate_attendance_date},
    requests::{AttendanceRangeQuery, ClassAttendanceQuery, MarkAttendanceRequest, RosterQuery},
};
use crate::models::timetable::entities::TimetableSlot;
use crate::services::{OrInternal, bad_request, forbidden, not_found, today};
use crate::storage::Storage;

lazy_service!(AttendanceService);

impl AttendanceService {
    pub async fn get_roster(
        &self,
        query: RosterQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        roster::get_roster(self, query, request).await
    }

    pub async fn mark_attendance(
        &self,
        attendance: MarkAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        mark::mark_attendance(self, attendance, request).await
    }

    pub async fn my_attendance(
        &self,
        query: AttendanceRangeQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student::my_attendance(self, query, request).await
    }

    pub async fn child_attendance(
        &self,
        student_id: i64,
        query: AttendanceRangeQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student::child_attendance(self, student_id, query, request).await
    }

    pub async fn class_report(
        &self,
        query: ClassAttendanceQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report::class_report(self, query, request).await
    }
}

/// 教师本人的课表时段，日期需与时段星期一致且不晚于今天
async fn teacher_slot(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
    slot_id: i64,
    date: &str,
) -> Result<(TimetableSlot, NaiveDate), HttpResponse> {
    let slot = storage
        .get_slot_by_id(slot_id)
        .await
        .or_internal("Failed to get timetable slot")?
        .ok_or_else(|| not_found(ErrorCode::TimetableSlotNotFound, "Timetable slot not found"))?;

    if slot.teacher_id != teacher_id {
        return Err(forbidden(
            ErrorCode::NotTeachingClass,
            "This timetable slot is not yours",
        ));
    }

    let date = validate_attendance_date(date, slot.day_of_week, today())
        .map_err(|e| bad_request(ErrorCode::AttendanceInvalidDate, e.to_string()))?;

    Ok((slot, date))
}

/// 解析日期区间，两端均可省略
fn parse_range(
    from: Option<&str>,
    to: Option<&str>,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), HttpResponse> {
    let parse = |value: Option<&str>| {
        value
            .filter(|v| !v.trim().is_empty())
            .map(parse_date)
            .transpose()
            .map_err(|e| bad_request(ErrorCode::AttendanceInvalidDate, e.to_string()))
    };

    let (from, to) = (parse(from)?, parse(to)?);
    if let (Some(f), Some(t)) = (from, to)
        && f > t
    {
        return Err(bad_request(
            ErrorCode::AttendanceInvalidDate,
            "'from' must not be after 'to'",
        ));
    }

    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range(None, None).unwrap(), (None, None));
        assert_eq!(parse_range(Some(""), None).unwrap(), (None, None));

        let (from, to) = parse_range(Some("2026-09-01"), Some("2026-09-30")).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2026, 9, 1));
        assert_eq!(to, NaiveDate::from_ymd_opt(2026, 9, 30));

        assert!(parse_range(Some("2026-09-30"), Some("2026-09-01")).is_err());
        assert!(parse_range(Some("yesterday"), None).is_err());
    }
}
