use serde::Serialize;
use ts_rs::TS;

use crate::models::assignments::responses::StudentAssignmentView;
use crate::models::attendance::entities::AttendanceSummary;
use crate::models::events::entities::Event;
use crate::models::exams::entities::Exam;
use crate::models::ptm::responses::PtmBookingView;
use crate::models::timetable::entities::TimetableEntry;
use crate::models::users::entities::StudentSummary;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct AdminDashboard {
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_parents: i64,
    pub total_classes: i64,
    /// 今日已点名记录的出勤率
    pub today_attendance: AttendanceSummary,
    pub upcoming_events: Vec<Event>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct TeacherDashboard {
    pub today_slots: Vec<TimetableEntry>,
    /// 待批改的作业提交数
    pub pending_submissions: i64,
    pub upcoming_exams: Vec<Exam>,
    pub pending_ptm: Vec<PtmBookingView>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentDashboard {
    pub today_slots: Vec<TimetableEntry>,
    /// 未提交且未过期的作业
    pub due_assignments: Vec<StudentAssignmentView>,
    pub upcoming_exams: Vec<Exam>,
    pub attendance: AttendanceSummary,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct ChildOverview {
    pub student: StudentSummary,
    pub attendance: AttendanceSummary,
    pub below_threshold: bool,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct ParentDashboard {
    pub children: Vec<ChildOverview>,
    /// 待处理（待审批或待确认改期）的家长会
    pub pending_ptm: Vec<PtmBookingView>,
}
