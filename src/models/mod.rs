//! 数据模型：请求、响应、领域实体与业务错误码

pub mod announcements;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod dashboard;
pub mod events;
pub mod exams;
pub mod marks;
pub mod notifications;
pub mod portfolio;
pub mod ptm;
pub mod system;
pub mod timetable;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间，用于健康检查与启动耗时统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 1xxx 通用，2xxx 认证，3xxx 用户，4xxx 班级/科目/课表，5xxx 作业，
/// 6xxx 考试，7xxx 考勤/成绩/档案，8xxx 家长会，9xxx 通知/活动/设置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    Conflict = 1004,
    RateLimitExceeded = 1005,
    InternalServerError = 1006,

    AuthFailed = 2000,
    AccountDisabled = 2001,
    TokenInvalid = 2002,
    RefreshTokenMissing = 2003,
    PasswordPolicyViolation = 2004,
    CurrentPasswordIncorrect = 2005,

    UserNotFound = 3000,
    UserNameInvalid = 3001,
    UserNameAlreadyExists = 3002,
    UserEmailInvalid = 3003,
    UserEmailAlreadyExists = 3004,
    UserRoleMismatch = 3005,
    CanNotDeleteCurrentUser = 3006,
    ParentLinkAlreadyExists = 3007,
    ParentLinkNotFound = 3008,
    AdmissionNoAlreadyExists = 3009,
    StudentProfileNotFound = 3010,

    ClassNotFound = 4000,
    ClassAlreadyExists = 4001,
    SubjectNotFound = 4002,
    SubjectCodeAlreadyExists = 4003,
    TimetableSlotNotFound = 4004,
    TimetableConflict = 4005,
    TimetableInvalidTime = 4006,
    NotTeachingClass = 4007,

    AssignmentNotFound = 5000,
    SubmissionNotFound = 5001,
    SubmissionClosed = 5002,
    SubmissionAlreadyGraded = 5003,
    SubmissionEmpty = 5004,
    MarksOutOfRange = 5005,
    SubmissionConflict = 5006,

    ExamNotFound = 6000,
    ExamNotEditable = 6001,
    ExamNotAvailable = 6002,
    ExamQuestionNotFound = 6003,
    ExamQuestionInvalid = 6004,
    ExamNoQuestions = 6005,
    ExamAttemptNotFound = 6006,
    ExamAttemptClosed = 6007,
    ExamAttemptFinished = 6008,

    AttendanceInvalidDate = 7000,
    AttendanceStudentNotInClass = 7001,
    TermMarkInvalid = 7002,
    PortfolioNotFound = 7003,
    StudentNotAccessible = 7004,

    PtmNotFound = 8000,
    PtmInvalidTransition = 8001,
    PtmSlotConflict = 8002,
    PtmInvalidTime = 8003,

    NotificationNotFound = 9000,
    EventNotFound = 9001,
    AnnouncementNotFound = 9002,
    SettingNotFound = 9003,
    SettingInvalidValue = 9004,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_groups() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::AuthFailed as i32 / 1000, 2);
        assert_eq!(ErrorCode::TimetableConflict as i32 / 1000, 4);
        assert_eq!(ErrorCode::ExamAttemptClosed as i32 / 1000, 6);
        assert_eq!(ErrorCode::PtmInvalidTransition as i32 / 1000, 8);
        assert_eq!(ErrorCode::SettingInvalidValue as i32 / 1000, 9);
    }
}
