use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    PaginationInfo,
    announcements::{
        entities::Announcement,
        requests::{AnnouncementListQuery, CreateAnnouncementRequest, UpdateAnnouncementRequest},
        responses::AnnouncementListResponse,
    },
    assignments::{
        entities::{Assignment, Submission},
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    attendance::{entities::AttendanceRecord, requests::AttendanceUpsert},
    classes::{
        entities::{Class, Subject},
        requests::{
            ClassListQuery, CreateClassRequest, CreateSubjectRequest, UpdateClassRequest,
            UpdateSubjectRequest,
        },
        responses::{ClassListResponse, SubjectListResponse},
    },
    events::{
        entities::Event,
        requests::{CreateEventRequest, EventListQuery, UpdateEventRequest},
        responses::EventListResponse,
    },
    exams::{
        entities::{AnswerGrade, AttemptStatus, Exam, ExamAnswer, ExamAttempt, ExamQuestion},
        requests::{AnswerGradeInput, AnswerInput, ExamListQuery, NewExam, NewQuestion, UpdateExamRequest},
    },
    marks::{
        entities::TermMark,
        requests::{TermMarkQuery, TermMarkUpsert},
    },
    notifications::{requests::NewNotification, responses::NotificationListResponse},
    portfolio::{
        entities::PortfolioEntry,
        requests::{CreatePortfolioRequest, PortfolioFilter, UpdatePortfolioRequest},
    },
    ptm::{
        entities::{PtmBooking, PtmStatus},
        requests::{NewPtmBooking, PtmTransition},
    },
    system::{
        entities::SystemSetting, requests::SettingAuditQuery, responses::SettingAuditListResponse,
    },
    timetable::{
        entities::{TimetableEntry, TimetableSlot},
        requests::{SlotRequest, TimetableQuery},
    },
    users::{
        entities::{ParentLink, StudentProfile, StudentSummary, User, UserRole},
        requests::{NewUser, StudentProfileInput, UserChanges, UserListQuery},
        responses::{ChildInfo, TeacherBrief, UserListResponse},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

pub use sea_orm_storage::SeaOrmStorage;

#[async_trait::async_trait]
pub trait UserStorage: Send + Sync {
    // 创建用户
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 批量获取用户（用于补全姓名）
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量，role 为 None 时统计全部
    async fn count_users(&self, role: Option<UserRole>) -> Result<i64>;
}

/// 学籍与家长关联
#[async_trait::async_trait]
pub trait StudentStorage: Send + Sync {
    // 创建或整体替换学籍
    async fn upsert_student_profile(
        &self,
        user_id: i64,
        input: StudentProfileInput,
    ) -> Result<StudentProfile>;
    async fn get_student_profile(&self, user_id: i64) -> Result<Option<StudentProfile>>;
    // 学生摘要（含班级名称）
    async fn get_student_summary(&self, user_id: i64) -> Result<Option<StudentSummary>>;
    // 班级名单，按学号排序
    async fn list_class_students(&self, class_id: i64) -> Result<Vec<StudentSummary>>;
    async fn link_parent(
        &self,
        parent_id: i64,
        student_id: i64,
        relationship: &str,
    ) -> Result<ParentLink>;
    async fn unlink_parent(&self, parent_id: i64, student_id: i64) -> Result<bool>;
    async fn list_children(&self, parent_id: i64) -> Result<Vec<ChildInfo>>;
    async fn is_parent_of(&self, parent_id: i64, student_id: i64) -> Result<bool>;
    // 学生的全部家长 ID
    async fn list_parent_ids(&self, student_id: i64) -> Result<Vec<i64>>;
}

#[async_trait::async_trait]
pub trait ClassStorage: Send + Sync {
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    async fn list_classes_with_pagination(&self, query: ClassListQuery)
    -> Result<ClassListResponse>;
    async fn update_class(&self, class_id: i64, update: UpdateClassRequest)
    -> Result<Option<Class>>;
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    async fn count_classes(&self) -> Result<i64>;
    // 教师任课（课表中有时段）或担任班主任的班级
    async fn list_teacher_classes(&self, teacher_id: i64) -> Result<Vec<Class>>;
    // 教师是否教授该班级；subject_id 给定时还须教授该科目，班主任始终视为教授
    async fn teacher_teaches(
        &self,
        teacher_id: i64,
        class_id: i64,
        subject_id: Option<i64>,
    ) -> Result<bool>;
    // 某班级的任课教师及其科目
    async fn list_class_teachers(&self, class_id: i64) -> Result<Vec<TeacherBrief>>;

    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>>;
    async fn get_subjects_by_ids(&self, ids: &[i64]) -> Result<Vec<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        page: Option<i64>,
        size: Option<i64>,
        search: Option<String>,
    ) -> Result<SubjectListResponse>;
    async fn update_subject(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, subject_id: i64) -> Result<bool>;
}

/// 课表时段，写入前时间已规范为 HH:MM
#[async_trait::async_trait]
pub trait TimetableStorage: Send + Sync {
    async fn create_slot(&self, slot: SlotRequest) -> Result<TimetableSlot>;
    async fn get_slot_by_id(&self, slot_id: i64) -> Result<Option<TimetableSlot>>;
    async fn update_slot(&self, slot_id: i64, slot: SlotRequest) -> Result<Option<TimetableSlot>>;
    async fn delete_slot(&self, slot_id: i64) -> Result<bool>;
    // 同一天内属于该班级或该教师的全部时段（冲突检测）
    async fn list_day_slots(
        &self,
        day_of_week: i32,
        class_id: i64,
        teacher_id: i64,
    ) -> Result<Vec<TimetableSlot>>;
    // 带名称的课表，按星期、开始时间排序
    async fn list_timetable(&self, query: TimetableQuery) -> Result<Vec<TimetableEntry>>;
    async fn get_timetable_entry(&self, slot_id: i64) -> Result<Option<TimetableEntry>>;
}

#[async_trait::async_trait]
pub trait AssignmentStorage: Send + Sync {
    async fn create_assignment(
        &self,
        teacher_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    async fn get_student_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 提交或重新提交，清空之前的评分；已批改时返回 None
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
        attachment_url: Option<String>,
        is_late: bool,
    ) -> Result<Option<Submission>>;
    async fn list_assignment_submissions(&self, assignment_id: i64) -> Result<Vec<Submission>>;
    async fn list_student_submissions(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>>;
    async fn grade_submission(
        &self,
        submission_id: i64,
        marks: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>>;
    // 教师名下尚未批改的提交数
    async fn count_pending_submissions(&self, teacher_id: i64) -> Result<i64>;
}

#[async_trait::async_trait]
pub trait ExamStorage: Send + Sync {
    async fn create_exam(&self, exam: NewExam) -> Result<Exam>;
    async fn get_exam_by_id(&self, exam_id: i64) -> Result<Option<Exam>>;
    async fn list_exams_with_pagination(
        &self,
        query: ExamListQuery,
    ) -> Result<(Vec<Exam>, PaginationInfo)>;
    // 尚未结束的考试，按开始时间升序
    async fn list_upcoming_exams(
        &self,
        class_ids: &[i64],
        teacher_id: Option<i64>,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Exam>>;
    async fn update_exam(&self, exam_id: i64, update: UpdateExamRequest) -> Result<Option<Exam>>;
    async fn publish_exam(&self, exam_id: i64) -> Result<Option<Exam>>;
    async fn delete_exam(&self, exam_id: i64) -> Result<bool>;

    async fn add_question(&self, exam_id: i64, question: NewQuestion) -> Result<ExamQuestion>;
    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<ExamQuestion>>;
    async fn update_question(
        &self,
        question_id: i64,
        question: NewQuestion,
    ) -> Result<Option<ExamQuestion>>;
    async fn delete_question(&self, question_id: i64) -> Result<bool>;
    // 按 position 排序
    async fn list_questions(&self, exam_id: i64) -> Result<Vec<ExamQuestion>>;
    async fn list_questions_for_exams(&self, exam_ids: &[i64]) -> Result<Vec<ExamQuestion>>;

    async fn create_attempt(
        &self,
        exam_id: i64,
        student_id: i64,
        started_at: DateTime<Utc>,
        deadline_at: DateTime<Utc>,
    ) -> Result<ExamAttempt>;
    async fn get_attempt_by_id(&self, attempt_id: i64) -> Result<Option<ExamAttempt>>;
    async fn get_student_attempt(&self, exam_id: i64, student_id: i64)
    -> Result<Option<ExamAttempt>>;
    async fn list_exam_attempts(&self, exam_id: i64) -> Result<Vec<ExamAttempt>>;
    async fn list_student_attempts(
        &self,
        student_id: i64,
        exam_ids: &[i64],
    ) -> Result<Vec<ExamAttempt>>;
    /// 每题一条答案，重复保存覆盖；作答已结束时返回 None
    async fn save_answers(
        &self,
        attempt_id: i64,
        answers: &[AnswerInput],
    ) -> Result<Option<usize>>;
    async fn list_answers(&self, attempt_id: i64) -> Result<Vec<ExamAnswer>>;
    /// 交卷：写入自动批改结果并结束作答
    ///
    /// 仅对仍在作答中的记录生效；已结束时返回 None。
    async fn finalize_attempt(
        &self,
        attempt_id: i64,
        grades: Vec<AnswerGrade>,
        status: AttemptStatus,
        auto_submitted: bool,
        now: DateTime<Utc>,
    ) -> Result<Option<ExamAttempt>>;
    // 写入人工评分并重新计算总分，全部评完后状态变为 graded
    async fn grade_attempt_answers(
        &self,
        attempt_id: i64,
        grades: Vec<AnswerGradeInput>,
        now: DateTime<Utc>,
    ) -> Result<ExamAttempt>;
}

#[async_trait::async_trait]
pub trait AttendanceStorage: Send + Sync {
    // 按时段+日期整体点名，已有记录被覆盖
    async fn upsert_attendance(
        &self,
        slot: &TimetableSlot,
        date: NaiveDate,
        entries: Vec<AttendanceUpsert>,
        marked_by: i64,
    ) -> Result<Vec<AttendanceRecord>>;
    async fn list_slot_attendance(
        &self,
        slot_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>>;
    async fn list_student_attendance(
        &self,
        student_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>>;
    async fn list_class_attendance(
        &self,
        class_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>>;
    async fn list_attendance_on(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>>;
}

#[async_trait::async_trait]
pub trait MarksStorage: Send + Sync {
    async fn upsert_term_marks(&self, marks: Vec<TermMarkUpsert>) -> Result<Vec<TermMark>>;
    async fn list_term_marks(&self, query: TermMarkQuery) -> Result<Vec<TermMark>>;
}

#[async_trait::async_trait]
pub trait PortfolioStorage: Send + Sync {
    async fn create_portfolio_entry(
        &self,
        teacher_id: i64,
        entry: CreatePortfolioRequest,
    ) -> Result<PortfolioEntry>;
    async fn get_portfolio_entry(&self, entry_id: i64) -> Result<Option<PortfolioEntry>>;
    async fn update_portfolio_entry(
        &self,
        entry_id: i64,
        update: UpdatePortfolioRequest,
    ) -> Result<Option<PortfolioEntry>>;
    async fn delete_portfolio_entry(&self, entry_id: i64) -> Result<bool>;
    async fn list_portfolio_entries(&self, filter: PortfolioFilter) -> Result<Vec<PortfolioEntry>>;
}

#[async_trait::async_trait]
pub trait PtmStorage: Send + Sync {
    async fn create_ptm_booking(&self, booking: NewPtmBooking) -> Result<PtmBooking>;
    async fn get_ptm_booking(&self, booking_id: i64) -> Result<Option<PtmBooking>>;
    // statuses 为空时不过滤；按预约时间升序
    async fn list_ptm_bookings(
        &self,
        parent_id: Option<i64>,
        teacher_id: Option<i64>,
        statuses: &[PtmStatus],
    ) -> Result<Vec<PtmBooking>>;
    /// 状态变更，仅当当前状态仍为 `expected` 时生效
    async fn transition_ptm_booking(
        &self,
        booking_id: i64,
        expected: PtmStatus,
        transition: PtmTransition,
    ) -> Result<Option<PtmBooking>>;
}

#[async_trait::async_trait]
pub trait NotificationStorage: Send + Sync {
    // 同一通知发给多个用户，返回写入条数
    async fn create_notifications(
        &self,
        user_ids: &[i64],
        notification: NewNotification,
    ) -> Result<usize>;
    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        page: Option<i64>,
        size: Option<i64>,
        unread_only: bool,
    ) -> Result<NotificationListResponse>;
    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64>;
    // 只作用于本人的通知
    async fn mark_notification_as_read(&self, notification_id: i64, user_id: i64)
    -> Result<bool>;
    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64>;
    async fn delete_notification(&self, notification_id: i64, user_id: i64) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait BulletinStorage: Send + Sync {
    async fn create_event(&self, created_by: i64, event: CreateEventRequest) -> Result<Event>;
    async fn get_event_by_id(&self, event_id: i64) -> Result<Option<Event>>;
    async fn update_event(&self, event_id: i64, update: UpdateEventRequest)
    -> Result<Option<Event>>;
    async fn delete_event(&self, event_id: i64) -> Result<bool>;
    async fn list_events_with_pagination(&self, query: EventListQuery)
    -> Result<EventListResponse>;

    async fn create_announcement(
        &self,
        created_by: i64,
        announcement: CreateAnnouncementRequest,
    ) -> Result<Announcement>;
    async fn get_announcement_by_id(&self, announcement_id: i64) -> Result<Option<Announcement>>;
    async fn update_announcement(
        &self,
        announcement_id: i64,
        update: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>>;
    async fn delete_announcement(&self, announcement_id: i64) -> Result<bool>;
    async fn list_announcements_with_pagination(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<AnnouncementListResponse>;
    // 指定角色的全部启用用户 ID（公告推送）
    async fn list_active_user_ids(&self, roles: &[UserRole]) -> Result<Vec<i64>>;
}

#[async_trait::async_trait]
pub trait SettingsStorage: Send + Sync {
    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>>;
    async fn get_setting_by_key(&self, key: &str) -> Result<Option<SystemSetting>>;
    // 更新配置并写入审计日志
    async fn update_setting(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<SystemSetting>;
    async fn list_setting_audits(&self, query: SettingAuditQuery)
    -> Result<SettingAuditListResponse>;
}

/// 全部存储能力的组合，服务层通过 `Arc<dyn Storage>` 使用
pub trait Storage:
    UserStorage
    + StudentStorage
    + ClassStorage
    + TimetableStorage
    + AssignmentStorage
    + ExamStorage
    + AttendanceStorage
    + MarksStorage
    + PortfolioStorage
    + PtmStorage
    + NotificationStorage
    + BulletinStorage
    + SettingsStorage
{
}

impl<T> Storage for T where
    T: UserStorage
        + StudentStorage
        + ClassStorage
        + TimetableStorage
        + AssignmentStorage
        + ExamStorage
        + AttendanceStorage
        + MarksStorage
        + PortfolioStorage
        + PtmStorage
        + NotificationStorage
        + BulletinStorage
        + SettingsStorage
{
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
