use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 自增主键列
fn pk<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// 非空 BIGINT 列（外键 / 时间戳）
fn big<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name).big_integer().not_null().to_owned()
}

/// 可空 BIGINT 列
fn big_null<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name).big_integer().null().to_owned()
}

fn string<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name).string().not_null().to_owned()
}

fn string_null<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name).string().null().to_owned()
}

fn text_null<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name).text().null().to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk(Users::Id))
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(string(Users::PasswordHash))
                    .col(string(Users::Role))
                    .col(string(Users::Status))
                    .col(string_null(Users::DisplayName))
                    .col(string_null(Users::Phone))
                    .col(string_null(Users::AvatarUrl))
                    .col(big_null(Users::LastLogin))
                    .col(big(Users::CreatedAt))
                    .col(big(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // 班级表
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(pk(Classes::Id))
                    .col(string(Classes::Name))
                    .col(
                        ColumnDef::new(Classes::Section)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(string(Classes::AcademicYear))
                    .col(big_null(Classes::ClassTeacherId))
                    .col(big(Classes::CreatedAt))
                    .col(big(Classes::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::ClassTeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 科目表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(pk(Subjects::Id))
                    .col(string(Subjects::Name))
                    .col(
                        ColumnDef::new(Subjects::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(text_null(Subjects::Description))
                    .col(big(Subjects::CreatedAt))
                    .col(big(Subjects::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // 学生档案表
        manager
            .create_table(
                Table::create()
                    .table(StudentProfiles::Table)
                    .if_not_exists()
                    .col(pk(StudentProfiles::Id))
                    .col(
                        ColumnDef::new(StudentProfiles::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(big_null(StudentProfiles::ClassId))
                    .col(ColumnDef::new(StudentProfiles::RollNumber).integer().null())
                    .col(
                        ColumnDef::new(StudentProfiles::AdmissionNo)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(string_null(StudentProfiles::DateOfBirth))
                    .col(big(StudentProfiles::CreatedAt))
                    .col(big(StudentProfiles::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentProfiles::Table, StudentProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentProfiles::Table, StudentProfiles::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 家长-学生关联表
        manager
            .create_table(
                Table::create()
                    .table(ParentStudents::Table)
                    .if_not_exists()
                    .col(pk(ParentStudents::Id))
                    .col(big(ParentStudents::ParentId))
                    .col(big(ParentStudents::StudentId))
                    .col(string(ParentStudents::Relationship))
                    .col(big(ParentStudents::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(ParentStudents::Table, ParentStudents::ParentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ParentStudents::Table, ParentStudents::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 课表时段
        manager
            .create_table(
                Table::create()
                    .table(TimetableSlots::Table)
                    .if_not_exists()
                    .col(pk(TimetableSlots::Id))
                    .col(big(TimetableSlots::ClassId))
                    .col(big(TimetableSlots::SubjectId))
                    .col(big(TimetableSlots::TeacherId))
                    .col(
                        ColumnDef::new(TimetableSlots::DayOfWeek)
                            .integer()
                            .not_null(),
                    )
                    .col(string(TimetableSlots::StartTime))
                    .col(string(TimetableSlots::EndTime))
                    .col(string_null(TimetableSlots::Room))
                    .col(big(TimetableSlots::CreatedAt))
                    .col(big(TimetableSlots::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(TimetableSlots::Table, TimetableSlots::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TimetableSlots::Table, TimetableSlots::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TimetableSlots::Table, TimetableSlots::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(pk(Assignments::Id))
                    .col(big(Assignments::ClassId))
                    .col(big(Assignments::SubjectId))
                    .col(big(Assignments::TeacherId))
                    .col(string(Assignments::Title))
                    .col(text_null(Assignments::Description))
                    .col(string_null(Assignments::AttachmentUrl))
                    .col(big(Assignments::DueAt))
                    .col(ColumnDef::new(Assignments::MaxMarks).double().not_null())
                    .col(
                        ColumnDef::new(Assignments::AllowLate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(big(Assignments::CreatedAt))
                    .col(big(Assignments::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 作业提交表
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(pk(Submissions::Id))
                    .col(big(Submissions::AssignmentId))
                    .col(big(Submissions::StudentId))
                    .col(text_null(Submissions::Content))
                    .col(string_null(Submissions::AttachmentUrl))
                    .col(string(Submissions::Status))
                    .col(
                        ColumnDef::new(Submissions::IsLate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(big(Submissions::SubmittedAt))
                    .col(ColumnDef::new(Submissions::Marks).double().null())
                    .col(text_null(Submissions::Feedback))
                    .col(big_null(Submissions::GradedBy))
                    .col(big_null(Submissions::GradedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 考试表
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(pk(Exams::Id))
                    .col(big(Exams::ClassId))
                    .col(big(Exams::SubjectId))
                    .col(big(Exams::TeacherId))
                    .col(string(Exams::Title))
                    .col(text_null(Exams::Instructions))
                    .col(big(Exams::StartAt))
                    .col(big(Exams::EndAt))
                    .col(
                        ColumnDef::new(Exams::DurationMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(string(Exams::Status))
                    .col(big(Exams::CreatedAt))
                    .col(big(Exams::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 考试题目表
        manager
            .create_table(
                Table::create()
                    .table(ExamQuestions::Table)
                    .if_not_exists()
                    .col(pk(ExamQuestions::Id))
                    .col(big(ExamQuestions::ExamId))
                    .col(string(ExamQuestions::QuestionType))
                    .col(ColumnDef::new(ExamQuestions::Prompt).text().not_null())
                    .col(text_null(ExamQuestions::Options))
                    .col(text_null(ExamQuestions::CorrectAnswer))
                    .col(ColumnDef::new(ExamQuestions::Marks).double().not_null())
                    .col(
                        ColumnDef::new(ExamQuestions::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(big(ExamQuestions::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamQuestions::Table, ExamQuestions::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 考试作答记录表
        manager
            .create_table(
                Table::create()
                    .table(ExamAttempts::Table)
                    .if_not_exists()
                    .col(pk(ExamAttempts::Id))
                    .col(big(ExamAttempts::ExamId))
                    .col(big(ExamAttempts::StudentId))
                    .col(string(ExamAttempts::Status))
                    .col(big(ExamAttempts::StartedAt))
                    .col(big(ExamAttempts::DeadlineAt))
                    .col(big_null(ExamAttempts::SubmittedAt))
                    .col(ColumnDef::new(ExamAttempts::Score).double().null())
                    .col(
                        ColumnDef::new(ExamAttempts::AutoSubmitted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(big_null(ExamAttempts::GradedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamAttempts::Table, ExamAttempts::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamAttempts::Table, ExamAttempts::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 考试答案表
        manager
            .create_table(
                Table::create()
                    .table(ExamAnswers::Table)
                    .if_not_exists()
                    .col(pk(ExamAnswers::Id))
                    .col(big(ExamAnswers::AttemptId))
                    .col(big(ExamAnswers::QuestionId))
                    .col(ColumnDef::new(ExamAnswers::Answer).text().not_null())
                    .col(ColumnDef::new(ExamAnswers::IsCorrect).boolean().null())
                    .col(ColumnDef::new(ExamAnswers::AwardedMarks).double().null())
                    .col(text_null(ExamAnswers::Feedback))
                    .col(big(ExamAnswers::SavedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamAnswers::Table, ExamAnswers::AttemptId)
                            .to(ExamAttempts::Table, ExamAttempts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamAnswers::Table, ExamAnswers::QuestionId)
                            .to(ExamQuestions::Table, ExamQuestions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 考勤记录表
        manager
            .create_table(
                Table::create()
                    .table(AttendanceRecords::Table)
                    .if_not_exists()
                    .col(pk(AttendanceRecords::Id))
                    .col(big(AttendanceRecords::StudentId))
                    .col(big(AttendanceRecords::SlotId))
                    .col(big(AttendanceRecords::ClassId))
                    .col(string(AttendanceRecords::Date))
                    .col(string(AttendanceRecords::Status))
                    .col(string_null(AttendanceRecords::Remarks))
                    .col(big(AttendanceRecords::MarkedBy))
                    .col(big(AttendanceRecords::MarkedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceRecords::Table, AttendanceRecords::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceRecords::Table, AttendanceRecords::SlotId)
                            .to(TimetableSlots::Table, TimetableSlots::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 学期成绩表
        manager
            .create_table(
                Table::create()
                    .table(TermMarks::Table)
                    .if_not_exists()
                    .col(pk(TermMarks::Id))
                    .col(big(TermMarks::StudentId))
                    .col(big(TermMarks::SubjectId))
                    .col(big(TermMarks::ClassId))
                    .col(big(TermMarks::TeacherId))
                    .col(string(TermMarks::Term))
                    .col(string(TermMarks::AcademicYear))
                    .col(ColumnDef::new(TermMarks::Marks).double().not_null())
                    .col(ColumnDef::new(TermMarks::MaxMarks).double().not_null())
                    .col(string_null(TermMarks::Remarks))
                    .col(big(TermMarks::CreatedAt))
                    .col(big(TermMarks::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(TermMarks::Table, TermMarks::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TermMarks::Table, TermMarks::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 成长档案表
        manager
            .create_table(
                Table::create()
                    .table(PortfolioEntries::Table)
                    .if_not_exists()
                    .col(pk(PortfolioEntries::Id))
                    .col(big(PortfolioEntries::StudentId))
                    .col(big(PortfolioEntries::TeacherId))
                    .col(string(PortfolioEntries::Title))
                    .col(string(PortfolioEntries::Category))
                    .col(ColumnDef::new(PortfolioEntries::Content).text().not_null())
                    .col(string_null(PortfolioEntries::Term))
                    .col(
                        ColumnDef::new(PortfolioEntries::VisibleToParent)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(big(PortfolioEntries::CreatedAt))
                    .col(big(PortfolioEntries::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(PortfolioEntries::Table, PortfolioEntries::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PortfolioEntries::Table, PortfolioEntries::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 家长会预约表
        manager
            .create_table(
                Table::create()
                    .table(PtmBookings::Table)
                    .if_not_exists()
                    .col(pk(PtmBookings::Id))
                    .col(big(PtmBookings::ParentId))
                    .col(big(PtmBookings::TeacherId))
                    .col(big(PtmBookings::StudentId))
                    .col(big(PtmBookings::ScheduledAt))
                    .col(
                        ColumnDef::new(PtmBookings::DurationMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(text_null(PtmBookings::Agenda))
                    .col(string(PtmBookings::Status))
                    .col(big_null(PtmBookings::ProposedAt))
                    .col(text_null(PtmBookings::TeacherNote))
                    .col(text_null(PtmBookings::ParentNote))
                    .col(big(PtmBookings::CreatedAt))
                    .col(big(PtmBookings::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(PtmBookings::Table, PtmBookings::ParentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PtmBookings::Table, PtmBookings::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PtmBookings::Table, PtmBookings::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 通知表
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(pk(Notifications::Id))
                    .col(big(Notifications::UserId))
                    .col(string(Notifications::NotificationType))
                    .col(string(Notifications::Title))
                    .col(text_null(Notifications::Content))
                    .col(string_null(Notifications::ReferenceType))
                    .col(big_null(Notifications::ReferenceId))
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(big(Notifications::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 校园活动表
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(pk(Events::Id))
                    .col(string(Events::Title))
                    .col(text_null(Events::Description))
                    .col(string_null(Events::Location))
                    .col(big(Events::StartAt))
                    .col(big_null(Events::EndAt))
                    .col(big(Events::CreatedBy))
                    .col(big(Events::CreatedAt))
                    .col(big(Events::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Events::Table, Events::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 公告表
        manager
            .create_table(
                Table::create()
                    .table(Announcements::Table)
                    .if_not_exists()
                    .col(pk(Announcements::Id))
                    .col(string(Announcements::Title))
                    .col(ColumnDef::new(Announcements::Content).text().not_null())
                    .col(string(Announcements::Audience))
                    .col(big_null(Announcements::ClassId))
                    .col(big(Announcements::CreatedBy))
                    .col(big(Announcements::CreatedAt))
                    .col(big(Announcements::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Announcements::Table, Announcements::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Announcements::Table, Announcements::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 唯一约束 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_classes_name_section_year")
                    .table(Classes::Table)
                    .col(Classes::Name)
                    .col(Classes::Section)
                    .col(Classes::AcademicYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_parent_students_pair")
                    .table(ParentStudents::Table)
                    .col(ParentStudents::ParentId)
                    .col(ParentStudents::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_submissions_assignment_student")
                    .table(Submissions::Table)
                    .col(Submissions::AssignmentId)
                    .col(Submissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_exam_attempts_exam_student")
                    .table(ExamAttempts::Table)
                    .col(ExamAttempts::ExamId)
                    .col(ExamAttempts::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_exam_answers_attempt_question")
                    .table(ExamAnswers::Table)
                    .col(ExamAnswers::AttemptId)
                    .col(ExamAnswers::QuestionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_attendance_student_slot_date")
                    .table(AttendanceRecords::Table)
                    .col(AttendanceRecords::StudentId)
                    .col(AttendanceRecords::SlotId)
                    .col(AttendanceRecords::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_term_marks_student_subject_term")
                    .table(TermMarks::Table)
                    .col(TermMarks::StudentId)
                    .col(TermMarks::SubjectId)
                    .col(TermMarks::Term)
                    .col(TermMarks::AcademicYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ==================== 查询索引 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_timetable_class_day")
                    .table(TimetableSlots::Table)
                    .col(TimetableSlots::ClassId)
                    .col(TimetableSlots::DayOfWeek)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_timetable_teacher_day")
                    .table(TimetableSlots::Table)
                    .col(TimetableSlots::TeacherId)
                    .col(TimetableSlots::DayOfWeek)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_class_date")
                    .table(AttendanceRecords::Table)
                    .col(AttendanceRecords::ClassId)
                    .col(AttendanceRecords::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ptm_teacher_status")
                    .table(PtmBookings::Table)
                    .col(PtmBookings::TeacherId)
                    .col(PtmBookings::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_user_read")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .col(Notifications::IsRead)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Announcements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PtmBookings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PortfolioEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TermMarks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttendanceRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamAnswers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamAttempts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TimetableSlots::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ParentStudents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    DisplayName,
    Phone,
    AvatarUrl,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Classes {
    #[sea_orm(iden = "classes")]
    Table,
    Id,
    Name,
    Section,
    AcademicYear,
    ClassTeacherId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Name,
    Code,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentProfiles {
    #[sea_orm(iden = "student_profiles")]
    Table,
    Id,
    UserId,
    ClassId,
    RollNumber,
    AdmissionNo,
    DateOfBirth,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ParentStudents {
    #[sea_orm(iden = "parent_students")]
    Table,
    Id,
    ParentId,
    StudentId,
    Relationship,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TimetableSlots {
    #[sea_orm(iden = "timetable_slots")]
    Table,
    Id,
    ClassId,
    SubjectId,
    TeacherId,
    DayOfWeek,
    StartTime,
    EndTime,
    Room,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    ClassId,
    SubjectId,
    TeacherId,
    Title,
    Description,
    AttachmentUrl,
    DueAt,
    MaxMarks,
    AllowLate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    AssignmentId,
    StudentId,
    Content,
    AttachmentUrl,
    Status,
    IsLate,
    SubmittedAt,
    Marks,
    Feedback,
    GradedBy,
    GradedAt,
}

#[derive(DeriveIden)]
enum Exams {
    #[sea_orm(iden = "exams")]
    Table,
    Id,
    ClassId,
    SubjectId,
    TeacherId,
    Title,
    Instructions,
    StartAt,
    EndAt,
    DurationMinutes,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ExamQuestions {
    #[sea_orm(iden = "exam_questions")]
    Table,
    Id,
    ExamId,
    QuestionType,
    Prompt,
    Options,
    CorrectAnswer,
    Marks,
    Position,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ExamAttempts {
    #[sea_orm(iden = "exam_attempts")]
    Table,
    Id,
    ExamId,
    StudentId,
    Status,
    StartedAt,
    DeadlineAt,
    SubmittedAt,
    Score,
    AutoSubmitted,
    GradedAt,
}

#[derive(DeriveIden)]
enum ExamAnswers {
    #[sea_orm(iden = "exam_answers")]
    Table,
    Id,
    AttemptId,
    QuestionId,
    Answer,
    IsCorrect,
    AwardedMarks,
    Feedback,
    SavedAt,
}

#[derive(DeriveIden)]
enum AttendanceRecords {
    #[sea_orm(iden = "attendance_records")]
    Table,
    Id,
    StudentId,
    SlotId,
    ClassId,
    Date,
    Status,
    Remarks,
    MarkedBy,
    MarkedAt,
}

#[derive(DeriveIden)]
enum TermMarks {
    #[sea_orm(iden = "term_marks")]
    Table,
    Id,
    StudentId,
    SubjectId,
    ClassId,
    TeacherId,
    Term,
    AcademicYear,
    Marks,
    MaxMarks,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PortfolioEntries {
    #[sea_orm(iden = "portfolio_entries")]
    Table,
    Id,
    StudentId,
    TeacherId,
    Title,
    Category,
    Content,
    Term,
    VisibleToParent,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PtmBookings {
    #[sea_orm(iden = "ptm_bookings")]
    Table,
    Id,
    ParentId,
    TeacherId,
    StudentId,
    ScheduledAt,
    DurationMinutes,
    Agenda,
    Status,
    ProposedAt,
    TeacherNote,
    ParentNote,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    #[sea_orm(iden = "notifications")]
    Table,
    Id,
    UserId,
    NotificationType,
    Title,
    Content,
    ReferenceType,
    ReferenceId,
    IsRead,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Events {
    #[sea_orm(iden = "events")]
    Table,
    Id,
    Title,
    Description,
    Location,
    StartAt,
    EndAt,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Announcements {
    #[sea_orm(iden = "announcements")]
    Table,
    Id,
    Title,
    Content,
    Audience,
    ClassId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
