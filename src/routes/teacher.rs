//! 教师门户

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, GradeSubmissionRequest,
    UpdateAssignmentRequest,
};
use crate::models::attendance::requests::{ClassAttendanceQuery, MarkAttendanceRequest, RosterQuery};
use crate::models::classes::requests::SubjectQueryParams;
use crate::models::exams::requests::{
    CreateExamRequest, ExamListParams, GradeAttemptRequest, QuestionRequest, UpdateExamRequest,
};
use crate::models::marks::requests::{TermMarkQuery, UpsertTermMarksRequest};
use crate::models::portfolio::requests::{
    CreatePortfolioRequest, PortfolioQuery, UpdatePortfolioRequest,
};
use crate::models::ptm::entities::{PtmAction, PtmActor};
use crate::models::ptm::requests::{PtmListParams, PtmNoteRequest, RescheduleRequest};
use crate::models::users::entities::UserRole;
use crate::services::{
    AssignmentService, AttendanceService, ClassService, DashboardService, ExamService,
    MarksService, PortfolioService, PtmService, SubjectService, TimetableService,
};
use crate::utils::SafeIDI64;

static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);
static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);
static TIMETABLE_SERVICE: Lazy<TimetableService> = Lazy::new(TimetableService::new_lazy);
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);
static MARKS_SERVICE: Lazy<MarksService> = Lazy::new(MarksService::new_lazy);
static PORTFOLIO_SERVICE: Lazy<PortfolioService> = Lazy::new(PortfolioService::new_lazy);
static PTM_SERVICE: Lazy<PtmService> = Lazy::new(PtmService::new_lazy);
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

// 班级与课表
pub async fn list_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_my_classes(&req).await
}

pub async fn get_class_students(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_roster(id.0, &req).await
}

pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<SubjectQueryParams>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(query.into_inner(), &req).await
}

pub async fn get_timetable(req: HttpRequest) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.my_timetable(&req).await
}

// 作业
pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(query.into_inner(), &req)
        .await
}

pub async fn create_assignment(
    req: HttpRequest,
    assignment: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(assignment.into_inner(), &req)
        .await
}

pub async fn get_assignment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(id.0, &req).await
}

pub async fn update_assignment(
    req: HttpRequest,
    id: SafeIDI64,
    update: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(id.0, update.into_inner(), &req)
        .await
}

pub async fn delete_assignment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(id.0, &req).await
}

pub async fn list_submissions(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_submissions(id.0, &req).await
}

pub async fn grade_submission(
    req: HttpRequest,
    id: SafeIDI64,
    grade: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .grade_submission(id.0, grade.into_inner(), &req)
        .await
}

// 考试
pub async fn list_exams(
    req: HttpRequest,
    query: web::Query<ExamListParams>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(query.into_inner(), &req).await
}

pub async fn create_exam(
    req: HttpRequest,
    exam: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.create_exam(exam.into_inner(), &req).await
}

pub async fn get_exam(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_exam(id.0, &req).await
}

pub async fn update_exam(
    req: HttpRequest,
    id: SafeIDI64,
    update: web::Json<UpdateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .update_exam(id.0, update.into_inner(), &req)
        .await
}

pub async fn delete_exam(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(id.0, &req).await
}

pub async fn publish_exam(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.publish_exam(id.0, &req).await
}

pub async fn add_question(
    req: HttpRequest,
    id: SafeIDI64,
    question: web::Json<QuestionRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .add_question(id.0, question.into_inner(), &req)
        .await
}

pub async fn update_question(
    req: HttpRequest,
    id: SafeIDI64,
    question: web::Json<QuestionRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .update_question(id.0, question.into_inner(), &req)
        .await
}

pub async fn delete_question(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_question(id.0, &req).await
}

pub async fn list_attempts(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_attempts(id.0, &req).await
}

pub async fn get_attempt(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_attempt(id.0, &req).await
}

pub async fn grade_attempt(
    req: HttpRequest,
    id: SafeIDI64,
    grades: web::Json<GradeAttemptRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .grade_attempt(id.0, grades.into_inner(), &req)
        .await
}

// 考勤
pub async fn get_roster(
    req: HttpRequest,
    query: web::Query<RosterQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_roster(query.into_inner(), &req).await
}

pub async fn mark_attendance(
    req: HttpRequest,
    attendance: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .mark_attendance(attendance.into_inner(), &req)
        .await
}

pub async fn attendance_report(
    req: HttpRequest,
    query: web::Query<ClassAttendanceQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.class_report(query.into_inner(), &req).await
}

// 学期成绩
pub async fn list_marks(
    req: HttpRequest,
    query: web::Query<TermMarkQuery>,
) -> ActixResult<HttpResponse> {
    MARKS_SERVICE.list_marks(query.into_inner(), &req).await
}

pub async fn upsert_marks(
    req: HttpRequest,
    marks: web::Json<UpsertTermMarksRequest>,
) -> ActixResult<HttpResponse> {
    MARKS_SERVICE.upsert_marks(marks.into_inner(), &req).await
}

// 成长档案
pub async fn list_portfolio(
    req: HttpRequest,
    query: web::Query<PortfolioQuery>,
) -> ActixResult<HttpResponse> {
    PORTFOLIO_SERVICE
        .list_entries(query.into_inner(), &req)
        .await
}

pub async fn create_portfolio(
    req: HttpRequest,
    entry: web::Json<CreatePortfolioRequest>,
) -> ActixResult<HttpResponse> {
    PORTFOLIO_SERVICE
        .create_entry(entry.into_inner(), &req)
        .await
}

pub async fn update_portfolio(
    req: HttpRequest,
    id: SafeIDI64,
    update: web::Json<UpdatePortfolioRequest>,
) -> ActixResult<HttpResponse> {
    PORTFOLIO_SERVICE
        .update_entry(id.0, update.into_inner(), &req)
        .await
}

pub async fn delete_portfolio(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PORTFOLIO_SERVICE.delete_entry(id.0, &req).await
}

// 家长会
pub async fn list_ptm(
    req: HttpRequest,
    query: web::Query<PtmListParams>,
) -> ActixResult<HttpResponse> {
    PTM_SERVICE
        .list_bookings(PtmActor::Teacher, query.into_inner(), &req)
        .await
}

async fn ptm_act(
    req: HttpRequest,
    id: SafeIDI64,
    action: PtmAction,
    note: Option<web::Json<PtmNoteRequest>>,
) -> ActixResult<HttpResponse> {
    let note = note.map(web::Json::into_inner).unwrap_or_default();
    PTM_SERVICE
        .act(id.0, PtmActor::Teacher, action, note, &req)
        .await
}

pub async fn approve_ptm(
    req: HttpRequest,
    id: SafeIDI64,
    note: Option<web::Json<PtmNoteRequest>>,
) -> ActixResult<HttpResponse> {
    ptm_act(req, id, PtmAction::Approve, note).await
}

pub async fn reject_ptm(
    req: HttpRequest,
    id: SafeIDI64,
    note: Option<web::Json<PtmNoteRequest>>,
) -> ActixResult<HttpResponse> {
    ptm_act(req, id, PtmAction::Reject, note).await
}

pub async fn complete_ptm(
    req: HttpRequest,
    id: SafeIDI64,
    note: Option<web::Json<PtmNoteRequest>>,
) -> ActixResult<HttpResponse> {
    ptm_act(req, id, PtmAction::Complete, note).await
}

pub async fn reschedule_ptm(
    req: HttpRequest,
    id: SafeIDI64,
    reschedule: web::Json<RescheduleRequest>,
) -> ActixResult<HttpResponse> {
    PTM_SERVICE
        .reschedule(id.0, reschedule.into_inner(), &req)
        .await
}

pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.teacher_dashboard(&req).await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teacher")
            .wrap(middlewares::RateLimit::api())
            .wrap(middlewares::RequireRole::new(&UserRole::Teacher))
            .wrap(middlewares::RequireJWT)
            .route("/classes", web::get().to(list_classes))
            .route("/classes/{id}/students", web::get().to(get_class_students))
            .route("/subjects", web::get().to(list_subjects))
            .route("/timetable", web::get().to(get_timetable))
            .service(
                web::resource("/assignments")
                    .route(web::get().to(list_assignments))
                    .route(web::post().to(create_assignment)),
            )
            .service(
                web::resource("/assignments/{id}")
                    .route(web::get().to(get_assignment))
                    .route(web::put().to(update_assignment))
                    .route(web::delete().to(delete_assignment)),
            )
            .route(
                "/assignments/{id}/submissions",
                web::get().to(list_submissions),
            )
            .route("/submissions/{id}/grade", web::put().to(grade_submission))
            .service(
                web::resource("/exams")
                    .route(web::get().to(list_exams))
                    .route(web::post().to(create_exam)),
            )
            .service(
                web::resource("/exams/{id}")
                    .route(web::get().to(get_exam))
                    .route(web::put().to(update_exam))
                    .route(web::delete().to(delete_exam)),
            )
            .route("/exams/{id}/publish", web::post().to(publish_exam))
            .route("/exams/{id}/questions", web::post().to(add_question))
            .route("/exams/{id}/attempts", web::get().to(list_attempts))
            .service(
                web::resource("/questions/{id}")
                    .route(web::put().to(update_question))
                    .route(web::delete().to(delete_question)),
            )
            .route("/attempts/{id}", web::get().to(get_attempt))
            .route("/attempts/{id}/grade", web::put().to(grade_attempt))
            .route("/attendance/roster", web::get().to(get_roster))
            .route("/attendance", web::post().to(mark_attendance))
            .route("/attendance/report", web::get().to(attendance_report))
            .service(
                web::resource("/marks")
                    .route(web::get().to(list_marks))
                    .route(web::put().to(upsert_marks)),
            )
            .service(
                web::resource("/portfolio")
                    .route(web::get().to(list_portfolio))
                    .route(web::post().to(create_portfolio)),
            )
            .service(
                web::resource("/portfolio/{id}")
                    .route(web::put().to(update_portfolio))
                    .route(web::delete().to(delete_portfolio)),
            )
            .route("/ptm", web::get().to(list_ptm))
            .route("/ptm/{id}/approve", web::post().to(approve_ptm))
            .route("/ptm/{id}/reject", web::post().to(reject_ptm))
            .route("/ptm/{id}/reschedule", web::post().to(reschedule_ptm))
            .route("/ptm/{id}/complete", web::post().to(complete_ptm))
            .route("/dashboard", web::get().to(dashboard)),
    );
}
