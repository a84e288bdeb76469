//! 学生门户

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{AssignmentListParams, SubmitAssignmentRequest};
use crate::models::attendance::requests::AttendanceRangeQuery;
use crate::models::exams::requests::{ExamListParams, SaveAnswersRequest};
use crate::models::marks::requests::ReportCardQuery;
use crate::models::portfolio::requests::PortfolioQuery;
use crate::models::users::entities::UserRole;
use crate::services::{
    AssignmentService, AttendanceService, DashboardService, ExamService, MarksService,
    PortfolioService, TimetableService,
};
use crate::utils::SafeIDI64;

static TIMETABLE_SERVICE: Lazy<TimetableService> = Lazy::new(TimetableService::new_lazy);
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);
static MARKS_SERVICE: Lazy<MarksService> = Lazy::new(MarksService::new_lazy);
static PORTFOLIO_SERVICE: Lazy<PortfolioService> = Lazy::new(PortfolioService::new_lazy);
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn get_timetable(req: HttpRequest) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.my_timetable(&req).await
}

pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_my_assignments(query.into_inner(), &req)
        .await
}

pub async fn submit_assignment(
    req: HttpRequest,
    id: SafeIDI64,
    submission: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .submit_assignment(id.0, submission.into_inner(), &req)
        .await
}

pub async fn list_exams(
    req: HttpRequest,
    query: web::Query<ExamListParams>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_my_exams(query.into_inner(), &req).await
}

pub async fn start_exam(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.start_exam(id.0, &req).await
}

pub async fn save_answers(
    req: HttpRequest,
    id: SafeIDI64,
    answers: web::Json<SaveAnswersRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .save_answers(id.0, answers.into_inner(), &req)
        .await
}

pub async fn submit_attempt(
    req: HttpRequest,
    id: SafeIDI64,
    answers: web::Json<SaveAnswersRequest>,
) -> ActixResult<HttpResponse> {
    // 请求体必填（可为 `{}`），解析失败按 400 处理而不是空答卷交卷
    EXAM_SERVICE
        .submit_attempt(id.0, answers.into_inner(), &req)
        .await
}

pub async fn get_result(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_result(id.0, &req).await
}

pub async fn get_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceRangeQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .my_attendance(query.into_inner(), &req)
        .await
}

pub async fn get_report_card(
    req: HttpRequest,
    query: web::Query<ReportCardQuery>,
) -> ActixResult<HttpResponse> {
    MARKS_SERVICE.my_report_card(query.into_inner(), &req).await
}

pub async fn get_portfolio(
    req: HttpRequest,
    query: web::Query<PortfolioQuery>,
) -> ActixResult<HttpResponse> {
    PORTFOLIO_SERVICE
        .my_portfolio(query.into_inner(), &req)
        .await
}

pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.student_dashboard(&req).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student")
            .wrap(middlewares::RateLimit::api())
            .wrap(middlewares::RequireRole::new(&UserRole::Student))
            .wrap(middlewares::RequireJWT)
            .route("/timetable", web::get().to(get_timetable))
            .route("/assignments", web::get().to(list_assignments))
            .route(
                "/assignments/{id}/submit",
                web::post().to(submit_assignment),
            )
            .route("/exams", web::get().to(list_exams))
            .route("/exams/{id}/start", web::post().to(start_exam))
            .service(
                // 自动保存频率较高，单独限流
                web::resource("/attempts/{id}/answers")
                    .wrap(middlewares::RateLimit::exam_autosave())
                    .route(web::put().to(save_answers)),
            )
            .route("/attempts/{id}/submit", web::post().to(submit_attempt))
            .route("/attempts/{id}/result", web::get().to(get_result))
            .route("/attendance", web::get().to(get_attendance))
            .route("/report-card", web::get().to(get_report_card))
            .route("/portfolio", web::get().to(get_portfolio))
            .route("/dashboard", web::get().to(dashboard)),
    );
}
