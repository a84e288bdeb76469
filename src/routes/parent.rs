//! 家长门户，按子女访问的接口都先校验亲属关联

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::AssignmentListParams;
use crate::models::attendance::requests::AttendanceRangeQuery;
use crate::models::exams::requests::ExamListParams;
use crate::models::marks::requests::ReportCardQuery;
use crate::models::portfolio::requests::PortfolioQuery;
use crate::models::ptm::entities::{PtmAction, PtmActor};
use crate::models::ptm::requests::{CreatePtmRequest, PtmListParams, PtmNoteRequest};
use crate::models::users::entities::UserRole;
use crate::services::{
    AssignmentService, AttendanceService, DashboardService, ExamService, MarksService,
    PortfolioService, PtmService, TimetableService, UserService,
};
use crate::utils::{SafeIDI64, SafeStudentIdI64};

static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);
static TIMETABLE_SERVICE: Lazy<TimetableService> = Lazy::new(TimetableService::new_lazy);
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);
static MARKS_SERVICE: Lazy<MarksService> = Lazy::new(MarksService::new_lazy);
static PORTFOLIO_SERVICE: Lazy<PortfolioService> = Lazy::new(PortfolioService::new_lazy);
static PTM_SERVICE: Lazy<PtmService> = Lazy::new(PtmService::new_lazy);
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn list_children(req: HttpRequest) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_my_children(&req).await
}

pub async fn child_timetable(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.child_timetable(student_id.0, &req).await
}

pub async fn child_assignments(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_child_assignments(student_id.0, query.into_inner(), &req)
        .await
}

pub async fn child_exams(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<ExamListParams>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .list_child_exams(student_id.0, query.into_inner(), &req)
        .await
}

pub async fn child_result(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .get_child_result(student_id.0, id.0, &req)
        .await
}

pub async fn child_attendance(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<AttendanceRangeQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .child_attendance(student_id.0, query.into_inner(), &req)
        .await
}

pub async fn child_report_card(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<ReportCardQuery>,
) -> ActixResult<HttpResponse> {
    MARKS_SERVICE
        .child_report_card(student_id.0, query.into_inner(), &req)
        .await
}

pub async fn child_portfolio(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<PortfolioQuery>,
) -> ActixResult<HttpResponse> {
    PORTFOLIO_SERVICE
        .child_portfolio(student_id.0, query.into_inner(), &req)
        .await
}

pub async fn list_ptm(
    req: HttpRequest,
    query: web::Query<PtmListParams>,
) -> ActixResult<HttpResponse> {
    PTM_SERVICE
        .list_bookings(PtmActor::Parent, query.into_inner(), &req)
        .await
}

pub async fn create_ptm(
    req: HttpRequest,
    booking: web::Json<CreatePtmRequest>,
) -> ActixResult<HttpResponse> {
    PTM_SERVICE.create_booking(booking.into_inner(), &req).await
}

async fn ptm_act(
    req: HttpRequest,
    id: SafeIDI64,
    action: PtmAction,
    note: Option<web::Json<PtmNoteRequest>>,
) -> ActixResult<HttpResponse> {
    let note = note.map(web::Json::into_inner).unwrap_or_default();
    PTM_SERVICE
        .act(id.0, PtmActor::Parent, action, note, &req)
        .await
}

pub async fn accept_ptm(
    req: HttpRequest,
    id: SafeIDI64,
    note: Option<web::Json<PtmNoteRequest>>,
) -> ActixResult<HttpResponse> {
    ptm_act(req, id, PtmAction::Accept, note).await
}

pub async fn decline_ptm(
    req: HttpRequest,
    id: SafeIDI64,
    note: Option<web::Json<PtmNoteRequest>>,
) -> ActixResult<HttpResponse> {
    ptm_act(req, id, PtmAction::Decline, note).await
}

pub async fn cancel_ptm(
    req: HttpRequest,
    id: SafeIDI64,
    note: Option<web::Json<PtmNoteRequest>>,
) -> ActixResult<HttpResponse> {
    ptm_act(req, id, PtmAction::Cancel, note).await
}

pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.parent_dashboard(&req).await
}

// 配置路由
pub fn configure_parent_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/parent")
            .wrap(middlewares::RateLimit::api())
            .wrap(middlewares::RequireRole::new(&UserRole::Parent))
            .wrap(middlewares::RequireJWT)
            .route("/children", web::get().to(list_children))
            .service(
                web::scope("/children/{student_id}")
                    .route("/timetable", web::get().to(child_timetable))
                    .route("/assignments", web::get().to(child_assignments))
                    .route("/exams", web::get().to(child_exams))
                    .route("/results/{id}", web::get().to(child_result))
                    .route("/attendance", web::get().to(child_attendance))
                    .route("/report-card", web::get().to(child_report_card))
                    .route("/portfolio", web::get().to(child_portfolio)),
            )
            .service(
                web::resource("/ptm")
                    .route(web::get().to(list_ptm))
                    .route(web::post().to(create_ptm)),
            )
            .route("/ptm/{id}/accept", web::post().to(accept_ptm))
            .route("/ptm/{id}/decline", web::post().to(decline_ptm))
            .route("/ptm/{id}/cancel", web::post().to(cancel_ptm))
            .route("/dashboard", web::get().to(dashboard)),
    );
}
