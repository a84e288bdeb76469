//! 管理员门户：用户、班级、科目、课表、考勤报表与系统设置

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::ClassAttendanceQuery;
use crate::models::classes::requests::{
    ClassQueryParams, CreateClassRequest, CreateSubjectRequest, SubjectQueryParams,
    UpdateClassRequest, UpdateSubjectRequest,
};
use crate::models::system::requests::{SettingAuditQuery, UpdateSettingRequest};
use crate::models::timetable::requests::{SlotRequest, TimetableQuery};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{
    CreateUserRequest, LinkChildRequest, StudentProfileInput, UpdateUserRequest, UserListParams,
};
use crate::services::{
    AttendanceService, ClassService, DashboardService, SubjectService, SystemService,
    TimetableService, UserService,
};
use crate::utils::{SafeIDI64, SafeSettingKey, SafeStudentIdI64};

static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);
static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);
static TIMETABLE_SERVICE: Lazy<TimetableService> = Lazy::new(TimetableService::new_lazy);
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

// 用户
pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(query.into_inner(), &req).await
}

pub async fn create_user(
    req: HttpRequest,
    user_data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(user_data.into_inner(), &req).await
}

pub async fn get_user(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(id.0, &req).await
}

pub async fn update_user(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user(id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_user(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(id.0, &req).await
}

pub async fn update_student_profile(
    req: HttpRequest,
    id: SafeIDI64,
    input: web::Json<StudentProfileInput>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_student_profile(id.0, input.into_inner(), &req)
        .await
}

pub async fn list_children(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_children(id.0, &req).await
}

pub async fn link_child(
    req: HttpRequest,
    id: SafeIDI64,
    link: web::Json<LinkChildRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.link_child(id.0, link.into_inner(), &req).await
}

pub async fn unlink_child(
    req: HttpRequest,
    id: SafeIDI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.unlink_child(id.0, student_id.0, &req).await
}

// 班级
pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassQueryParams>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(query.into_inner(), &req).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(class_data.into_inner(), &req)
        .await
}

pub async fn get_class(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(id.0, &req).await
}

pub async fn update_class(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_class(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(id.0, &req).await
}

pub async fn get_class_students(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_roster(id.0, &req).await
}

// 科目
pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<SubjectQueryParams>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(query.into_inner(), &req).await
}

pub async fn create_subject(
    req: HttpRequest,
    subject: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .create_subject(subject.into_inner(), &req)
        .await
}

pub async fn get_subject(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.get_subject(id.0, &req).await
}

pub async fn update_subject(
    req: HttpRequest,
    id: SafeIDI64,
    update: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .update_subject(id.0, update.into_inner(), &req)
        .await
}

pub async fn delete_subject(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(id.0, &req).await
}

// 课表
pub async fn list_slots(
    req: HttpRequest,
    query: web::Query<TimetableQuery>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.list_slots(query.into_inner(), &req).await
}

pub async fn create_slot(
    req: HttpRequest,
    slot: web::Json<SlotRequest>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.create_slot(slot.into_inner(), &req).await
}

pub async fn update_slot(
    req: HttpRequest,
    id: SafeIDI64,
    slot: web::Json<SlotRequest>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .update_slot(id.0, slot.into_inner(), &req)
        .await
}

pub async fn delete_slot(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.delete_slot(id.0, &req).await
}

// 考勤报表
pub async fn attendance_report(
    req: HttpRequest,
    query: web::Query<ClassAttendanceQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.class_report(query.into_inner(), &req).await
}

pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.admin_dashboard(&req).await
}

// 系统设置
pub async fn list_settings(req: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.list_settings(&req).await
}

pub async fn update_setting(
    req: HttpRequest,
    key: SafeSettingKey,
    update: web::Json<UpdateSettingRequest>,
) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE
        .update_setting(key.0, update.into_inner(), &req)
        .await
}

pub async fn list_setting_audits(
    req: HttpRequest,
    query: web::Query<SettingAuditQuery>,
) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE
        .list_setting_audits(query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin")
            .wrap(middleware::Compress::default())
            .wrap(middlewares::RateLimit::api())
            .wrap(middlewares::RequireRole::new(&UserRole::Admin))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/users")
                    .route(web::get().to(list_users))
                    .route(web::post().to(create_user)),
            )
            .service(
                web::resource("/users/{id}")
                    .route(web::get().to(get_user))
                    .route(web::put().to(update_user))
                    .route(web::delete().to(delete_user)),
            )
            .route("/students/{id}", web::put().to(update_student_profile))
            .service(
                web::resource("/parents/{id}/children")
                    .route(web::get().to(list_children))
                    .route(web::post().to(link_child)),
            )
            .route(
                "/parents/{id}/children/{student_id}",
                web::delete().to(unlink_child),
            )
            .service(
                web::resource("/classes")
                    .route(web::get().to(list_classes))
                    .route(web::post().to(create_class)),
            )
            .service(
                web::resource("/classes/{id}")
                    .route(web::get().to(get_class))
                    .route(web::put().to(update_class))
                    .route(web::delete().to(delete_class)),
            )
            .route("/classes/{id}/students", web::get().to(get_class_students))
            .service(
                web::resource("/subjects")
                    .route(web::get().to(list_subjects))
                    .route(web::post().to(create_subject)),
            )
            .service(
                web::resource("/subjects/{id}")
                    .route(web::get().to(get_subject))
                    .route(web::put().to(update_subject))
                    .route(web::delete().to(delete_subject)),
            )
            .service(
                web::resource("/timetable")
                    .route(web::get().to(list_slots))
                    .route(web::post().to(create_slot)),
            )
            .service(
                web::resource("/timetable/{id}")
                    .route(web::put().to(update_slot))
                    .route(web::delete().to(delete_slot)),
            )
            .route("/attendance/report", web::get().to(attendance_report))
            .route("/dashboard", web::get().to(dashboard))
            .route("/settings", web::get().to(list_settings))
            .route("/settings/audits", web::get().to(list_setting_audits))
            .route("/settings/{key}", web::put().to(update_setting)),
    );
}
