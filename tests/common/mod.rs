//! 集成测试共用：内存 SQLite、Moka 缓存与一所最小的学校

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use chrono::Datelike;
use serde_json::Value;

use edubridge::cache::ObjectCache;
use edubridge::cache::object_cache::moka::MokaCacheWrapper;
use edubridge::models::classes::requests::{CreateClassRequest, CreateSubjectRequest};
use edubridge::models::timetable::requests::SlotRequest;
use edubridge::models::users::entities::{User, UserRole};
use edubridge::models::users::requests::{NewUser, StudentProfileInput};
use edubridge::storage::{SeaOrmStorage, Storage};
use edubridge::utils::jwt::JwtUtils;
use edubridge::utils::password::hash_password;

pub const PASSWORD: &str = "Passw0rd!";

/// 一个班级、一门科目、今天的一节课，以及四种角色各一人
pub struct School {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub admin: User,
    pub teacher: User,
    pub other_teacher: User,
    pub student: User,
    pub parent: User,
    pub class_id: i64,
    pub subject_id: i64,
    pub slot_id: i64,
}

pub async fn seed_user(storage: &Arc<dyn Storage>, username: &str, role: UserRole) -> User {
    storage
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{username}@school.test"),
            password_hash: hash_password(PASSWORD).unwrap(),
            role,
            display_name: Some(username.to_string()),
            phone: None,
        })
        .await
        .unwrap()
}

impl School {
    pub async fn seed() -> Self {
        let storage: Arc<dyn Storage> =
            Arc::new(SeaOrmStorage::connect("sqlite::memory:").await.unwrap());
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new().unwrap());

        let admin = seed_user(&storage, "admin", UserRole::Admin).await;
        let teacher = seed_user(&storage, "teacher", UserRole::Teacher).await;
        let other_teacher = seed_user(&storage, "other_teacher", UserRole::Teacher).await;
        let student = seed_user(&storage, "student", UserRole::Student).await;
        let parent = seed_user(&storage, "parent", UserRole::Parent).await;

        let class = storage
            .create_class(CreateClassRequest {
                name: "Grade 7".to_string(),
                section: "A".to_string(),
                academic_year: "2026-2027".to_string(),
                class_teacher_id: None,
            })
            .await
            .unwrap();

        let subject = storage
            .create_subject(CreateSubjectRequest {
                name: "Mathematics".to_string(),
                code: "MATH".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let today = chrono::Local::now().date_naive();
        let slot = storage
            .create_slot(SlotRequest {
                class_id: class.id,
                subject_id: subject.id,
                teacher_id: teacher.id,
                day_of_week: today.weekday().number_from_monday() as i32,
                start_time: "08:00".to_string(),
                end_time: "09:00".to_string(),
                room: Some("101".to_string()),
            })
            .await
            .unwrap();

        storage
            .upsert_student_profile(
                student.id,
                StudentProfileInput {
                    class_id: Some(class.id),
                    roll_number: Some(1),
                    admission_no: Some("A-001".to_string()),
                    date_of_birth: None,
                },
            )
            .await
            .unwrap();

        storage
            .link_parent(parent.id, student.id, "mother")
            .await
            .unwrap();

        Self {
            storage,
            cache,
            admin,
            teacher,
            other_teacher,
            student,
            parent,
            class_id: class.id,
            subject_id: subject.id,
            slot_id: slot.id,
        }
    }

    pub fn bearer(user: &User) -> (&'static str, String) {
        let token = JwtUtils::generate_access_token(user.id, user.role.as_str()).unwrap();
        ("Authorization", format!("Bearer {token}"))
    }
}

/// 按 main.rs 的方式装配完整应用
macro_rules! init_app {
    ($school:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::QueryConfig::default()
                    .error_handler(edubridge::utils::query_error_handler))
                .app_data(actix_web::web::JsonConfig::default()
                    .error_handler(edubridge::utils::json_error_handler))
                .app_data(actix_web::web::Data::new($school.storage.clone()))
                .app_data(actix_web::web::Data::new($school.cache.clone()))
                .configure(edubridge::routes::configure_auth_routes)
                .configure(edubridge::routes::configure_profile_routes)
                .configure(edubridge::routes::configure_admin_routes)
                .configure(edubridge::routes::configure_teacher_routes)
                .configure(edubridge::routes::configure_student_routes)
                .configure(edubridge::routes::configure_parent_routes)
                .configure(edubridge::routes::configure_notification_routes)
                .configure(edubridge::routes::configure_event_routes)
                .configure(edubridge::routes::configure_announcement_routes)
                .configure(edubridge::routes::configure_system_routes),
        )
        .await
    };
}

/// 发送请求并解析统一响应体
pub async fn call<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub fn get(path: &str, user: &User) -> test::TestRequest {
    test::TestRequest::get()
        .uri(path)
        .insert_header(School::bearer(user))
}

pub fn post(path: &str, user: &User, body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri(path)
        .insert_header(School::bearer(user))
        .set_json(body)
}

pub fn put(path: &str, user: &User, body: Value) -> test::TestRequest {
    test::TestRequest::put()
        .uri(path)
        .insert_header(School::bearer(user))
        .set_json(body)
}

pub fn delete(path: &str, user: &User) -> test::TestRequest {
    test::TestRequest::delete()
        .uri(path)
        .insert_header(School::bearer(user))
}

pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
