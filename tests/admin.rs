#[macro_use]
mod common;

use actix_web::http::StatusCode;
use serde_json::json;

use common::{School, call, delete, get, post, put};

#[actix_web::test]
async fn test_create_student_with_temporary_password() {
    let school = School::seed().await;
    let app = init_app!(school);

    let (status, body) = call(
        &app,
        post(
            "/api/v1/admin/users",
            &school.admin,
            json!({
                "username": "new_student",
                "email": "New.Student@School.test",
                "role": "student",
                "display_name": "New Student",
                "student": { "class_id": school.class_id, "roll_number": 2, "admission_no": "A-002" },
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["user"]["email"], "new.student@school.test");
    assert_eq!(body["data"]["student"]["class_id"].as_i64(), Some(school.class_id));
    let temporary = body["data"]["temporary_password"].as_str().unwrap().to_string();
    assert!(!temporary.is_empty());

    // 临时密码可直接登录
    let (status, _) = call(
        &app,
        actix_web::test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "username": "new_student", "password": temporary }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        &app,
        post(
            "/api/v1/admin/users",
            &school.admin,
            json!({ "username": "new_student", "email": "other@school.test", "role": "teacher" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(
        &app,
        get(&format!("/api/v1/admin/classes/{}/students", school.class_id), &school.admin)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
}

#[actix_web::test]
async fn test_duplicate_class_and_timetable_overlap() {
    let school = School::seed().await;
    let app = init_app!(school);

    let (status, _) = call(
        &app,
        post(
            "/api/v1/admin/classes",
            &school.admin,
            json!({ "name": "Grade 7", "section": "A", "academic_year": "2026-2027" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let slot = |start: &str, end: &str| {
        json!({
            "class_id": school.class_id,
            "subject_id": school.subject_id,
            "teacher_id": school.teacher.id,
            "day_of_week": 1,
            "start_time": start,
            "end_time": end,
        })
    };

    let (status, body) = call(
        &app,
        post("/api/v1/admin/timetable", &school.admin, slot("10:00", "10:45")).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let slot_id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = call(
        &app,
        post("/api/v1/admin/timetable", &school.admin, slot("10:30", "11:15")).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // 首尾相接不算冲突
    let (status, _) = call(
        &app,
        post("/api/v1/admin/timetable", &school.admin, slot("10:45", "11:30")).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call(
        &app,
        post("/api/v1/admin/timetable", &school.admin, slot("12:00", "11:00")).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        delete(&format!("/api/v1/admin/timetable/{slot_id}"), &school.admin).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_setting_update_is_validated_and_audited() {
    let school = School::seed().await;
    let app = init_app!(school);

    let (status, _) = call(
        &app,
        put(
            "/api/v1/admin/settings/school.ptm_default_duration",
            &school.admin,
            json!({ "value": "soon" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &app,
        put(
            "/api/v1/admin/settings/school.current_term",
            &school.admin,
            json!({ "value": "Term 2" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["setting"]["value"], "Term 2");

    let (status, body) = call(
        &app,
        get("/api/v1/admin/settings/audits?key=school.current_term", &school.admin).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["audits"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["audits"][0]["new_value"], "Term 2");
}

#[actix_web::test]
async fn test_suspension_takes_effect_on_cached_session() {
    let school = School::seed().await;
    let app = init_app!(school);

    // 第一次请求会把用户写入认证缓存
    let (status, _) = call(&app, get("/api/v1/student/timetable", &school.student).to_request()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &app,
        put(
            &format!("/api/v1/admin/users/{}", school.student.id),
            &school.admin,
            json!({ "status": "suspended" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "suspended");

    let (status, _) = call(&app, get("/api/v1/student/timetable", &school.student).to_request()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 删除账号后旧 token 同样失效
    let (status, _) = call(&app, get("/api/v1/parent/children", &school.parent).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(
        &app,
        delete(&format!("/api/v1/admin/users/{}", school.parent.id), &school.admin).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, get("/api/v1/parent/children", &school.parent).to_request()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
