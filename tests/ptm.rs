#[macro_use]
mod common;

use actix_web::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use common::{School, call, get, post};

fn booking_body(school: &School, at: DateTime<Utc>) -> serde_json::Value {
    json!({
        "teacher_id": school.teacher.id,
        "student_id": school.student.id,
        "scheduled_at": at,
        "duration_minutes": 20,
        "agenda": "Term progress",
    })
}

#[actix_web::test]
async fn test_ptm_reschedule_flow() {
    let school = School::seed().await;
    let app = init_app!(school);
    let at = Utc::now() + Duration::days(2);

    let (status, body) = call(
        &app,
        post("/api/v1/parent/ptm", &school.parent, booking_body(&school, at)).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["status"], "pending");
    let id = body["data"]["id"].as_i64().unwrap();

    let (_, body) = call(
        &app,
        get("/api/v1/notifications/unread-count", &school.teacher).to_request(),
    )
    .await;
    assert!(body["data"]["unread_count"].as_i64().unwrap() >= 1);

    // 教师列表带有三方姓名
    let (status, body) = call(&app, get("/api/v1/teacher/ptm", &school.teacher).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["parent_name"], "parent");
    assert_eq!(body["data"]["items"][0]["student_name"], "student");

    let proposed = Utc::now() + Duration::days(3);
    let (status, body) = call(
        &app,
        post(
            &format!("/api/v1/teacher/ptm/{id}/reschedule"),
            &school.teacher,
            json!({ "proposed_at": proposed, "note": "Busy that day" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "reschedule_requested");

    // 等待家长答复期间教师不能直接批准
    let (status, _) = call(
        &app,
        post(&format!("/api/v1/teacher/ptm/{id}/approve"), &school.teacher, json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(
        &app,
        post(&format!("/api/v1/parent/ptm/{id}/accept"), &school.parent, json!({})).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "approved");
    assert!(body["data"]["proposed_at"].is_null());
    let scheduled: DateTime<Utc> =
        serde_json::from_value(body["data"]["scheduled_at"].clone()).unwrap();
    assert_eq!(scheduled.timestamp(), proposed.timestamp());

    let (status, _) = call(
        &app,
        post(&format!("/api/v1/teacher/ptm/{id}/approve"), &school.teacher, json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(
        &app,
        post(&format!("/api/v1/parent/ptm/{id}/cancel"), &school.parent, json!({})).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "cancelled");

    let (status, _) = call(
        &app,
        post(&format!("/api/v1/parent/ptm/{id}/cancel"), &school.parent, json!({})).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_ptm_booking_rules() {
    let school = School::seed().await;
    let app = init_app!(school);

    // 过去的时间
    let (status, _) = call(
        &app,
        post(
            "/api/v1/parent/ptm",
            &school.parent,
            booking_body(&school, Utc::now() - Duration::hours(1)),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 不教该学生的教师
    let mut body = booking_body(&school, Utc::now() + Duration::days(1));
    body["teacher_id"] = json!(school.other_teacher.id);
    let (status, _) = call(&app, post("/api/v1/parent/ptm", &school.parent, body).to_request()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 时长超出上限
    let mut body = booking_body(&school, Utc::now() + Duration::days(1));
    body["duration_minutes"] = json!(600);
    let (status, _) = call(&app, post("/api/v1/parent/ptm", &school.parent, body).to_request()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 其他教师看不到这条预约
    let (_, created) = call(
        &app,
        post(
            "/api/v1/parent/ptm",
            &school.parent,
            booking_body(&school, Utc::now() + Duration::days(1)),
        )
        .to_request(),
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();
    let (status, _) = call(
        &app,
        post(&format!("/api/v1/teacher/ptm/{id}/approve"), &school.other_teacher, json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_ptm_approval_rejects_overlap() {
    let school = School::seed().await;
    let app = init_app!(school);
    let at = Utc::now() + Duration::days(1);

    let mut ids = Vec::new();
    for offset in [0, 10] {
        let (status, body) = call(
            &app,
            post(
                "/api/v1/parent/ptm",
                &school.parent,
                booking_body(&school, at + Duration::minutes(offset)),
            )
            .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(body["data"]["id"].as_i64().unwrap());
    }

    let (status, _) = call(
        &app,
        post(&format!("/api/v1/teacher/ptm/{}/approve", ids[0]), &school.teacher, json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        &app,
        post(&format!("/api/v1/teacher/ptm/{}/approve", ids[1]), &school.teacher, json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
