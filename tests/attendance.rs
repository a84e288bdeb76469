#[macro_use]
mod common;

use actix_web::http::StatusCode;
use chrono::Duration;
use serde_json::json;

use common::{School, call, get, post, today};

#[actix_web::test]
async fn test_mark_and_view_attendance() {
    let school = School::seed().await;
    let app = init_app!(school);

    let (status, body) = call(
        &app,
        get(
            &format!("/api/v1/teacher/attendance/roster?slot_id={}&date={}", school.slot_id, today()),
            &school.teacher,
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let entries = body["data"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0]["status"].is_null());

    let (status, body) = call(
        &app,
        post(
            "/api/v1/teacher/attendance",
            &school.teacher,
            json!({
                "slot_id": school.slot_id,
                "date": today(),
                "entries": [{ "student_id": school.student.id, "status": "absent", "remarks": "sick" }],
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["saved"], 1);
    assert_eq!(body["data"]["summary"]["absent"], 1);

    // 缺勤通知家长
    let (_, body) = call(
        &app,
        get("/api/v1/notifications/unread-count", &school.parent).to_request(),
    )
    .await;
    assert!(body["data"]["unread_count"].as_i64().unwrap() >= 1);

    let (status, body) = call(&app, get("/api/v1/student/attendance", &school.student).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["summary"]["absent"], 1);
    assert_eq!(body["data"]["summary"]["percentage"].as_f64(), Some(0.0));
    assert_eq!(body["data"]["below_threshold"], true);

    let (status, body) = call(
        &app,
        get(
            &format!("/api/v1/parent/children/{}/attendance", school.student.id),
            &school.parent,
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["records"].as_array().unwrap().len(), 1);

    // 重新点名覆盖原记录
    let (status, body) = call(
        &app,
        post(
            "/api/v1/teacher/attendance",
            &school.teacher,
            json!({
                "slot_id": school.slot_id,
                "date": today(),
                "entries": [{ "student_id": school.student.id, "status": "present" }],
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, body) = call(&app, get("/api/v1/student/attendance", &school.student).to_request()).await;
    assert_eq!(body["data"]["summary"]["total"], 1);
    assert_eq!(body["data"]["summary"]["present"], 1);
}

#[actix_web::test]
async fn test_attendance_date_rules() {
    let school = School::seed().await;
    let app = init_app!(school);
    let today = chrono::Local::now().date_naive();

    for date in [today + Duration::days(7), today - Duration::days(1)] {
        let (status, _) = call(
            &app,
            post(
                "/api/v1/teacher/attendance",
                &school.teacher,
                json!({
                    "slot_id": school.slot_id,
                    "date": date.format("%Y-%m-%d").to_string(),
                    "entries": [{ "student_id": school.student.id, "status": "present" }],
                }),
            )
            .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{date}");
    }

    // 不是自己的课
    let (status, _) = call(
        &app,
        post(
            "/api/v1/teacher/attendance",
            &school.other_teacher,
            json!({
                "slot_id": school.slot_id,
                "date": today.format("%Y-%m-%d").to_string(),
                "entries": [{ "student_id": school.student.id, "status": "present" }],
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
