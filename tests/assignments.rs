#[macro_use]
mod common;

use actix_web::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use common::{School, call, get, post, put};

#[actix_web::test]
async fn test_late_submission_is_graded_and_locked() {
    let school = School::seed().await;
    let app = init_app!(school);

    let (status, body) = call(
        &app,
        post(
            "/api/v1/teacher/assignments",
            &school.teacher,
            json!({
                "class_id": school.class_id,
                "subject_id": school.subject_id,
                "title": "Fractions worksheet",
                "due_at": Utc::now() - Duration::hours(1),
                "max_marks": 10.0,
                "allow_late": true,
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let assignment_id = body["data"]["id"].as_i64().unwrap();
    let submit_path = format!("/api/v1/student/assignments/{assignment_id}/submit");

    let (status, _) = call(
        &app,
        post(&submit_path, &school.student, json!({ "content": "   " })).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &app,
        post(&submit_path, &school.student, json!({ "content": "1/2 + 1/4 = 3/4" })).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "late");
    assert_eq!(body["data"]["is_late"], true);
    let submission_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call(
        &app,
        get(
            &format!("/api/v1/teacher/assignments/{assignment_id}/submissions"),
            &school.teacher,
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["items"][0]["student_name"], "student");
    assert_eq!(body["data"]["not_submitted_count"], 0);

    let grade_path = format!("/api/v1/teacher/submissions/{submission_id}/grade");
    let (status, _) = call(
        &app,
        put(&grade_path, &school.teacher, json!({ "marks": 11.0 })).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &app,
        put(&grade_path, &school.teacher, json!({ "marks": 8.0, "feedback": "Good" })).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "graded");

    // 批改后不能再交
    let (status, _) = call(
        &app,
        post(&submit_path, &school.student, json!({ "content": "second try" })).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // 绕过服务层的预检，存储层也不会覆盖已批改的提交
    let overwritten = school
        .storage
        .upsert_submission(assignment_id, school.student.id, Some("x".into()), None, false)
        .await
        .unwrap();
    assert!(overwritten.is_none());

    let (status, body) = call(
        &app,
        get(
            &format!("/api/v1/parent/children/{}/assignments", school.student.id),
            &school.parent,
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let item = &body["data"]["items"][0];
    assert_eq!(item["status"], "graded");
    assert_eq!(item["submission"]["marks"], 8.0);
    assert_eq!(item["submission"]["content"], "1/2 + 1/4 = 3/4");
}

#[actix_web::test]
async fn test_submission_closed_after_due_date() {
    let school = School::seed().await;
    let app = init_app!(school);

    let (status, body) = call(
        &app,
        post(
            "/api/v1/teacher/assignments",
            &school.teacher,
            json!({
                "class_id": school.class_id,
                "subject_id": school.subject_id,
                "title": "Closed task",
                "due_at": Utc::now() - Duration::minutes(5),
                "max_marks": 5.0,
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let assignment_id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = call(
        &app,
        post(
            &format!("/api/v1/student/assignments/{assignment_id}/submit"),
            &school.student,
            json!({ "attachment_url": "https://files.school.test/a.pdf" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&app, get("/api/v1/student/assignments", &school.student).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["status"], "not_submitted");
}
