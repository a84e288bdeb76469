#[macro_use]
mod common;

use std::collections::BTreeSet;

use actix_web::http::StatusCode;
use serde_json::{Value, json};

use edubridge::models::classes::requests::CreateClassRequest;
use edubridge::models::users::entities::{User, UserRole};
use edubridge::models::users::requests::StudentProfileInput;

use common::{School, call, get, post, seed_user};

fn titles(body: &Value) -> BTreeSet<String> {
    body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap().to_string())
        .collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[actix_web::test]
async fn test_class_announcements_reach_only_their_class() {
    let school = School::seed().await;
    let app = init_app!(school);

    // 另一个班级及其学生
    let grade8 = school
        .storage
        .create_class(CreateClassRequest {
            name: "Grade 8".to_string(),
            section: "A".to_string(),
            academic_year: "2026-2027".to_string(),
            class_teacher_id: None,
        })
        .await
        .unwrap();
    let grade8_student: User = seed_user(&school.storage, "grade8_student", UserRole::Student).await;
    school
        .storage
        .upsert_student_profile(
            grade8_student.id,
            StudentProfileInput {
                class_id: Some(grade8.id),
                roll_number: Some(1),
                admission_no: Some("B-001".to_string()),
                date_of_birth: None,
            },
        )
        .await
        .unwrap();

    let posts = [
        (&school.teacher, json!({ "title": "Quiz on Friday", "content": "Chapter 3", "audience": "students", "class_id": school.class_id })),
        (&school.admin, json!({ "title": "School closed", "content": "Holiday", "audience": "all" })),
        (&school.admin, json!({ "title": "Grade 7 parents", "content": "Meeting", "audience": "parents", "class_id": school.class_id })),
        (&school.admin, json!({ "title": "Grade 8 parents", "content": "Meeting", "audience": "parents", "class_id": grade8.id })),
    ];
    for (author, payload) in posts {
        let (status, body) = call(&app, post("/api/v1/announcements", author, payload).to_request()).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    // 教师不能发布到未任课的班级，也不能发全校公告
    let (status, _) = call(
        &app,
        post(
            "/api/v1/announcements",
            &school.teacher,
            json!({ "title": "x", "content": "y", "audience": "students", "class_id": grade8.id }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = call(
        &app,
        post(
            "/api/v1/announcements",
            &school.teacher,
            json!({ "title": "x", "content": "y", "audience": "all" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&app, get("/api/v1/announcements", &school.student).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), set(&["Quiz on Friday", "School closed"]));

    let (_, body) = call(&app, get("/api/v1/announcements", &grade8_student).to_request()).await;
    assert_eq!(titles(&body), set(&["School closed"]));

    // 家长看到孩子所在班级的公告
    let (_, body) = call(&app, get("/api/v1/announcements", &school.parent).to_request()).await;
    assert_eq!(titles(&body), set(&["School closed", "Grade 7 parents"]));

    let (_, body) = call(&app, get("/api/v1/announcements", &school.admin).to_request()).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 4);
}
