#[macro_use]
mod common;

use actix_web::http::StatusCode;
use serde_json::{Value, json};

use common::{School, call, delete, get, post, put};

fn titles(body: &Value) -> Vec<String> {
    let mut titles: Vec<String> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap().to_string())
        .collect();
    titles.sort();
    titles
}

#[actix_web::test]
async fn test_parent_sees_only_shared_entries() {
    let school = School::seed().await;
    let app = init_app!(school);

    let (status, body) = call(
        &app,
        post(
            "/api/v1/teacher/portfolio",
            &school.teacher,
            json!({
                "student_id": school.student.id,
                "title": "Science fair winner",
                "category": "achievement",
                "content": "First place with a water filter model.",
                "term": "term1",
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["visible_to_parent"], true);

    let (status, body) = call(
        &app,
        post(
            "/api/v1/teacher/portfolio",
            &school.teacher,
            json!({
                "student_id": school.student.id,
                "title": "Needs focus",
                "category": "behaviour",
                "content": "Often distracted in the afternoon.",
                "visible_to_parent": false,
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let private_id = body["data"]["id"].as_i64().unwrap();

    // 未任课的教师不能写入或修改
    let (status, _) = call(
        &app,
        post(
            "/api/v1/teacher/portfolio",
            &school.other_teacher,
            json!({ "student_id": school.student.id, "title": "x", "category": "other", "content": "y" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = call(
        &app,
        delete(&format!("/api/v1/teacher/portfolio/{private_id}"), &school.other_teacher)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(&app, get("/api/v1/student/portfolio", &school.student).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Needs focus", "Science fair winner"]);

    let child_path = format!("/api/v1/parent/children/{}/portfolio", school.student.id);
    let (status, body) = call(&app, get(&child_path, &school.parent).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Science fair winner"]);

    let (status, _) = call(
        &app,
        put(
            &format!("/api/v1/teacher/portfolio/{private_id}"),
            &school.teacher,
            json!({ "visible_to_parent": true }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&app, get(&child_path, &school.parent).to_request()).await;
    assert_eq!(titles(&body), vec!["Needs focus", "Science fair winner"]);

    // 不是自己孩子的档案
    let (status, _) = call(
        &app,
        get(
            &format!("/api/v1/parent/children/{}/portfolio", school.teacher.id),
            &school.parent,
        )
        .to_request(),
    )
    .await;
    assert!(status.is_client_error());
}
