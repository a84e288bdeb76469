#[macro_use]
mod common;

use actix_web::http::StatusCode;

use edubridge::models::notifications::entities::NotificationType;
use edubridge::models::notifications::requests::NewNotification;

use common::{School, call, delete, get, put};

#[actix_web::test]
async fn test_notifications_are_private_to_their_owner() {
    let school = School::seed().await;
    let app = init_app!(school);

    school
        .storage
        .create_notifications(
            &[school.student.id],
            NewNotification::new(NotificationType::Event, "Sports day").content("Friday 9:00"),
        )
        .await
        .unwrap();

    let (status, body) = call(&app, get("/api/v1/notifications", &school.student).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    let id = items[0]["id"].as_i64().unwrap();

    // 家长看不到也动不了学生的通知
    let (_, body) = call(&app, get("/api/v1/notifications", &school.parent).to_request()).await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
    let (status, _) = call(
        &app,
        put(&format!("/api/v1/notifications/{id}/read"), &school.parent, serde_json::json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(
        &app,
        delete(&format!("/api/v1/notifications/{id}"), &school.parent).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call(&app, get("/api/v1/notifications/unread-count", &school.student).to_request()).await;
    assert_eq!(body["data"]["unread_count"], 1);

    // 重复标记已读仍然成功
    for _ in 0..2 {
        let (status, _) = call(
            &app,
            put(&format!("/api/v1/notifications/{id}/read"), &school.student, serde_json::json!({}))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = call(&app, get("/api/v1/notifications/unread-count", &school.student).to_request()).await;
    assert_eq!(body["data"]["unread_count"], 0);
    let (_, body) = call(
        &app,
        get("/api/v1/notifications?unread_only=true", &school.student).to_request(),
    )
    .await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());

    let (status, _) = call(
        &app,
        delete(&format!("/api/v1/notifications/{id}"), &school.student).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = call(&app, get("/api/v1/notifications", &school.student).to_request()).await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
}
