#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use serde_json::json;

use common::{PASSWORD, School, call, get, post};

#[actix_web::test]
async fn test_login_returns_token_and_portal() {
    let school = School::seed().await;
    let app = init_app!(school);

    let req = TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "student", "password": PASSWORD }))
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["portal"], "/student");
    assert!(body["data"]["access_token"].as_str().is_some());

    // 邮箱同样可以登录
    let req = TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "teacher@school.test", "password": PASSWORD }))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["portal"], "/teacher");
}

#[actix_web::test]
async fn test_login_rejects_wrong_password_and_unknown_user_alike() {
    let school = School::seed().await;
    let app = init_app!(school);

    let req = TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "student", "password": "wrong-password" }))
        .to_request();
    let (status, wrong) = call(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "nobody", "password": PASSWORD }))
        .to_request();
    let (status, unknown) = call(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong["message"], unknown["message"]);
}

#[actix_web::test]
async fn test_portal_guards() {
    let school = School::seed().await;
    let app = init_app!(school);

    let req = TestRequest::get().uri("/api/v1/admin/users").to_request();
    let (status, _) = call(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(&app, get("/api/v1/admin/users", &school.student).to_request()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 管理员不走教师门户
    let (status, _) = call(&app, get("/api/v1/teacher/classes", &school.admin).to_request()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(&app, get("/api/v1/admin/users", &school.admin).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 5);
}

#[actix_web::test]
async fn test_me_and_profile() {
    let school = School::seed().await;
    let app = init_app!(school);

    let (status, body) = call(&app, get("/api/v1/auth/me", &school.parent).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "parent");

    let (status, body) = call(&app, get("/api/v1/profile", &school.parent).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["children"].as_array().unwrap().len(), 1);

    let (status, _) = call(
        &app,
        post("/api/v1/auth/logout", &school.parent, json!({})).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
