#[macro_use]
mod common;

use actix_web::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use edubridge::models::exams::entities::AttemptStatus;
use edubridge::models::exams::requests::AnswerInput;

use common::{School, call, get, post, put};

/// 草稿考试：一道选择题（2 分）与一道简答题（3 分），返回 (exam_id, mcq_id, short_id)
macro_rules! draft_exam {
    ($app:expr, $school:expr) => {{
        let now = Utc::now();
        let (status, body) = call(
            &$app,
            post(
                "/api/v1/teacher/exams",
                &$school.teacher,
                json!({
                    "class_id": $school.class_id,
                    "subject_id": $school.subject_id,
                    "title": "Unit test 1",
                    "start_at": now - Duration::minutes(5),
                    "end_at": now + Duration::hours(1),
                    "duration_minutes": 30,
                }),
            )
            .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let exam_id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = call(
            &$app,
            post(
                &format!("/api/v1/teacher/exams/{exam_id}/questions"),
                &$school.teacher,
                json!({
                    "question_type": "mcq",
                    "prompt": "2 + 2 = ?",
                    "options": ["3", "4", "5"],
                    "correct_answer": "4",
                    "marks": 2.0,
                }),
            )
            .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let mcq_id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = call(
            &$app,
            post(
                &format!("/api/v1/teacher/exams/{exam_id}/questions"),
                &$school.teacher,
                json!({
                    "question_type": "short_answer",
                    "prompt": "Explain commutativity",
                    "marks": 3.0,
                }),
            )
            .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let short_id = body["data"]["id"].as_i64().unwrap();

        (exam_id, mcq_id, short_id)
    }};
}

fn answers(items: &[(i64, &str)]) -> Value {
    json!({
        "answers": items
            .iter()
            .map(|(id, answer)| json!({ "question_id": id, "answer": answer }))
            .collect::<Vec<_>>()
    })
}

#[actix_web::test]
async fn test_exam_lifecycle() {
    let school = School::seed().await;
    let app = init_app!(school);
    let (exam_id, mcq_id, short_id) = draft_exam!(app, school);

    // 草稿对学生不可见
    let (status, _) = call(
        &app,
        post(&format!("/api/v1/student/exams/{exam_id}/start"), &school.student, json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(
        &app,
        post(&format!("/api/v1/teacher/exams/{exam_id}/publish"), &school.teacher, json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "published");

    // 已发布的题目不可再改
    let (status, _) = call(
        &app,
        put(
            &format!("/api/v1/teacher/questions/{mcq_id}"),
            &school.teacher,
            json!({ "question_type": "true_false", "prompt": "x", "correct_answer": "true", "marks": 1.0 }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(
        &app,
        post(&format!("/api/v1/student/exams/{exam_id}/start"), &school.student, json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let attempt_id = body["data"]["attempt"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["attempt"]["status"], "in_progress");
    assert!(body["data"]["remaining_seconds"].as_i64().unwrap() > 0);
    for question in body["data"]["questions"].as_array().unwrap() {
        assert!(question.get("correct_answer").is_none());
    }

    // 再次开始即恢复同一次作答
    let (status, body) = call(
        &app,
        post(&format!("/api/v1/student/exams/{exam_id}/start"), &school.student, json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attempt"]["id"].as_i64(), Some(attempt_id));

    let (status, body) = call(
        &app,
        put(
            &format!("/api/v1/student/attempts/{attempt_id}/answers"),
            &school.student,
            answers(&[(mcq_id, " 4 ")]),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["saved"], 1);

    // 不属于该考试的题目
    let (status, _) = call(
        &app,
        put(
            &format!("/api/v1/student/attempts/{attempt_id}/answers"),
            &school.student,
            answers(&[(999_999, "x")]),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 同一题重复作答
    let (status, _) = call(
        &app,
        put(
            &format!("/api/v1/student/attempts/{attempt_id}/answers"),
            &school.student,
            answers(&[(mcq_id, "3"), (mcq_id, "4")]),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 格式错误的交卷请求不能把作答提交掉
    let (status, _) = call(
        &app,
        post(
            &format!("/api/v1/student/attempts/{attempt_id}/submit"),
            &school.student,
            json!({ "answers": [{ "question_id": mcq_id, "answer": 4 }] }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &app,
        post(&format!("/api/v1/student/exams/{exam_id}/start"), &school.student, json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attempt"]["status"], "in_progress");

    let (status, body) = call(
        &app,
        post(
            &format!("/api/v1/student/attempts/{attempt_id}/submit"),
            &school.student,
            answers(&[(short_id, "a + b = b + a")]),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["attempt"]["status"], "submitted");
    // 批改完成前不公开得分与对错
    assert!(body["data"]["attempt"]["score"].is_null());
    for review in body["data"]["answers"].as_array().unwrap() {
        assert!(review["is_correct"].is_null());
        assert!(review["correct_answer"].is_null());
    }

    let (status, _) = call(
        &app,
        post(&format!("/api/v1/student/exams/{exam_id}/start"), &school.student, json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // 选择题不能手工改分，简答题不能超过满分
    let (status, _) = call(
        &app,
        put(
            &format!("/api/v1/teacher/attempts/{attempt_id}/grade"),
            &school.teacher,
            json!({ "grades": [{ "question_id": mcq_id, "awarded_marks": 2.0 }] }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        put(
            &format!("/api/v1/teacher/attempts/{attempt_id}/grade"),
            &school.teacher,
            json!({ "grades": [{ "question_id": short_id, "awarded_marks": 4.0 }] }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &app,
        put(
            &format!("/api/v1/teacher/attempts/{attempt_id}/grade"),
            &school.teacher,
            json!({ "grades": [{ "question_id": short_id, "awarded_marks": 2.5, "feedback": "Good" }] }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "graded");
    assert_eq!(body["data"]["score"].as_f64(), Some(4.5));

    let (status, body) = call(
        &app,
        get(&format!("/api/v1/student/attempts/{attempt_id}/result"), &school.student)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attempt"]["score"].as_f64(), Some(4.5));
    assert_eq!(body["data"]["total_marks"].as_f64(), Some(5.0));
    let mcq_review = body["data"]["answers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["question"]["id"].as_i64() == Some(mcq_id))
        .unwrap()
        .clone();
    assert_eq!(mcq_review["is_correct"], true);
    assert_eq!(mcq_review["correct_answer"], "4");

    // 家长查看子女成绩
    let (status, _) = call(
        &app,
        get(
            &format!("/api/v1/parent/children/{}/results/{attempt_id}", school.student.id),
            &school.parent,
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // 学生收到批改通知
    let (_, body) = call(
        &app,
        get("/api/v1/notifications/unread-count", &school.student).to_request(),
    )
    .await;
    assert!(body["data"]["unread_count"].as_i64().unwrap() >= 2);
}

#[actix_web::test]
async fn test_exam_requires_teaching_assignment() {
    let school = School::seed().await;
    let app = init_app!(school);
    let now = Utc::now();

    let (status, _) = call(
        &app,
        post(
            "/api/v1/teacher/exams",
            &school.other_teacher,
            json!({
                "class_id": school.class_id,
                "subject_id": school.subject_id,
                "title": "Not mine",
                "start_at": now,
                "end_at": now + Duration::hours(1),
                "duration_minutes": 30,
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_publish_requires_questions() {
    let school = School::seed().await;
    let app = init_app!(school);
    let now = Utc::now();

    let (_, body) = call(
        &app,
        post(
            "/api/v1/teacher/exams",
            &school.teacher,
            json!({
                "class_id": school.class_id,
                "subject_id": school.subject_id,
                "title": "Empty",
                "start_at": now,
                "end_at": now + Duration::hours(1),
                "duration_minutes": 30,
            }),
        )
        .to_request(),
    )
    .await;
    let exam_id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = call(
        &app,
        post(&format!("/api/v1/teacher/exams/{exam_id}/publish"), &school.teacher, json!({}))
            .to_request(),
    )
    .await;
    assert!(status.is_client_error());
}

#[actix_web::test]
async fn test_answers_are_not_saved_after_finalize() {
    let school = School::seed().await;
    let app = init_app!(school);
    let (exam_id, mcq_id, _) = draft_exam!(app, school);

    let (status, _) = call(
        &app,
        post(&format!("/api/v1/teacher/exams/{exam_id}/publish"), &school.teacher, json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &app,
        post(&format!("/api/v1/student/exams/{exam_id}/start"), &school.student, json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let attempt_id = body["data"]["attempt"]["id"].as_i64().unwrap();

    // 交卷先落库，随后到达的自动保存必须被拒绝
    let finished = school
        .storage
        .finalize_attempt(attempt_id, Vec::new(), AttemptStatus::Submitted, false, Utc::now())
        .await
        .unwrap();
    assert!(finished.is_some());

    let late = [AnswerInput {
        question_id: mcq_id,
        answer: "4".to_string(),
    }];
    let saved = school.storage.save_answers(attempt_id, &late).await.unwrap();
    assert_eq!(saved, None);
    assert!(school.storage.list_answers(attempt_id).await.unwrap().is_empty());

    let (status, _) = call(
        &app,
        put(
            &format!("/api/v1/student/attempts/{attempt_id}/answers"),
            &school.student,
            answers(&[(mcq_id, "4")]),
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
