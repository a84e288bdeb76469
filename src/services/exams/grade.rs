use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::lifecycle::settle;
use super::{ExamService, own_exam};
use crate::models::exams::{
    entities::{AttemptStatus, ExamQuestion, QuestionType},
    requests::{AnswerGradeInput, GradeAttemptRequest},
};
use crate::models::notifications::{entities::NotificationType, requests::NewNotification};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::notify;
use crate::services::{OrInternal, Reply, bad_request, conflict, current_user, not_found, respond};

pub async fn grade_attempt(
    service: &ExamService,
    attempt_id: i64,
    grades: GradeAttemptRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(grade(service, attempt_id, grades, request).await)
}

/// 只有简答题需要人工评分，分数在 0 到题目分值之间
fn check_grade(questions: &[ExamQuestion], grade: &AnswerGradeInput) -> Result<(), HttpResponse> {
    let question = questions
        .iter()
        .find(|q| q.id == grade.question_id)
        .ok_or_else(|| {
            bad_request(
                ErrorCode::ExamQuestionNotFound,
                format!("Question {} does not belong to this exam", grade.question_id),
            )
        })?;

    if question.question_type != QuestionType::ShortAnswer {
        return Err(bad_request(
            ErrorCode::ExamQuestionInvalid,
            format!("Question {} is graded automatically", question.id),
        ));
    }

    if !(0.0..=question.marks).contains(&grade.awarded_marks) {
        return Err(bad_request(
            ErrorCode::MarksOutOfRange,
            format!("Marks for question {} must be between 0 and {}", question.id, question.marks),
        ));
    }

    Ok(())
}

async fn grade(
    service: &ExamService,
    attempt_id: i64,
    request_body: GradeAttemptRequest,
    request: &HttpRequest,
) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);
    let now = Utc::now();

    if request_body.grades.is_empty() {
        return Err(bad_request(ErrorCode::BadRequest, "No grades provided"));
    }

    let attempt = storage
        .get_attempt_by_id(attempt_id)
        .await
        .or_internal("Failed to get attempt")?
        .ok_or_else(|| not_found(ErrorCode::ExamAttemptNotFound, "Attempt not found"))?;
    let exam = own_exam(&storage, teacher.id, attempt.exam_id).await?;

    let attempt = settle(&storage, attempt, now).await?;
    if attempt.status == AttemptStatus::InProgress {
        return Err(conflict(
            ErrorCode::Conflict,
            "The attempt is still in progress",
        ));
    }

    let questions = storage
        .list_questions(exam.id)
        .await
        .or_internal("Failed to load questions")?;
    for grade in &request_body.grades {
        check_grade(&questions, grade)?;
    }

    let was_graded = attempt.status == AttemptStatus::Graded;
    let updated = storage
        .grade_attempt_answers(attempt.id, request_body.grades, now)
        .await
        .or_internal("Failed to grade attempt")?;

    info!(
        "Teacher {} graded attempt {} (score {:?}, status {})",
        teacher.username, updated.id, updated.score, updated.status
    );

    if !was_graded && updated.status == AttemptStatus::Graded {
        notify(
            &storage,
            &[updated.student_id],
            NewNotification::new(
                NotificationType::ExamGraded,
                format!("Exam graded: {}", exam.title),
            )
            .content(format!("Your score: {:.1}", updated.score.unwrap_or(0.0)))
            .reference("exam_attempt", updated.id),
        )
        .await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Attempt graded")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, kind: QuestionType) -> ExamQuestion {
        ExamQuestion {
            id,
            exam_id: 1,
            question_type: kind,
            prompt: "Explain".into(),
            options: vec![],
            correct_answer: None,
            marks: 5.0,
            position: 1,
        }
    }

    fn input(question_id: i64, marks: f64) -> AnswerGradeInput {
        AnswerGradeInput {
            question_id,
            awarded_marks: marks,
            feedback: None,
        }
    }

    #[test]
    fn test_check_grade() {
        let qs = vec![question(1, QuestionType::ShortAnswer), question(2, QuestionType::Mcq)];

        assert!(check_grade(&qs, &input(1, 0.0)).is_ok());
        assert!(check_grade(&qs, &input(1, 5.0)).is_ok());
        assert!(check_grade(&qs, &input(1, 5.5)).is_err());
        assert!(check_grade(&qs, &input(1, -1.0)).is_err());
        assert!(check_grade(&qs, &input(1, f64::NAN)).is_err());
        // 客观题不接受人工评分
        assert!(check_grade(&qs, &input(2, 1.0)).is_err());
        assert!(check_grade(&qs, &input(9, 1.0)).is_err());
    }
}
