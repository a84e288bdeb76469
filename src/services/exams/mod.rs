//! 在线考试
//!
//! 教师维护草稿考试与题目，发布后题目冻结。学生作答有截止时间与保存宽限期，
//! 宽限期过后仍未交卷的作答在下次读取时自动交卷。

pub mod attempts;
pub mod create;
pub mod delete;
pub mod detail;
pub mod grade;
pub mod lifecycle;
pub mod list;
pub mod publish;
pub mod questions;
pub mod result;
pub mod start;
pub mod student_list;
pub mod submit;
pub mod update;

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ErrorCode;
use crate::models::exams::{
    entities::{Exam, ExamAttempt, ExamQuestion, ExamStatus},
    requests::{
        CreateExamRequest, ExamListParams, GradeAttemptRequest, QuestionRequest,
        SaveAnswersRequest, UpdateExamRequest,
    },
    responses::ExamSummary,
};
use crate::services::access::{name_of, subject_names};
use crate::services::{OrInternal, conflict, forbidden, not_found};
use crate::storage::Storage;

lazy_service!(ExamService);

impl ExamService {
    pub async fn create_exam(
        &self,
        exam: CreateExamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam(self, exam, request).await
    }

    pub async fn list_exams(
        &self,
        query: ExamListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_exams(self, query, request).await
    }

    pub async fn get_exam(&self, exam_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        detail::get_exam(self, exam_id, request).await
    }

    pub async fn update_exam(
        &self,
        exam_id: i64,
        update: UpdateExamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_exam(self, exam_id, update, request).await
    }

    pub async fn delete_exam(&self, exam_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_exam(self, exam_id, request).await
    }

    pub async fn publish_exam(&self, exam_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        publish::publish_exam(self, exam_id, request).await
    }

    pub async fn add_question(
        &self,
        exam_id: i64,
        question: QuestionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        questions::add_question(self, exam_id, question, request).await
    }

    pub async fn update_question(
        &self,
        question_id: i64,
        question: QuestionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        questions::update_question(self, question_id, question, request).await
    }

    pub async fn delete_question(
        &self,
        question_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        questions::delete_question(self, question_id, request).await
    }

    // 教师查看某考试的全部作答
    pub async fn list_attempts(
        &self,
        exam_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attempts::list_attempts(self, exam_id, request).await
    }

    // 教师查看单个作答（批改视图）
    pub async fn get_attempt(
        &self,
        attempt_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attempts::get_attempt(self, attempt_id, request).await
    }

    // 批改简答题
    pub async fn grade_attempt(
        &self,
        attempt_id: i64,
        grades: GradeAttemptRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_attempt(self, attempt_id, grades, request).await
    }

    // 学生开始或恢复作答
    pub async fn start_exam(&self, exam_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        start::start_exam(self, exam_id, request).await
    }

    // 自动保存
    pub async fn save_answers(
        &self,
        attempt_id: i64,
        answers: SaveAnswersRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::save_answers(self, attempt_id, answers, request).await
    }

    // 交卷
    pub async fn submit_attempt(
        &self,
        attempt_id: i64,
        answers: SaveAnswersRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_attempt(self, attempt_id, answers, request).await
    }

    // 学生查看成绩
    pub async fn get_result(&self, attempt_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        result::get_result(self, attempt_id, request).await
    }

    pub async fn get_child_result(
        &self,
        student_id: i64,
        attempt_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        result::get_child_result(self, student_id, attempt_id, request).await
    }

    pub async fn list_my_exams(
        &self,
        query: ExamListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student_list::list_my_exams(self, query, request).await
    }

    pub async fn list_child_exams(
        &self,
        student_id: i64,
        query: ExamListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student_list::list_child_exams(self, student_id, query, request).await
    }
}

/// 教师只能操作自己创建的考试
async fn own_exam(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
    exam_id: i64,
) -> Result<Exam, HttpResponse> {
    let exam = storage
        .get_exam_by_id(exam_id)
        .await
        .or_internal("Failed to get exam")?
        .ok_or_else(|| not_found(ErrorCode::ExamNotFound, "Exam not found"))?;

    if exam.teacher_id != teacher_id {
        return Err(forbidden(ErrorCode::Forbidden, "You can only manage your own exams"));
    }

    Ok(exam)
}

/// 已发布的考试不能再修改
fn require_draft(exam: &Exam) -> Result<(), HttpResponse> {
    if exam.status == ExamStatus::Draft {
        Ok(())
    } else {
        Err(conflict(
            ErrorCode::ExamNotEditable,
            "Published exams cannot be modified",
        ))
    }
}

/// 学生本人的作答
async fn own_attempt(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    attempt_id: i64,
) -> Result<ExamAttempt, HttpResponse> {
    storage
        .get_attempt_by_id(attempt_id)
        .await
        .or_internal("Failed to get attempt")?
        .filter(|a| a.student_id == student_id)
        .ok_or_else(|| not_found(ErrorCode::ExamAttemptNotFound, "Attempt not found"))
}

/// 考试列表条目：科目名、总分、题目数
async fn summarize(
    storage: &Arc<dyn Storage>,
    exams: Vec<Exam>,
) -> Result<Vec<ExamSummary>, HttpResponse> {
    let ids: Vec<i64> = exams.iter().map(|e| e.id).collect();
    let mut subject_ids: Vec<i64> = exams.iter().map(|e| e.subject_id).collect();
    subject_ids.sort_unstable();
    subject_ids.dedup();

    let subjects = subject_names(storage, &subject_ids).await?;
    let questions = questions_by_exam(storage, &ids).await?;

    Ok(exams
        .into_iter()
        .map(|exam| {
            let qs = questions.get(&exam.id);
            ExamSummary {
                subject_name: name_of(&subjects, exam.subject_id),
                total_marks: qs.map_or(0.0, |qs| qs.iter().map(|q| q.marks).sum()),
                question_count: qs.map_or(0, |qs| qs.len() as i64),
                exam,
            }
        })
        .collect())
}

async fn questions_by_exam(
    storage: &Arc<dyn Storage>,
    exam_ids: &[i64],
) -> Result<HashMap<i64, Vec<ExamQuestion>>, HttpResponse> {
    let mut grouped: HashMap<i64, Vec<ExamQuestion>> = HashMap::new();
    for question in storage
        .list_questions_for_exams(exam_ids)
        .await
        .or_internal("Failed to load questions")?
    {
        grouped.entry(question.exam_id).or_default().push(question);
    }
    Ok(grouped)
}
