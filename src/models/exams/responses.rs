use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use super::entities::{Exam, ExamAnswer, ExamAttempt, ExamQuestion, PublicQuestion};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamSummary {
    pub exam: Exam,
    pub subject_name: String,
    pub total_marks: f64,
    pub question_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListResponse {
    pub items: Vec<ExamSummary>,
    pub pagination: PaginationInfo,
}

/// 教师查看的考试详情（含答案）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamDetail {
    pub exam: Exam,
    pub total_marks: f64,
    pub questions: Vec<ExamQuestion>,
}

/// 学生/家长视角的考试条目
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct StudentExamView {
    pub exam: Exam,
    pub subject_name: String,
    pub total_marks: f64,
    pub attempt: Option<ExamAttempt>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct StudentExamListResponse {
    pub items: Vec<StudentExamView>,
    pub pagination: PaginationInfo,
}

/// 作答会话：开始或恢复考试时返回
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct AttemptSession {
    pub attempt: ExamAttempt,
    pub exam: Exam,
    pub questions: Vec<PublicQuestion>,
    pub answers: Vec<ExamAnswer>,
    pub remaining_seconds: i64,
    pub server_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct AutosaveResponse {
    pub saved: usize,
    pub remaining_seconds: i64,
    pub saved_at: DateTime<Utc>,
}

/// 单题回顾；正确答案仅在批改完成后给出
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct AnswerReview {
    pub question: PublicQuestion,
    pub answer: Option<String>,
    pub is_correct: Option<bool>,
    pub awarded_marks: Option<f64>,
    pub feedback: Option<String>,
    pub correct_answer: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct AttemptResult {
    pub attempt: ExamAttempt,
    pub exam: Exam,
    pub total_marks: f64,
    pub answers: Vec<AnswerReview>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct AttemptWithStudent {
    pub attempt: ExamAttempt,
    pub student_name: String,
    pub roll_number: Option<i32>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct AttemptListResponse {
    pub exam: Exam,
    pub total_marks: f64,
    pub items: Vec<AttemptWithStudent>,
}

/// 教师批改视图：作答详情含正确答案
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct AttemptGradingView {
    pub attempt: ExamAttempt,
    pub student_name: String,
    pub questions: Vec<ExamQuestion>,
    pub answers: Vec<ExamAnswer>,
}
