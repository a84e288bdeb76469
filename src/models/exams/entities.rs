use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
    pub enum ExamStatus {
        Draft => "draft",
        Published => "published",
    }
}

string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
    pub enum QuestionType {
        Mcq => "mcq",
        TrueFalse => "true_false",
        ShortAnswer => "short_answer",
    }
}

string_enum! {
    /// 作答状态：in_progress → submitted → graded
    #[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
    pub enum AttemptStatus {
        InProgress => "in_progress",
        Submitted => "submitted",
        Graded => "graded",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct Exam {
    pub id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub instructions: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: ExamStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamQuestion {
    pub id: i64,
    pub exam_id: i64,
    pub question_type: QuestionType,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: Option<String>,
    pub marks: f64,
    pub position: i32,
}

/// 学生作答时看到的题目，不含答案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct PublicQuestion {
    pub id: i64,
    pub question_type: QuestionType,
    pub prompt: String,
    pub options: Vec<String>,
    pub marks: f64,
    pub position: i32,
}

impl From<&ExamQuestion> for PublicQuestion {
    fn from(q: &ExamQuestion) -> Self {
        Self {
            id: q.id,
            question_type: q.question_type,
            prompt: q.prompt.clone(),
            options: q.options.clone(),
            marks: q.marks,
            position: q.position,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamAttempt {
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub status: AttemptStatus,
    pub started_at: DateTime<Utc>,
    pub deadline_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub score: Option<f64>,
    pub auto_submitted: bool,
    pub graded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamAnswer {
    pub id: i64,
    pub attempt_id: i64,
    pub question_id: i64,
    pub answer: String,
    pub is_correct: Option<bool>,
    pub awarded_marks: Option<f64>,
    pub feedback: Option<String>,
    pub saved_at: DateTime<Utc>,
}

/// 无法开始考试的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamUnavailable {
    NotPublished,
    NotStarted,
    Ended,
}

impl ExamUnavailable {
    pub fn message(&self) -> &'static str {
        match self {
            ExamUnavailable::NotPublished => "Exam is not published",
            ExamUnavailable::NotStarted => "Exam has not started yet",
            ExamUnavailable::Ended => "Exam window has ended",
        }
    }
}

impl Exam {
    /// 开考窗口 [start_at, end_at)
    pub fn check_available(&self, now: DateTime<Utc>) -> Result<(), ExamUnavailable> {
        if self.status != ExamStatus::Published {
            return Err(ExamUnavailable::NotPublished);
        }
        if now < self.start_at {
            return Err(ExamUnavailable::NotStarted);
        }
        if now >= self.end_at {
            return Err(ExamUnavailable::Ended);
        }
        Ok(())
    }

    /// 作答截止 = min(开始时间 + 时长, 考试结束时间)
    pub fn attempt_deadline(&self, started_at: DateTime<Utc>) -> DateTime<Utc> {
        let by_duration = started_at + Duration::minutes(self.duration_minutes as i64);
        by_duration.min(self.end_at)
    }
}

/// 校验考试时间参数
pub fn validate_exam_window(
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    duration_minutes: i32,
) -> Result<(), String> {
    if start_at >= end_at {
        return Err("start_at must be before end_at".to_string());
    }
    if duration_minutes <= 0 {
        return Err("duration_minutes must be positive".to_string());
    }
    Ok(())
}

impl ExamAttempt {
    /// 剩余作答秒数，不小于 0
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.deadline_at - now).num_seconds().max(0)
    }

    /// 是否仍在保存宽限期内
    pub fn accepts_answers(&self, now: DateTime<Utc>, grace_secs: i64) -> bool {
        self.status == AttemptStatus::InProgress
            && now <= self.deadline_at + Duration::seconds(grace_secs.max(0))
    }

    /// 进行中但宽限期已过，需要自动交卷
    pub fn needs_auto_submit(&self, now: DateTime<Utc>, grace_secs: i64) -> bool {
        self.status == AttemptStatus::InProgress && !self.accepts_answers(now, grace_secs)
    }
}

fn normalize_answer(value: &str) -> String {
    value.trim().to_lowercase()
}

/// 校验题目定义，返回规范化后的 (options, correct_answer)
pub fn validate_question(
    question_type: QuestionType,
    options: &[String],
    correct_answer: Option<&str>,
    marks: f64,
) -> Result<(Vec<String>, Option<String>), String> {
    if !(marks.is_finite() && marks > 0.0) {
        return Err("marks must be greater than 0".to_string());
    }
    match question_type {
        QuestionType::Mcq => {
            let options: Vec<String> = options
                .iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if options.len() < 2 {
                return Err("Multiple choice questions need at least two options".to_string());
            }
            let answer = correct_answer
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .ok_or("Multiple choice questions need a correct answer")?;
            let matched = options
                .iter()
                .find(|o| normalize_answer(o) == normalize_answer(answer))
                .ok_or("Correct answer must be one of the options")?;
            Ok((options.clone(), Some(matched.clone())))
        }
        QuestionType::TrueFalse => {
            let answer = correct_answer
                .map(normalize_answer)
                .filter(|a| a == "true" || a == "false")
                .ok_or("True/false questions need 'true' or 'false' as answer")?;
            Ok((vec!["true".to_string(), "false".to_string()], Some(answer)))
        }
        QuestionType::ShortAnswer => Ok((
            Vec::new(),
            correct_answer
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
        )),
    }
}

/// 单题评分结果
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerGrade {
    pub question_id: i64,
    pub is_correct: Option<bool>,
    /// None 表示待教师批改
    pub awarded_marks: Option<f64>,
}

impl ExamQuestion {
    /// 客观题自动判分（忽略首尾空白与大小写），主观题返回 None
    pub fn auto_grade(&self, answer: &str) -> Option<bool> {
        match self.question_type {
            QuestionType::ShortAnswer => None,
            QuestionType::Mcq | QuestionType::TrueFalse => {
                let expected = self.correct_answer.as_deref()?;
                Some(normalize_answer(expected) == normalize_answer(answer))
            }
        }
    }
}

/// 交卷时对全部作答自动评分
///
/// 返回每个已作答题目的评分，以及是否还有需人工批改的简答题。
pub fn grade_answers(questions: &[ExamQuestion], answers: &[ExamAnswer]) -> (Vec<AnswerGrade>, bool) {
    let mut grades = Vec::with_capacity(answers.len());
    let mut needs_manual = false;
    for answer in answers {
        let Some(question) = questions.iter().find(|q| q.id == answer.question_id) else {
            continue;
        };
        match question.auto_grade(&answer.answer) {
            Some(correct) => grades.push(AnswerGrade {
                question_id: question.id,
                is_correct: Some(correct),
                awarded_marks: Some(if correct { question.marks } else { 0.0 }),
            }),
            None if answer.answer.trim().is_empty() => grades.push(AnswerGrade {
                question_id: question.id,
                is_correct: None,
                awarded_marks: Some(0.0),
            }),
            None => {
                needs_manual = true;
                grades.push(AnswerGrade {
                    question_id: question.id,
                    is_correct: None,
                    awarded_marks: None,
                });
            }
        }
    }
    (grades, needs_manual)
}

/// 所有已评分答案的得分合计
pub fn total_score(answers: &[ExamAnswer]) -> f64 {
    answers.iter().filter_map(|a| a.awarded_marks).sum()
}

pub fn total_marks(questions: &[ExamQuestion]) -> f64 {
    questions.iter().map(|q| q.marks).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exam(status: ExamStatus, start_offset: i64, end_offset: i64, duration: i32) -> Exam {
        let now = Utc::now();
        Exam {
            id: 1,
            class_id: 1,
            subject_id: 1,
            teacher_id: 1,
            title: "Unit test".into(),
            instructions: None,
            start_at: now + Duration::minutes(start_offset),
            end_at: now + Duration::minutes(end_offset),
            duration_minutes: duration,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn question(id: i64, kind: QuestionType, correct: Option<&str>, marks: f64) -> ExamQuestion {
        ExamQuestion {
            id,
            exam_id: 1,
            question_type: kind,
            prompt: "?".into(),
            options: vec!["Paris".into(), "Rome".into()],
            correct_answer: correct.map(str::to_string),
            marks,
            position: id as i32,
        }
    }

    fn answer(question_id: i64, value: &str) -> ExamAnswer {
        ExamAnswer {
            id: question_id,
            attempt_id: 1,
            question_id,
            answer: value.into(),
            is_correct: None,
            awarded_marks: None,
            feedback: None,
            saved_at: Utc::now(),
        }
    }

    #[test]
    fn test_exam_availability() {
        let now = Utc::now();
        assert_eq!(
            exam(ExamStatus::Draft, -10, 60, 30).check_available(now),
            Err(ExamUnavailable::NotPublished)
        );
        assert_eq!(
            exam(ExamStatus::Published, 10, 60, 30).check_available(now),
            Err(ExamUnavailable::NotStarted)
        );
        assert_eq!(
            exam(ExamStatus::Published, -60, -1, 30).check_available(now),
            Err(ExamUnavailable::Ended)
        );
        assert!(exam(ExamStatus::Published, -1, 60, 30).check_available(now).is_ok());
    }

    #[test]
    fn test_deadline_is_capped_by_end() {
        let e = exam(ExamStatus::Published, -10, 20, 60);
        let now = Utc::now();
        assert_eq!(e.attempt_deadline(now), e.end_at);

        let e = exam(ExamStatus::Published, -10, 120, 30);
        assert_eq!(e.attempt_deadline(now), now + Duration::minutes(30));
    }

    #[test]
    fn test_grace_window() {
        let now = Utc::now();
        let attempt = ExamAttempt {
            id: 1,
            exam_id: 1,
            student_id: 1,
            status: AttemptStatus::InProgress,
            started_at: now - Duration::minutes(30),
            deadline_at: now - Duration::seconds(10),
            submitted_at: None,
            score: None,
            auto_submitted: false,
            graded_at: None,
        };
        assert_eq!(attempt.remaining_seconds(now), 0);
        assert!(attempt.accepts_answers(now, 30));
        assert!(!attempt.accepts_answers(now, 5));
        assert!(attempt.needs_auto_submit(now, 5));

        let submitted = ExamAttempt {
            status: AttemptStatus::Submitted,
            ..attempt
        };
        assert!(!submitted.accepts_answers(now, 30));
        assert!(!submitted.needs_auto_submit(now, 0));
    }

    #[test]
    fn test_validate_exam_window() {
        let now = Utc::now();
        assert!(validate_exam_window(now, now + Duration::hours(1), 30).is_ok());
        assert!(validate_exam_window(now, now, 30).is_err());
        assert!(validate_exam_window(now, now + Duration::hours(1), 0).is_err());
    }

    #[test]
    fn test_validate_mcq() {
        let options = vec!["Paris".to_string(), " Rome ".to_string(), "".to_string()];
        let (opts, correct) =
            validate_question(QuestionType::Mcq, &options, Some("rome"), 2.0).unwrap();
        assert_eq!(opts, vec!["Paris", "Rome"]);
        assert_eq!(correct.as_deref(), Some("Rome"));

        assert!(validate_question(QuestionType::Mcq, &options, Some("Berlin"), 2.0).is_err());
        assert!(validate_question(QuestionType::Mcq, &options[..1], Some("Paris"), 2.0).is_err());
        assert!(validate_question(QuestionType::Mcq, &options, None, 2.0).is_err());
        assert!(validate_question(QuestionType::Mcq, &options, Some("Paris"), 0.0).is_err());
    }

    #[test]
    fn test_validate_true_false_and_short_answer() {
        let (opts, correct) =
            validate_question(QuestionType::TrueFalse, &[], Some(" TRUE "), 1.0).unwrap();
        assert_eq!(opts, vec!["true", "false"]);
        assert_eq!(correct.as_deref(), Some("true"));
        assert!(validate_question(QuestionType::TrueFalse, &[], Some("yes"), 1.0).is_err());

        let (opts, correct) =
            validate_question(QuestionType::ShortAnswer, &["x".into()], Some("  "), 5.0).unwrap();
        assert!(opts.is_empty());
        assert!(correct.is_none());
    }

    #[test]
    fn test_auto_grade_is_case_and_space_insensitive() {
        let q = question(1, QuestionType::Mcq, Some("Paris"), 2.0);
        assert_eq!(q.auto_grade("  paris "), Some(true));
        assert_eq!(q.auto_grade("Rome"), Some(false));
        let sa = question(2, QuestionType::ShortAnswer, Some("photosynthesis"), 5.0);
        assert_eq!(sa.auto_grade("photosynthesis"), None);
    }

    #[test]
    fn test_grade_answers() {
        let questions = vec![
            question(1, QuestionType::Mcq, Some("Paris"), 2.0),
            question(2, QuestionType::TrueFalse, Some("false"), 1.0),
            question(3, QuestionType::ShortAnswer, None, 5.0),
        ];
        let answers = vec![answer(1, "paris"), answer(2, "true"), answer(3, "Because...")];
        let (grades, needs_manual) = grade_answers(&questions, &answers);
        assert!(needs_manual);
        assert_eq!(grades[0].awarded_marks, Some(2.0));
        assert_eq!(grades[1].awarded_marks, Some(0.0));
        assert_eq!(grades[1].is_correct, Some(false));
        assert_eq!(grades[2].awarded_marks, None);

        let (_, needs_manual) = grade_answers(&questions, &[answer(1, "Paris"), answer(3, " ")]);
        assert!(!needs_manual);
    }

    #[test]
    fn test_totals() {
        let questions = vec![
            question(1, QuestionType::Mcq, Some("Paris"), 2.0),
            question(2, QuestionType::ShortAnswer, None, 5.5),
        ];
        assert_eq!(total_marks(&questions), 7.5);
        let mut a1 = answer(1, "Paris");
        a1.awarded_marks = Some(2.0);
        let mut a2 = answer(2, "text");
        a2.awarded_marks = Some(3.5);
        assert_eq!(total_score(&[a1, a2]), 5.5);
    }
}
