use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub attachment_url: Option<String>,
    pub due_at: DateTime<Utc>,
    pub max_marks: f64,
    pub allow_late: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

string_enum! {
    /// 学生视角的提交状态
    #[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
    pub enum SubmissionStatus {
        NotSubmitted => "not_submitted",
        Submitted => "submitted",
        Late => "late",
        Graded => "graded",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: Option<String>,
    pub attachment_url: Option<String>,
    pub status: SubmissionStatus,
    pub is_late: bool,
    pub submitted_at: DateTime<Utc>,
    pub marks: Option<f64>,
    pub feedback: Option<String>,
    pub graded_by: Option<i64>,
    pub graded_at: Option<DateTime<Utc>>,
}

/// 提交被拒绝的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionRejection {
    /// 内容与附件都为空
    Empty,
    /// 已过截止时间且不允许迟交
    Closed,
    /// 已批改，不可再次提交
    AlreadyGraded,
}

impl Assignment {
    /// 判定一次提交：返回是否迟交，或拒绝原因
    pub fn check_submission(
        &self,
        content: Option<&str>,
        attachment_url: Option<&str>,
        existing: Option<&Submission>,
        now: DateTime<Utc>,
    ) -> Result<bool, SubmissionRejection> {
        let has_content = content.is_some_and(|c| !c.trim().is_empty());
        let has_attachment = attachment_url.is_some_and(|u| !u.trim().is_empty());
        if !has_content && !has_attachment {
            return Err(SubmissionRejection::Empty);
        }
        if existing.is_some_and(|s| s.status == SubmissionStatus::Graded) {
            return Err(SubmissionRejection::AlreadyGraded);
        }
        let late = now > self.due_at;
        if late && !self.allow_late {
            return Err(SubmissionRejection::Closed);
        }
        Ok(late)
    }
}

/// 分数必须在 0..=max 之间
pub fn marks_in_range(marks: f64, max: f64) -> bool {
    marks.is_finite() && (0.0..=max).contains(&marks)
}

/// 学生视角状态：没有提交记录即为未提交
pub fn student_status(submission: Option<&Submission>) -> SubmissionStatus {
    submission.map_or(SubmissionStatus::NotSubmitted, |s| s.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn assignment(due_in: Duration, allow_late: bool) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: 1,
            class_id: 1,
            subject_id: 1,
            teacher_id: 1,
            title: "Essay".into(),
            description: None,
            attachment_url: None,
            due_at: now + due_in,
            max_marks: 20.0,
            allow_late,
            created_at: now,
            updated_at: now,
        }
    }

    fn submission(status: SubmissionStatus) -> Submission {
        Submission {
            id: 1,
            assignment_id: 1,
            student_id: 2,
            content: Some("draft".into()),
            attachment_url: None,
            status,
            is_late: false,
            submitted_at: Utc::now(),
            marks: None,
            feedback: None,
            graded_by: None,
            graded_at: None,
        }
    }

    #[test]
    fn test_on_time_submission() {
        let a = assignment(Duration::hours(1), false);
        assert_eq!(a.check_submission(Some("answer"), None, None, Utc::now()), Ok(false));
    }

    #[test]
    fn test_empty_submission_rejected() {
        let a = assignment(Duration::hours(1), false);
        assert_eq!(
            a.check_submission(Some("   "), Some(""), None, Utc::now()),
            Err(SubmissionRejection::Empty)
        );
    }

    #[test]
    fn test_late_submission_rules() {
        let closed = assignment(Duration::hours(-1), false);
        assert_eq!(
            closed.check_submission(None, Some("https://x/y.pdf"), None, Utc::now()),
            Err(SubmissionRejection::Closed)
        );

        let open = assignment(Duration::hours(-1), true);
        assert_eq!(
            open.check_submission(None, Some("https://x/y.pdf"), None, Utc::now()),
            Ok(true)
        );
    }

    #[test]
    fn test_resubmission_after_grading_rejected() {
        let a = assignment(Duration::hours(1), false);
        let graded = submission(SubmissionStatus::Graded);
        assert_eq!(
            a.check_submission(Some("v2"), None, Some(&graded), Utc::now()),
            Err(SubmissionRejection::AlreadyGraded)
        );
        let pending = submission(SubmissionStatus::Submitted);
        assert_eq!(a.check_submission(Some("v2"), None, Some(&pending), Utc::now()), Ok(false));
    }

    #[test]
    fn test_marks_in_range() {
        assert!(marks_in_range(0.0, 20.0));
        assert!(marks_in_range(20.0, 20.0));
        assert!(!marks_in_range(20.5, 20.0));
        assert!(!marks_in_range(-1.0, 20.0));
        assert!(!marks_in_range(f64::NAN, 20.0));
    }

    #[test]
    fn test_student_status() {
        assert_eq!(student_status(None), SubmissionStatus::NotSubmitted);
        let s = submission(SubmissionStatus::Late);
        assert_eq!(student_status(Some(&s)), SubmissionStatus::Late);
    }
}
