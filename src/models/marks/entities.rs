use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 学期成绩（非考试的阶段性分数）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct TermMark {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub term: String,
    pub academic_year: String,
    pub marks: f64,
    pub max_marks: f64,
    pub remarks: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl TermMark {
    pub fn percentage(&self) -> f64 {
        percentage(self.marks, self.max_marks)
    }
}

/// 成绩单中的单科结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct SubjectResult {
    pub subject_id: i64,
    pub subject_name: String,
    pub marks: f64,
    pub max_marks: f64,
    pub percentage: f64,
    pub grade: String,
    pub remarks: Option<String>,
}

/// 成绩单
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct ReportCard {
    pub student_id: i64,
    pub term: String,
    pub academic_year: String,
    pub subjects: Vec<SubjectResult>,
    pub total_marks: f64,
    pub total_max_marks: f64,
    pub overall_percentage: f64,
    pub overall_grade: String,
}

impl ReportCard {
    /// 由某学期的成绩记录生成成绩单；`subject_name` 解析科目名
    pub fn build<F>(
        student_id: i64,
        term: &str,
        academic_year: &str,
        marks: &[TermMark],
        subject_name: F,
    ) -> Self
    where
        F: Fn(i64) -> String,
    {
        let mut subjects: Vec<SubjectResult> = marks
            .iter()
            .filter(|m| m.term == term && m.academic_year == academic_year)
            .map(|m| {
                let pct = m.percentage();
                SubjectResult {
                    subject_id: m.subject_id,
                    subject_name: subject_name(m.subject_id),
                    marks: m.marks,
                    max_marks: m.max_marks,
                    percentage: pct,
                    grade: grade_for(m.marks, m.max_marks).to_string(),
                    remarks: m.remarks.clone(),
                }
            })
            .collect();
        subjects.sort_by(|a, b| a.subject_name.cmp(&b.subject_name));

        let total_marks: f64 = subjects.iter().map(|s| s.marks).sum();
        let total_max_marks: f64 = subjects.iter().map(|s| s.max_marks).sum();
        let overall_percentage = percentage(total_marks, total_max_marks);

        Self {
            student_id,
            term: term.to_string(),
            academic_year: academic_year.to_string(),
            subjects,
            total_marks,
            total_max_marks,
            overall_percentage,
            overall_grade: grade_for(total_marks, total_max_marks).to_string(),
        }
    }
}

fn exact_percentage(marks: f64, max_marks: f64) -> f64 {
    if max_marks <= 0.0 {
        return 0.0;
    }
    marks / max_marks * 100.0
}

/// 百分比保留两位小数，满分为 0 时记为 0；仅用于展示
pub fn percentage(marks: f64, max_marks: f64) -> f64 {
    (exact_percentage(marks, max_marks) * 100.0).round() / 100.0
}

/// 按未取整的百分比定级，89.996% 仍是 A
pub fn grade_for(marks: f64, max_marks: f64) -> &'static str {
    letter_grade(exact_percentage(marks, max_marks))
}

/// 等级：A+ ≥ 90, A ≥ 80, B ≥ 70, C ≥ 60, D ≥ 50, E ≥ 40, 其余 F
pub fn letter_grade(percentage: f64) -> &'static str {
    match percentage {
        p if p >= 90.0 => "A+",
        p if p >= 80.0 => "A",
        p if p >= 70.0 => "B",
        p if p >= 60.0 => "C",
        p if p >= 50.0 => "D",
        p if p >= 40.0 => "E",
        _ => "F",
    }
}

/// 校验一条成绩
pub fn validate_mark(marks: f64, max_marks: f64) -> Result<(), String> {
    if !(max_marks.is_finite() && max_marks > 0.0) {
        return Err("max_marks must be greater than 0".to_string());
    }
    if !(marks.is_finite() && (0.0..=max_marks).contains(&marks)) {
        return Err(format!("marks must be between 0 and {max_marks}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(subject_id: i64, marks: f64, max: f64, term: &str) -> TermMark {
        let now = chrono::Utc::now();
        TermMark {
            id: subject_id,
            student_id: 7,
            subject_id,
            class_id: 1,
            teacher_id: 2,
            term: term.into(),
            academic_year: "2026-2027".into(),
            marks,
            max_marks: max,
            remarks: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_letter_grade_boundaries() {
        assert_eq!(letter_grade(100.0), "A+");
        assert_eq!(letter_grade(90.0), "A+");
        assert_eq!(letter_grade(89.99), "A");
        assert_eq!(letter_grade(80.0), "A");
        assert_eq!(letter_grade(70.0), "B");
        assert_eq!(letter_grade(60.0), "C");
        assert_eq!(letter_grade(50.0), "D");
        assert_eq!(letter_grade(40.0), "E");
        assert_eq!(letter_grade(39.9), "F");
        assert_eq!(letter_grade(0.0), "F");
    }

    #[test]
    fn test_grade_uses_unrounded_percentage() {
        assert_eq!(percentage(89.996, 100.0), 90.0);
        assert_eq!(grade_for(89.996, 100.0), "A");
        assert_eq!(grade_for(90.0, 100.0), "A+");
        assert_eq!(grade_for(5.0, 0.0), "F");

        let card = ReportCard::build(7, "term1", "2026-2027", &[mark(1, 89.996, 100.0, "term1")], |_| {
            "Mathematics".into()
        });
        assert_eq!(card.subjects[0].percentage, 90.0);
        assert_eq!(card.subjects[0].grade, "A");
        assert_eq!(card.overall_grade, "A");
    }

    #[test]
    fn test_validate_mark() {
        assert!(validate_mark(45.0, 50.0).is_ok());
        assert!(validate_mark(0.0, 50.0).is_ok());
        assert!(validate_mark(50.5, 50.0).is_err());
        assert!(validate_mark(-1.0, 50.0).is_err());
        assert!(validate_mark(10.0, 0.0).is_err());
    }

    #[test]
    fn test_report_card() {
        let marks = vec![
            mark(1, 45.0, 50.0, "term1"),
            mark(2, 30.0, 50.0, "term1"),
            mark(3, 10.0, 50.0, "term2"),
        ];
        let card = ReportCard::build(7, "term1", "2026-2027", &marks, |id| {
            if id == 1 { "Mathematics".into() } else { "English".into() }
        });
        assert_eq!(card.subjects.len(), 2);
        assert_eq!(card.subjects[0].subject_name, "English");
        assert_eq!(card.subjects[0].grade, "C");
        assert_eq!(card.subjects[1].percentage, 90.0);
        assert_eq!(card.subjects[1].grade, "A+");
        assert_eq!(card.total_marks, 75.0);
        assert_eq!(card.overall_percentage, 75.0);
        assert_eq!(card.overall_grade, "B");
    }

    #[test]
    fn test_empty_report_card() {
        let card = ReportCard::build(7, "term3", "2026-2027", &[], |_| String::new());
        assert!(card.subjects.is_empty());
        assert_eq!(card.overall_percentage, 0.0);
        assert_eq!(card.overall_grade, "F");
    }
}
