use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct TermMarkEntry {
    pub student_id: i64,
    pub marks: f64,
    pub remarks: Option<String>,
}

/// 教师按班级+科目批量录入（覆盖同学期已有成绩）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct UpsertTermMarksRequest {
    pub class_id: i64,
    pub subject_id: i64,
    pub term: Option<String>,
    pub academic_year: Option<String>,
    pub max_marks: f64,
    pub entries: Vec<TermMarkEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct TermMarkQuery {
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub student_id: Option<i64>,
    pub term: Option<String>,
    pub academic_year: Option<String>,
}

/// 成绩单查询，缺省取当前学期
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct ReportCardQuery {
    pub term: Option<String>,
    pub academic_year: Option<String>,
}

/// 存储层写入
#[derive(Debug, Clone)]
pub struct TermMarkUpsert {
    pub student_id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub term: String,
    pub academic_year: String,
    pub marks: f64,
    pub max_marks: f64,
    pub remarks: Option<String>,
}
