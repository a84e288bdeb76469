use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/portfolio.ts")]
    pub enum PortfolioCategory {
        Academic => "academic",
        Behaviour => "behaviour",
        CoCurricular => "co_curricular",
        Achievement => "achievement",
        Other => "other",
    }
}

/// 成长档案条目：教师维护的学生叙述性评价
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/portfolio.ts")]
pub struct PortfolioEntry {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub category: PortfolioCategory,
    pub content: String,
    pub term: Option<String>,
    pub visible_to_parent: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
