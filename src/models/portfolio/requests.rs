use serde::Deserialize;
use ts_rs::TS;

use super::entities::PortfolioCategory;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/portfolio.ts")]
pub struct CreatePortfolioRequest {
    pub student_id: i64,
    pub title: String,
    pub category: PortfolioCategory,
    pub content: String,
    pub term: Option<String>,
    #[serde(default = "default_visible")]
    pub visible_to_parent: bool,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/portfolio.ts")]
pub struct UpdatePortfolioRequest {
    pub title: Option<String>,
    pub category: Option<PortfolioCategory>,
    pub content: Option<String>,
    pub term: Option<String>,
    pub visible_to_parent: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/portfolio.ts")]
pub struct PortfolioQuery {
    pub student_id: Option<i64>,
    pub category: Option<PortfolioCategory>,
    pub term: Option<String>,
}

/// 存储层筛选
#[derive(Debug, Clone, Default)]
pub struct PortfolioFilter {
    pub student_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub category: Option<PortfolioCategory>,
    pub term: Option<String>,
    pub parent_visible_only: bool,
}
