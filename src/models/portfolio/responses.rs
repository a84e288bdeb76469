use serde::Serialize;
use ts_rs::TS;

use super::entities::PortfolioEntry;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/portfolio.ts")]
pub struct PortfolioListResponse {
    pub items: Vec<PortfolioEntry>,
}
