use serde::Serialize;
use ts_rs::TS;

use super::entities::TermMark;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct TermMarkListResponse {
    pub items: Vec<TermMark>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct UpsertTermMarksResponse {
    pub saved: usize,
    pub items: Vec<TermMark>,
}
