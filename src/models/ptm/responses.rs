use serde::Serialize;
use ts_rs::TS;

use super::entities::PtmBooking;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ptm.ts")]
pub struct PtmBookingView {
    pub booking: PtmBooking,
    pub parent_name: String,
    pub teacher_name: String,
    pub student_name: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ptm.ts")]
pub struct PtmListResponse {
    pub items: Vec<PtmBookingView>,
}
