//! 家长会预约
//!
//! 家长发起，教师批准、拒绝、改期或完成，家长接受或拒绝改期、取消。
//! 每次状态变更都会通知另一方。

pub mod create;
pub mod list;
pub mod transition;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ptm::{
    entities::{PtmAction, PtmActor},
    requests::{CreatePtmRequest, PtmListParams, PtmNoteRequest, RescheduleRequest},
};

lazy_service!(PtmService);

impl PtmService {
    pub async fn create_booking(
        &self,
        booking: CreatePtmRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_booking(self, booking, request).await
    }

    pub async fn list_bookings(
        &self,
        actor: PtmActor,
        query: PtmListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_bookings(self, actor, query, request).await
    }

    /// 教师：approve / reject / complete；家长：accept / decline / cancel
    pub async fn act(
        &self,
        booking_id: i64,
        actor: PtmActor,
        action: PtmAction,
        note: PtmNoteRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        transition::transition(self, booking_id, actor, action, note.note, None, request).await
    }

    pub async fn reschedule(
        &self,
        booking_id: i64,
        reschedule: RescheduleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        transition::transition(
            self,
            booking_id,
            PtmActor::Teacher,
            PtmAction::Reschedule,
            reschedule.note,
            Some(reschedule.proposed_at),
            request,
        )
        .await
    }
}
