//! 校园活动

pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::events::requests::{CreateEventRequest, EventListParams, UpdateEventRequest};

lazy_service!(EventService);

impl EventService {
    pub async fn list_events(
        &self,
        query: EventListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_events(self, query, request).await
    }

    pub async fn create_event(
        &self,
        event: CreateEventRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_event(self, event, request).await
    }

    pub async fn update_event(
        &self,
        event_id: i64,
        update: UpdateEventRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_event(self, event_id, update, request).await
    }

    pub async fn delete_event(&self, event_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_event(self, event_id, request).await
    }
}
