//! 各门户首页概览

pub mod admin;
pub mod parent;
pub mod student;
pub mod teacher;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::timetable::{
    entities::{TimetableEntry, weekday_number},
    requests::TimetableQuery,
};
use crate::services::{OrInternal, today};
use crate::storage::Storage;

/// 概览中各列表的条数上限
const UPCOMING_LIMIT: u64 = 5;

lazy_service!(DashboardService);

impl DashboardService {
    pub async fn admin_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        admin::admin_dashboard(self, request).await
    }

    pub async fn teacher_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        teacher::teacher_dashboard(self, request).await
    }

    pub async fn student_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        student::student_dashboard(self, request).await
    }

    pub async fn parent_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        parent::parent_dashboard(self, request).await
    }
}

/// 今天的课表时段
async fn today_slots(
    storage: &Arc<dyn Storage>,
    mut query: TimetableQuery,
) -> Result<Vec<TimetableEntry>, HttpResponse> {
    query.day_of_week = Some(weekday_number(today()));
    storage
        .list_timetable(query)
        .await
        .or_internal("Failed to list timetable")
}
