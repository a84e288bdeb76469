//! 学期成绩与成绩单

pub mod list;
pub mod report_card;
pub mod upsert;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::marks::requests::{ReportCardQuery, TermMarkQuery, UpsertTermMarksRequest};
use crate::services::non_blank;
use crate::services::system::DynamicConfig;

lazy_service!(MarksService);

impl MarksService {
    pub async fn upsert_marks(
        &self,
        marks: UpsertTermMarksRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        upsert::upsert_marks(self, marks, request).await
    }

    pub async fn list_marks(
        &self,
        query: TermMarkQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_marks(self, query, request).await
    }

    pub async fn my_report_card(
        &self,
        query: ReportCardQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report_card::my_report_card(self, query, request).await
    }

    pub async fn child_report_card(
        &self,
        student_id: i64,
        query: ReportCardQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report_card::child_report_card(self, student_id, query, request).await
    }
}

/// 学期与学年缺省取当前设置
async fn term_or_current(term: Option<String>, academic_year: Option<String>) -> (String, String) {
    let term = match non_blank(term) {
        Some(term) => term,
        None => DynamicConfig::current_term().await,
    };
    let year = match non_blank(academic_year) {
        Some(year) => year,
        None => DynamicConfig::academic_year().await,
    };
    (term, year)
}
