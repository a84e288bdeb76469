use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::{DynamicConfig, SystemService};
use crate::models::{ApiResponse, AppStartTime, system::responses::SchoolInfoResponse};

/// 学校名称、学年等公开信息，登录页使用
pub async fn get_info(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| (chrono::Utc::now() - start.start_datetime).num_seconds())
        .unwrap_or_default();

    let response = SchoolInfoResponse {
        school_name: DynamicConfig::school_name().await,
        academic_year: DynamicConfig::academic_year().await,
        current_term: DynamicConfig::current_term().await,
        environment: config.app.environment.clone(),
        uptime_seconds,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "School info retrieved")))
}
