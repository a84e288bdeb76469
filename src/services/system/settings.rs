use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{DynamicConfig, SystemService};
use crate::models::{
    ApiResponse, ErrorCode,
    system::{
        entities::KnownSettingKey,
        requests::{SettingAuditQuery, UpdateSettingRequest},
        responses::{AdminSettingsListResponse, SettingResponse},
    },
};
use crate::services::{OrInternal, Reply, bad_request, current_user, not_found, respond};

/// 获取所有可调配置
pub async fn list_settings(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(list(service, request).await)
}

/// 更新单个配置
pub async fn update_setting(
    service: &SystemService,
    key: KnownSettingKey,
    update: UpdateSettingRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(update_one(service, key, update, request).await)
}

/// 获取审计日志
pub async fn list_setting_audits(
    service: &SystemService,
    query: SettingAuditQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(audits(service, query, request).await)
}

async fn list(service: &SystemService, request: &HttpRequest) -> Reply {
    let settings = service
        .get_storage(request)
        .list_all_settings()
        .await
        .or_internal("Failed to list settings")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AdminSettingsListResponse { settings },
        "Settings retrieved",
    )))
}

async fn update_one(
    service: &SystemService,
    key: KnownSettingKey,
    update: UpdateSettingRequest,
    request: &HttpRequest,
) -> Reply {
    let admin = current_user(request)?;

    // 按配置项类型校验并规范化
    let value = key
        .validate(&update.value)
        .map_err(|msg| bad_request(ErrorCode::SettingInvalidValue, msg))?;

    let ip_address = request
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    let storage = service.get_storage(request);

    storage
        .get_setting_by_key(key.as_str())
        .await
        .or_internal("Failed to get setting")?
        .ok_or_else(|| not_found(ErrorCode::SettingNotFound, "Setting not found"))?;

    let setting = storage
        .update_setting(key.as_str(), &value, admin.id, ip_address)
        .await
        .or_internal("Failed to update setting")?;

    // 刷新内存中的配置
    DynamicConfig::update(key.as_str(), &value).await;

    info!("Setting {} changed to {} by {}", key.as_str(), value, admin.username);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SettingResponse { setting },
        "Setting updated",
    )))
}

async fn audits(service: &SystemService, query: SettingAuditQuery, request: &HttpRequest) -> Reply {
    let audits = service
        .get_storage(request)
        .list_setting_audits(query)
        .await
        .or_internal("Failed to list setting audits")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(audits, "Setting audits retrieved")))
}
