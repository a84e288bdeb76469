pub mod info;
pub mod settings;
pub mod settings_cache;

pub use settings_cache::DynamicConfig;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::system::requests::{SettingAuditQuery, UpdateSettingRequest};
use crate::models::system::entities::KnownSettingKey;

lazy_service!(SystemService);

impl SystemService {
    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 公开的学校信息
    pub async fn get_info(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        info::get_info(self, request).await
    }

    // 全部可调配置
    pub async fn list_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        settings::list_settings(self, request).await
    }

    // 修改配置并刷新缓存
    pub async fn update_setting(
        &self,
        key: KnownSettingKey,
        update: UpdateSettingRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        settings::update_setting(self, key, update, request).await
    }

    // 配置修改记录
    pub async fn list_setting_audits(
        &self,
        query: SettingAuditQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        settings::list_setting_audits(self, query, request).await
    }
}
