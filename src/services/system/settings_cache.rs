//! 动态配置缓存
//!
//! 启动时从 system_settings 表加载，管理员修改后热更新。
//! 未加载或值无法解析时回退到 `AppConfig` 中的静态配置。

use std::collections::HashMap;
use std::sync::OnceLock;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::models::system::entities::KnownSettingKey;

static DYNAMIC_CONFIG: OnceLock<RwLock<DynamicConfigCache>> = OnceLock::new();

#[derive(Debug, Default)]
struct DynamicConfigCache {
    settings: HashMap<String, String>,
    initialized: bool,
}

/// 动态配置访问接口
pub struct DynamicConfig;

impl DynamicConfig {
    /// 用数据库中的全部配置替换缓存
    pub async fn init(settings: Vec<(String, String)>) {
        let cache = DYNAMIC_CONFIG.get_or_init(|| RwLock::new(DynamicConfigCache::default()));

        let mut guard = cache.write().await;
        guard.settings = settings.into_iter().collect();
        guard.initialized = true;

        tracing::info!(
            "Dynamic config initialized with {} settings",
            guard.settings.len()
        );
    }

    /// 更新单个配置项
    pub async fn update(key: &str, value: &str) {
        if let Some(cache) = DYNAMIC_CONFIG.get() {
            let mut guard = cache.write().await;
            guard.settings.insert(key.to_string(), value.to_string());
            tracing::debug!("Dynamic config updated: {} = {}", key, value);
        }
    }

    async fn get_string(key: KnownSettingKey) -> Option<String> {
        let cache = DYNAMIC_CONFIG.get()?;
        let guard = cache.read().await;
        guard.settings.get(key.as_str()).cloned()
    }

    async fn get_parsed<T: std::str::FromStr>(key: KnownSettingKey) -> Option<T> {
        Self::get_string(key).await.and_then(|v| v.parse().ok())
    }

    pub async fn school_name() -> String {
        Self::get_string(KnownSettingKey::SchoolName)
            .await
            .unwrap_or_else(|| AppConfig::get().school.name.clone())
    }

    pub async fn academic_year() -> String {
        Self::get_string(KnownSettingKey::AcademicYear)
            .await
            .unwrap_or_else(|| AppConfig::get().school.academic_year.clone())
    }

    pub async fn current_term() -> String {
        Self::get_string(KnownSettingKey::CurrentTerm)
            .await
            .unwrap_or_else(|| AppConfig::get().school.current_term.clone())
    }

    /// 截止后仍接受自动保存的秒数
    pub async fn exam_autosave_grace_secs() -> i64 {
        Self::get_parsed(KnownSettingKey::ExamAutosaveGraceSecs)
            .await
            .unwrap_or_else(|| AppConfig::get().school.exam_autosave_grace_secs)
    }

    /// 家长会默认时长（分钟）
    pub async fn ptm_default_duration() -> i32 {
        Self::get_parsed(KnownSettingKey::PtmDefaultDuration)
            .await
            .unwrap_or_else(|| AppConfig::get().school.ptm_default_duration)
    }

    /// 出勤率预警阈值（百分比）
    pub async fn attendance_warning_threshold() -> f64 {
        Self::get_parsed(KnownSettingKey::AttendanceWarningThreshold)
            .await
            .unwrap_or_else(|| AppConfig::get().school.attendance_warning_threshold)
    }

    pub async fn is_initialized() -> bool {
        match DYNAMIC_CONFIG.get() {
            Some(cache) => cache.read().await.initialized,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_and_update() {
        DynamicConfig::init(vec![
            ("school.name".to_string(), "Riverside High".to_string()),
            ("school.exam_autosave_grace_secs".to_string(), "45".to_string()),
        ])
        .await;
        assert!(DynamicConfig::is_initialized().await);
        assert_eq!(DynamicConfig::school_name().await, "Riverside High");
        assert_eq!(DynamicConfig::exam_autosave_grace_secs().await, 45);

        DynamicConfig::update("school.ptm_default_duration", "30").await;
        assert_eq!(DynamicConfig::ptm_default_duration().await, 30);
    }
}
