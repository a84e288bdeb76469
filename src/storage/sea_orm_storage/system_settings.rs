//! 系统设置存储实现

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::entity::prelude::{SystemSettings, SystemSettingsAudit};
use crate::entity::{system_settings, system_settings_audit};
use crate::errors::{EduBridgeError, Result};
use crate::models::system::{
    entities::SystemSetting, requests::SettingAuditQuery, responses::SettingAuditListResponse,
};
use crate::storage::SettingsStorage;
use async_trait::async_trait;

use super::{SeaOrmStorage, page_bounds};

#[async_trait]
impl SettingsStorage for SeaOrmStorage {
    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>> {
        let settings = SystemSettings::find()
            .order_by(system_settings::Column::Key, Order::Asc)
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("获取设置列表失败: {e}")))?;

        Ok(settings.into_iter().map(|s| s.into_setting()).collect())
    }

    async fn get_setting_by_key(&self, key: &str) -> Result<Option<SystemSetting>> {
        let setting = SystemSettings::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("获取设置失败: {e}")))?;

        Ok(setting.map(|s| s.into_setting()))
    }

    async fn update_setting(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<SystemSetting> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let existing = SystemSettings::find_by_id(key.to_string())
            .one(&txn)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("获取设置失败: {e}")))?
            .ok_or_else(|| EduBridgeError::not_found(format!("配置项不存在: {key}")))?;

        let old_value = existing.value.clone();

        let mut active_model: system_settings::ActiveModel = existing.into();
        active_model.value = Set(value.to_string());
        active_model.updated_at = Set(now);
        active_model.updated_by = Set(Some(user_id));

        let updated = active_model
            .update(&txn)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("更新设置失败: {e}")))?;

        // 审计日志与设置同一事务提交
        let audit = system_settings_audit::ActiveModel {
            setting_key: Set(key.to_string()),
            old_value: Set(Some(old_value)),
            new_value: Set(value.to_string()),
            changed_by: Set(user_id),
            changed_at: Set(now),
            ip_address: Set(ip_address),
            ..Default::default()
        };

        audit
            .insert(&txn)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("创建审计日志失败: {e}")))?;

        txn.commit().await?;

        Ok(updated.into_setting())
    }

    async fn list_setting_audits(
        &self,
        query: SettingAuditQuery,
    ) -> Result<SettingAuditListResponse> {
        let (page, size) = page_bounds(query.page, query.size);

        let mut find = SystemSettingsAudit::find();

        if let Some(key) = &query.key {
            find = find.filter(system_settings_audit::Column::SettingKey.eq(key));
        }

        let find = find
            .order_by(system_settings_audit::Column::ChangedAt, Order::Desc)
            .order_by(system_settings_audit::Column::Id, Order::Desc);

        let (audits, pagination) = self.fetch_page(find, page, size).await?;

        Ok(SettingAuditListResponse {
            audits: audits.into_iter().map(|a| a.into_audit()).collect(),
            pagination,
        })
    }
}
