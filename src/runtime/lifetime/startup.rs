//! 启动前准备：存储与迁移、学校配置、初始管理员、缓存

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{EduBridgeError, Result};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::NewUser;
use crate::services::system::DynamicConfig;
use crate::storage::Storage;
use crate::utils::generate_temporary_password;
use crate::utils::password::hash_password;
use crate::utils::validate::validate_password_simple;

/// 生成的初始管理员密码长度
const ADMIN_PASSWORD_LENGTH: usize = 16;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 依次尝试配置的缓存后端与内存缓存
fn cache_candidates(configured: &str) -> Vec<&str> {
    if configured == "moka" {
        vec!["moka"]
    } else {
        vec![configured, "moka"]
    }
}

async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let configured = AppConfig::get().cache.cache_type.as_str();

    for name in cache_candidates(configured) {
        let Some(constructor) = get_object_cache_plugin(name) else {
            warn!("Cache backend '{}' is not registered", name);
            continue;
        };

        match constructor().await {
            Ok(cache) => {
                if name != configured {
                    warn!("Using {} cache instead of {}", name, configured);
                }
                info!("Cache backend: {}", name);
                return Ok(Arc::from(cache));
            }
            Err(e) => warn!("Failed to create {} cache: {}", name, e),
        }
    }

    Err(EduBridgeError::cache_plugin_not_found(format!(
        "No cache backend available (configured: {configured})"
    )))
}

/// 数据库中的学校设置覆盖 config.toml 的 [school]
async fn load_school_settings(storage: &Arc<dyn Storage>) {
    let settings = match storage.list_all_settings().await {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Failed to load school settings, using config.toml values: {}", e);
            Vec::new()
        }
    };

    debug!("Loaded {} school settings", settings.len());
    DynamicConfig::init(settings.into_iter().map(|s| (s.key, s.value)).collect()).await;
}

/// `ADMIN_PASSWORD` 不满足密码策略时改用生成的密码
fn initial_admin_password() -> String {
    if let Ok(password) = std::env::var("ADMIN_PASSWORD") {
        match validate_password_simple(&password) {
            Ok(()) => return password,
            Err(msg) => warn!("ADMIN_PASSWORD rejected ({}), generating one instead", msg),
        }
    }

    let generated = generate_temporary_password(ADMIN_PASSWORD_LENGTH);
    warn!("==========================================================");
    warn!("  Initial admin password: {}", generated);
    warn!("  Shown once. Change it after the first login.");
    warn!("==========================================================");
    generated
}

/// 没有任何管理员时创建 `admin` 账号
async fn seed_admin(storage: &Arc<dyn Storage>) -> Result<()> {
    let admins = storage.count_users(Some(UserRole::Admin)).await?;
    if admins > 0 {
        debug!("{} admin account(s) present, skipping seed", admins);
        return Ok(());
    }

    let password_hash = hash_password(&initial_admin_password())?;
    let admin = storage
        .create_user(NewUser {
            username: "admin".to_string(),
            email: "admin@localhost".to_string(),
            password_hash,
            role: UserRole::Admin,
            display_name: Some("Administrator".to_string()),
            phone: None,
        })
        .await?;

    info!("Created initial admin account (id {})", admin.id);
    Ok(())
}

pub async fn prepare_server_startup() -> Result<StartupContext> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| EduBridgeError::validation("rustls crypto provider already installed"))?;

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
    }

    let storage = crate::storage::create_storage().await?;
    info!("Storage ready, migrations applied");

    load_school_settings(&storage).await;

    // 管理员创建失败不阻止启动，已有账号仍可登录
    if let Err(e) = seed_admin(&storage).await {
        warn!("Failed to seed admin account: {}", e);
    }

    let cache = create_cache().await?;

    Ok(StartupContext { storage, cache })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_candidates_fall_back_to_memory() {
        assert_eq!(cache_candidates("moka"), vec!["moka"]);
        assert_eq!(cache_candidates("redis"), vec!["redis", "moka"]);
    }
}
