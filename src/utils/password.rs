use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use once_cell::sync::Lazy;

use crate::config::AppConfig;
use crate::errors::EduBridgeError;

/// Argon2id 哈希，参数取自 `[argon2]` 配置
pub fn hash_password(password: &str) -> Result<String, EduBridgeError> {
    let cfg = &AppConfig::get().argon2;
    let params = Params::new(cfg.memory_cost, cfg.time_cost, cfg.parallelism, None)
        .map_err(|e| EduBridgeError::validation(format!("Invalid Argon2 parameters: {e}")))?;

    let salt = SaltString::generate(&mut OsRng);
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| EduBridgeError::validation(format!("Password hashing failed: {e}")))
}

/// 参数从哈希串中读取，修改配置不影响旧密码校验
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// 与真实账号参数相同的哈希，首次使用时生成
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("unknown-account-placeholder").ok());

/// 用户不存在时也完整校验一次，响应耗时与密码错误一致
pub fn verify_against_dummy(password: &str) -> bool {
    DUMMY_HASH
        .as_deref()
        .is_some_and(|hash| verify_password(password, hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Classroom42").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Classroom42", &hash));
        assert!(!verify_password("classroom42", &hash));
    }

    #[test]
    fn test_dummy_verification_runs_argon2() {
        let hash = DUMMY_HASH.as_deref().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!verify_against_dummy("Classroom42"));
    }

    #[test]
    fn test_verify_malformed_hash() {
        assert!(!verify_password("anything", "not-a-hash"));
    }
}
