//! 统一错误处理模块
//!
//! 内部层（存储、缓存、配置、启动流程）使用 `EduBridgeError`，
//! HTTP 层再将其映射为 `ApiResponse` 与业务错误码。

use std::fmt;

/// 定义错误类型的宏
///
/// 为每个变体生成错误代码、类型名称、详情访问器以及 snake_case 构造函数。
macro_rules! define_edubridge_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum EduBridgeError {
            $($variant(String),)*
        }

        impl EduBridgeError {
            pub fn code(&self) -> &'static str {
                match self {
                    $(EduBridgeError::$variant(_) => $code,)*
                }
            }

            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EduBridgeError::$variant(_) => $type_name,)*
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $(EduBridgeError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl EduBridgeError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EduBridgeError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_edubridge_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Io("E006", "IO Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Conflict"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
}

impl EduBridgeError {
    /// 彩色输出（开发环境启动失败时使用）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为唯一约束冲突
    pub fn is_conflict(&self) -> bool {
        matches!(self, EduBridgeError::Conflict(_))
    }
}

impl fmt::Display for EduBridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EduBridgeError {}

impl From<sea_orm::DbErr> for EduBridgeError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 唯一约束冲突单独归类，服务层据此返回 409
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) = err.sql_err() {
            return EduBridgeError::Conflict(msg);
        }
        EduBridgeError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for EduBridgeError {
    fn from(err: std::io::Error) -> Self {
        EduBridgeError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EduBridgeError {
    fn from(err: serde_json::Error) -> Self {
        EduBridgeError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for EduBridgeError {
    fn from(err: chrono::ParseError) -> Self {
        EduBridgeError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EduBridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EduBridgeError::cache_connection("x").code(), "E001");
        assert_eq!(EduBridgeError::database_config("x").code(), "E003");
        assert_eq!(EduBridgeError::validation("x").code(), "E007");
        assert_eq!(EduBridgeError::conflict("x").code(), "E010");
        assert_eq!(EduBridgeError::authentication("x").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            EduBridgeError::not_found("x").error_type(),
            "Resource Not Found"
        );
        assert_eq!(EduBridgeError::io("x").error_type(), "IO Error");
    }

    #[test]
    fn test_format_simple() {
        let err = EduBridgeError::validation("end_time must be after start_time");
        let formatted = err.format_simple();
        assert!(formatted.starts_with("Validation Error"));
        assert!(formatted.contains("end_time"));
        assert_eq!(err.to_string(), formatted);
    }

    #[test]
    fn test_conflict_detection() {
        assert!(EduBridgeError::conflict("dup").is_conflict());
        assert!(!EduBridgeError::validation("dup").is_conflict());
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let converted: EduBridgeError = err.into();
        assert_eq!(converted.code(), "E009");
    }
}
