use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    /// 用户角色，每个用户只有一个角色
    #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
    pub enum UserRole {
        Admin => "admin",
        Teacher => "teacher",
        Student => "student",
        Parent => "parent",
    }
}

impl UserRole {
    /// 登录后前端跳转的门户路径
    pub fn portal_path(&self) -> &'static str {
        match self {
            UserRole::Admin => "/admin",
            UserRole::Teacher => "/teacher",
            UserRole::Student => "/student",
            UserRole::Parent => "/parent",
        }
    }
}

string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
    pub enum UserStatus {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// 展示名，未设置时回退到用户名
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            self.role.as_str(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

/// 学生档案（学籍信息）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct StudentProfile {
    pub user_id: i64,
    pub class_id: Option<i64>,
    pub roll_number: Option<i32>,
    pub admission_no: Option<String>,
    pub date_of_birth: Option<String>,
}

/// 家长与学生的关联
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct ParentLink {
    pub parent_id: i64,
    pub student_id: i64,
    pub relationship: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 学生概要（名单、子女列表等场景）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct StudentSummary {
    pub user_id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub class_id: Option<i64>,
    pub class_name: Option<String>,
    pub roll_number: Option<i32>,
    pub admission_no: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_strings() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), *role);
        }
        assert!("user".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serde() {
        let role: UserRole = serde_json::from_str("\"parent\"").unwrap();
        assert_eq!(role, UserRole::Parent);
        assert_eq!(serde_json::to_string(&UserRole::Teacher).unwrap(), "\"teacher\"");
        assert!(serde_json::from_str::<UserRole>("\"root\"").is_err());
    }

    #[test]
    fn test_portal_paths() {
        assert_eq!(UserRole::Parent.portal_path(), "/parent");
        assert_eq!(UserRole::Admin.portal_path(), "/admin");
    }
}
