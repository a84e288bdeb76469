use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserRole;
use crate::string_enum;

string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
    pub enum AnnouncementAudience {
        All => "all",
        Teachers => "teachers",
        Students => "students",
        Parents => "parents",
    }
}

impl AnnouncementAudience {
    /// 该受众对应的角色；All 返回 None
    pub fn role(&self) -> Option<UserRole> {
        match self {
            AnnouncementAudience::All => None,
            AnnouncementAudience::Teachers => Some(UserRole::Teacher),
            AnnouncementAudience::Students => Some(UserRole::Student),
            AnnouncementAudience::Parents => Some(UserRole::Parent),
        }
    }

    /// 某角色可见的受众集合
    pub fn visible_to(role: UserRole) -> Vec<AnnouncementAudience> {
        match role {
            UserRole::Admin => AnnouncementAudience::ALL.to_vec(),
            UserRole::Teacher => vec![AnnouncementAudience::All, AnnouncementAudience::Teachers],
            UserRole::Student => vec![AnnouncementAudience::All, AnnouncementAudience::Students],
            UserRole::Parent => vec![AnnouncementAudience::All, AnnouncementAudience::Parents],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub audience: AnnouncementAudience,
    /// 仅对该班级相关用户可见
    pub class_id: Option<i64>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_audiences() {
        let parent = AnnouncementAudience::visible_to(UserRole::Parent);
        assert!(parent.contains(&AnnouncementAudience::All));
        assert!(parent.contains(&AnnouncementAudience::Parents));
        assert!(!parent.contains(&AnnouncementAudience::Students));
        assert_eq!(AnnouncementAudience::visible_to(UserRole::Admin).len(), 4);
    }

    #[test]
    fn test_audience_role() {
        assert_eq!(AnnouncementAudience::All.role(), None);
        assert_eq!(AnnouncementAudience::Teachers.role(), Some(UserRole::Teacher));
    }
}
