use serde::Deserialize;
use ts_rs::TS;

use super::entities::NotificationType;
use crate::models::common::{PaginationQuery, deserialize_lenient_bool};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub unread_only: bool,
}

/// 待写入的通知，一次可发给多个用户
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub notification_type: NotificationType,
    pub title: String,
    pub content: Option<String>,
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
}

impl NewNotification {
    pub fn new(notification_type: NotificationType, title: impl Into<String>) -> Self {
        Self {
            notification_type,
            title: title.into(),
            content: None,
            reference_type: None,
            reference_id: None,
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn reference(mut self, kind: &str, id: i64) -> Self {
        self.reference_type = Some(kind.to_string());
        self.reference_id = Some(id);
        self
    }
}
