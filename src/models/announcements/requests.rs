use serde::Deserialize;
use ts_rs::TS;

use super::entities::AnnouncementAudience;
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub content: String,
    pub audience: AnnouncementAudience,
    pub class_id: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub audience: Option<AnnouncementAudience>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct AnnouncementListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

/// 存储层可见性筛选
#[derive(Debug, Clone, Default)]
pub struct AnnouncementListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// None 表示不过滤（管理员）
    pub audiences: Option<Vec<AnnouncementAudience>>,
    /// 可见的班级；班级公告只在其中时返回
    pub class_ids: Vec<i64>,
    /// 创建者本人始终可见
    pub created_by: Option<i64>,
}
