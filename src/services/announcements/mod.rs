//! 公告：管理员面向全校，教师面向自己任课的班级

pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use std::collections::BTreeSet;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ErrorCode;
use crate::models::announcements::{
    entities::{Announcement, AnnouncementAudience},
    requests::{AnnouncementListParams, CreateAnnouncementRequest, UpdateAnnouncementRequest},
};
use crate::models::users::entities::{User, UserRole};
use crate::services::{OrInternal, forbidden, not_found};
use crate::storage::Storage;

lazy_service!(AnnouncementService);

impl AnnouncementService {
    pub async fn list_announcements(
        &self,
        query: AnnouncementListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_announcements(self, query, request).await
    }

    pub async fn create_announcement(
        &self,
        announcement: CreateAnnouncementRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_announcement(self, announcement, request).await
    }

    pub async fn update_announcement(
        &self,
        announcement_id: i64,
        update: UpdateAnnouncementRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_announcement(self, announcement_id, update, request).await
    }

    pub async fn delete_announcement(
        &self,
        announcement_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_announcement(self, announcement_id, request).await
    }
}

/// 管理员可管理全部公告，教师只能管理自己发布的
async fn manageable(
    storage: &Arc<dyn Storage>,
    user: &User,
    announcement_id: i64,
) -> Result<Announcement, HttpResponse> {
    let announcement = storage
        .get_announcement_by_id(announcement_id)
        .await
        .or_internal("Failed to get announcement")?
        .ok_or_else(|| not_found(ErrorCode::AnnouncementNotFound, "Announcement not found"))?;

    if user.role != UserRole::Admin && announcement.created_by != user.id {
        return Err(forbidden(
            ErrorCode::Forbidden,
            "You can only manage your own announcements",
        ));
    }

    Ok(announcement)
}

/// 公告的接收人：按受众角色筛选，班级公告只发给该班相关的人
async fn recipients(
    storage: &Arc<dyn Storage>,
    audience: AnnouncementAudience,
    class_id: Option<i64>,
) -> Result<Vec<i64>, HttpResponse> {
    let wants = |role: UserRole| audience.role().is_none_or(|r| r == role);

    let Some(class_id) = class_id else {
        let roles: Vec<UserRole> = [UserRole::Teacher, UserRole::Student, UserRole::Parent]
            .into_iter()
            .filter(|r| wants(*r))
            .collect();
        return storage
            .list_active_user_ids(&roles)
            .await
            .or_internal("Failed to list users");
    };

    let mut ids = BTreeSet::new();
    let students = storage
        .list_class_students(class_id)
        .await
        .or_internal("Failed to list class students")?;

    if wants(UserRole::Teacher) {
        ids.extend(
            storage
                .list_class_teachers(class_id)
                .await
                .or_internal("Failed to list class teachers")?
                .into_iter()
                .map(|t| t.id),
        );
    }
    if wants(UserRole::Student) {
        ids.extend(students.iter().map(|s| s.user_id));
    }
    if wants(UserRole::Parent) {
        for student in &students {
            ids.extend(
                storage
                    .list_parent_ids(student.user_id)
                    .await
                    .or_internal("Failed to list parents")?,
            );
        }
    }

    Ok(ids.into_iter().collect())
}
