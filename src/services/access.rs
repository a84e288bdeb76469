//! 跨门户共用的访问校验与名称补全
//!
//! 校验函数在不满足条件时直接给出 4xx 响应，调用方用 `?` 提前返回。

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, warn};

use super::{OrInternal, bad_request, forbidden, not_found};
use crate::cache::ObjectCache;
use crate::middlewares::require_jwt::user_cache_key;
use crate::models::ErrorCode;
use crate::models::notifications::requests::NewNotification;
use crate::models::users::entities::{StudentSummary, User, UserRole};
use crate::storage::Storage;

/// 校验教师教授该班级（subject_id 给定时还须教授该科目）
pub(crate) async fn require_teaches(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
    class_id: i64,
    subject_id: Option<i64>,
) -> Result<(), HttpResponse> {
    let teaches = storage
        .teacher_teaches(teacher_id, class_id, subject_id)
        .await
        .or_internal("Failed to check teaching assignment")?;

    if teaches {
        Ok(())
    } else {
        Err(forbidden(
            ErrorCode::NotTeachingClass,
            "You do not teach this class or subject",
        ))
    }
}

/// 指定 ID 的用户必须存在且为给定角色
pub(crate) async fn require_user_with_role(
    storage: &Arc<dyn Storage>,
    user_id: i64,
    role: UserRole,
) -> Result<User, HttpResponse> {
    let user = storage
        .get_user_by_id(user_id)
        .await
        .or_internal("Failed to get user")?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, format!("User {user_id} not found")))?;

    if user.role != role {
        return Err(bad_request(
            ErrorCode::UserRoleMismatch,
            format!("User {user_id} is not a {role}"),
        ));
    }

    Ok(user)
}

/// 学生本人的学籍摘要
pub(crate) async fn own_student(
    storage: &Arc<dyn Storage>,
    student_id: i64,
) -> Result<StudentSummary, HttpResponse> {
    storage
        .get_student_summary(student_id)
        .await
        .or_internal("Failed to get student profile")?
        .ok_or_else(|| not_found(ErrorCode::StudentProfileNotFound, "Student profile not found"))
}

/// 家长只能访问已关联的子女
pub(crate) async fn require_child(
    storage: &Arc<dyn Storage>,
    parent_id: i64,
    student_id: i64,
) -> Result<StudentSummary, HttpResponse> {
    let linked = storage
        .is_parent_of(parent_id, student_id)
        .await
        .or_internal("Failed to check parent link")?;

    if !linked {
        return Err(forbidden(
            ErrorCode::StudentNotAccessible,
            "This student is not linked to your account",
        ));
    }

    own_student(storage, student_id).await
}

/// 教师只能访问其任课班级的学生
pub(crate) async fn require_taught_student(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
    student_id: i64,
) -> Result<StudentSummary, HttpResponse> {
    let student = own_student(storage, student_id).await?;

    let Some(class_id) = student.class_id else {
        return Err(forbidden(
            ErrorCode::StudentNotAccessible,
            "Student is not assigned to a class",
        ));
    };

    let teaches = storage
        .teacher_teaches(teacher_id, class_id, None)
        .await
        .or_internal("Failed to check teaching assignment")?;

    if !teaches {
        return Err(forbidden(
            ErrorCode::StudentNotAccessible,
            "You do not teach this student",
        ));
    }

    Ok(student)
}

/// 用户可见的班级：学生本班，家长子女所在班级，教师任课班级
pub(crate) async fn visible_class_ids(
    storage: &Arc<dyn Storage>,
    user: &User,
) -> Result<Vec<i64>, HttpResponse> {
    let mut ids: Vec<i64> = match user.role {
        UserRole::Admin => Vec::new(),
        UserRole::Teacher => storage
            .list_teacher_classes(user.id)
            .await
            .or_internal("Failed to list classes")?
            .into_iter()
            .map(|c| c.id)
            .collect(),
        UserRole::Student => storage
            .get_student_profile(user.id)
            .await
            .or_internal("Failed to get student profile")?
            .and_then(|p| p.class_id)
            .into_iter()
            .collect(),
        UserRole::Parent => storage
            .list_children(user.id)
            .await
            .or_internal("Failed to list children")?
            .into_iter()
            .filter_map(|c| c.student.class_id)
            .collect(),
    };

    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

/// 用户 ID 到展示名
pub(crate) async fn user_names(
    storage: &Arc<dyn Storage>,
    ids: &[i64],
) -> Result<HashMap<i64, String>, HttpResponse> {
    let users = storage
        .get_users_by_ids(ids)
        .await
        .or_internal("Failed to load users")?;

    Ok(users
        .into_iter()
        .map(|u| (u.id, u.name().to_string()))
        .collect())
}

/// 科目 ID 到名称
pub(crate) async fn subject_names(
    storage: &Arc<dyn Storage>,
    ids: &[i64],
) -> Result<HashMap<i64, String>, HttpResponse> {
    let subjects = storage
        .get_subjects_by_ids(ids)
        .await
        .or_internal("Failed to load subjects")?;

    Ok(subjects.into_iter().map(|s| (s.id, s.name)).collect())
}

pub(crate) fn name_of(names: &HashMap<i64, String>, id: i64) -> String {
    names.get(&id).cloned().unwrap_or_else(|| format!("#{id}"))
}

/// 删除认证中间件缓存的用户，下一次请求从存储重新加载
pub(crate) async fn evict_cached_user(request: &HttpRequest, user_id: i64) {
    if let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
        cache.remove(&user_cache_key(user_id)).await;
        debug!("Evicted cached user {}", user_id);
    }
}

/// 发送通知；失败只记录日志，不影响主流程
pub(crate) async fn notify(
    storage: &Arc<dyn Storage>,
    user_ids: &[i64],
    notification: NewNotification,
) {
    if user_ids.is_empty() {
        return;
    }

    let kind = notification.notification_type;
    if let Err(e) = storage.create_notifications(user_ids, notification).await {
        warn!("Failed to send {} notifications: {}", kind, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_of_falls_back_to_id() {
        let mut names = HashMap::new();
        names.insert(1, "Alice".to_string());
        assert_eq!(name_of(&names, 1), "Alice");
        assert_eq!(name_of(&names, 9), "#9");
    }
}
