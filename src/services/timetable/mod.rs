pub mod create;
pub mod delete;
pub mod list;
pub mod update;
pub mod view;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ErrorCode;
use crate::models::timetable::{
    entities::{TimetableSlot, find_conflict, normalize_slot_times},
    requests::{SlotRequest, TimetableQuery},
};
use crate::models::users::entities::UserRole;
use crate::services::access::require_user_with_role;
use crate::services::{OrInternal, bad_request, conflict, not_found};
use crate::storage::Storage;

lazy_service!(TimetableService);

impl TimetableService {
    pub async fn list_slots(
        &self,
        query: TimetableQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_slots(self, query, request).await
    }

    pub async fn create_slot(
        &self,
        slot: SlotRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_slot(self, slot, request).await
    }

    pub async fn update_slot(
        &self,
        slot_id: i64,
        slot: SlotRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_slot(self, slot_id, slot, request).await
    }

    pub async fn delete_slot(&self, slot_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_slot(self, slot_id, request).await
    }

    // 教师或学生本人的课表
    pub async fn my_timetable(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        view::my_timetable(self, request).await
    }

    // 家长查看子女所在班级的课表
    pub async fn child_timetable(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        view::child_timetable(self, student_id, request).await
    }
}

/// 校验时段并检查冲突，返回时间已规范化的请求
///
/// `slot_id` 为更新时的时段 ID，冲突检测时跳过自身。
async fn prepare_slot(
    storage: &Arc<dyn Storage>,
    slot_id: i64,
    slot: SlotRequest,
) -> Result<SlotRequest, HttpResponse> {
    let (start_time, end_time) = normalize_slot_times(slot.day_of_week, &slot.start_time, &slot.end_time)
        .map_err(|msg| bad_request(ErrorCode::TimetableInvalidTime, msg))?;

    storage
        .get_class_by_id(slot.class_id)
        .await
        .or_internal("Failed to get class")?
        .ok_or_else(|| not_found(ErrorCode::ClassNotFound, "Class not found"))?;
    storage
        .get_subject_by_id(slot.subject_id)
        .await
        .or_internal("Failed to get subject")?
        .ok_or_else(|| not_found(ErrorCode::SubjectNotFound, "Subject not found"))?;
    require_user_with_role(storage, slot.teacher_id, UserRole::Teacher).await?;

    let candidate = TimetableSlot {
        id: slot_id,
        class_id: slot.class_id,
        subject_id: slot.subject_id,
        teacher_id: slot.teacher_id,
        day_of_week: slot.day_of_week,
        start_time: start_time.clone(),
        end_time: end_time.clone(),
        room: None,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    };

    let same_day = storage
        .list_day_slots(slot.day_of_week, slot.class_id, slot.teacher_id)
        .await
        .or_internal("Failed to load timetable")?;

    if let Some(found) = find_conflict(&candidate, &same_day) {
        return Err(conflict(ErrorCode::TimetableConflict, found.describe()));
    }

    Ok(SlotRequest {
        start_time,
        end_time,
        room: crate::services::non_blank(slot.room),
        ..slot
    })
}
