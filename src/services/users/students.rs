use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;

use super::UserService;
use crate::models::users::{entities::UserRole, requests::StudentProfileInput};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::require_user_with_role;
use crate::services::{OrInternal, Reply, bad_request, not_found, respond};
use crate::storage::Storage;

pub async fn update_student_profile(
    service: &UserService,
    student_id: i64,
    input: StudentProfileInput,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(update(service, student_id, input, request).await)
}

/// 学籍字段校验：班级存在、学号为正、出生日期格式正确
pub(crate) async fn check_student_input(
    storage: &Arc<dyn Storage>,
    input: &StudentProfileInput,
) -> Result<(), HttpResponse> {
    if let Some(class_id) = input.class_id {
        storage
            .get_class_by_id(class_id)
            .await
            .or_internal("Failed to get class")?
            .ok_or_else(|| not_found(ErrorCode::ClassNotFound, format!("Class {class_id} not found")))?;
    }

    if input.roll_number.is_some_and(|n| n <= 0) {
        return Err(bad_request(ErrorCode::BadRequest, "Roll number must be positive"));
    }

    if let Some(dob) = &input.date_of_birth {
        NaiveDate::parse_from_str(dob, "%Y-%m-%d").map_err(|_| {
            bad_request(ErrorCode::BadRequest, "Date of birth must be YYYY-MM-DD")
        })?;
    }

    Ok(())
}

async fn update(
    service: &UserService,
    student_id: i64,
    input: StudentProfileInput,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    require_user_with_role(&storage, student_id, UserRole::Student).await?;
    check_student_input(&storage, &input).await?;

    let profile = storage
        .upsert_student_profile(student_id, input)
        .await
        .or_conflict(
            ErrorCode::AdmissionNoAlreadyExists,
            "Admission number already exists",
            "Failed to update student profile",
        )?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "Student profile updated")))
}
