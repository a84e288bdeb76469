use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::UserService;
use super::students::check_student_input;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::UserRole,
        requests::{CreateUserRequest, NewUser},
        responses::CreateUserResponse,
    },
};
use crate::services::{OrInternal, Reply, bad_request, conflict, non_blank, respond};
use crate::utils::generate_temporary_password;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    validate_email, validate_password_simple, validate_phone, validate_username,
};

const TEMPORARY_PASSWORD_LENGTH: usize = 12;

pub async fn create_user(
    service: &UserService,
    user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(create(service, user_data, request).await)
}

async fn create(service: &UserService, user_data: CreateUserRequest, request: &HttpRequest) -> Reply {
    let username = user_data.username.trim().to_string();
    let email = user_data.email.trim().to_lowercase();

    // 验证用户名
    validate_username(&username).map_err(|msg| bad_request(ErrorCode::UserNameInvalid, msg))?;

    // 验证邮箱
    validate_email(&email).map_err(|msg| bad_request(ErrorCode::UserEmailInvalid, msg))?;

    let phone = non_blank(user_data.phone);
    if let Some(phone) = &phone {
        validate_phone(phone).map_err(|msg| bad_request(ErrorCode::BadRequest, msg))?;
    }

    // 未提供密码时生成临时密码，只在本次响应中返回
    let (password, temporary_password) = match non_blank(user_data.password) {
        Some(password) => {
            validate_password_simple(&password)
                .map_err(|msg| bad_request(ErrorCode::PasswordPolicyViolation, msg))?;
            (password, None)
        }
        None => {
            let generated = generate_temporary_password(TEMPORARY_PASSWORD_LENGTH);
            (generated.clone(), Some(generated))
        }
    };

    let storage = service.get_storage(request);

    if user_data.role == UserRole::Student {
        if let Some(input) = &user_data.student {
            check_student_input(&storage, input).await?;
        }
    }

    // 分别检查用户名与邮箱，给出准确的错误码
    if storage
        .get_user_by_username(&username)
        .await
        .or_internal("User creation failed")?
        .is_some()
    {
        return Err(conflict(ErrorCode::UserNameAlreadyExists, "Username already exists"));
    }
    if storage
        .get_user_by_email(&email)
        .await
        .or_internal("User creation failed")?
        .is_some()
    {
        return Err(conflict(ErrorCode::UserEmailAlreadyExists, "Email already exists"));
    }

    let password_hash = hash_password(&password).or_internal("Password hashing failed")?;

    let user = storage
        .create_user(NewUser {
            username,
            email,
            password_hash,
            role: user_data.role,
            display_name: non_blank(user_data.display_name),
            phone,
        })
        .await
        .or_conflict(
            ErrorCode::UserNameAlreadyExists,
            "Username or email already exists",
            "User creation failed",
        )?;

    // 学生同时建立学籍
    let student = if user.role == UserRole::Student {
        let saved = storage
            .upsert_student_profile(user.id, user_data.student.unwrap_or_default())
            .await;

        // 学籍写入失败时撤销用户，避免留下没有学籍的学生
        if saved.is_err() {
            warn!("Rolling back user {} after student profile failure", user.username);
            if let Err(e) = storage.delete_user(user.id).await {
                warn!("Failed to roll back user {}: {}", user.id, e);
            }
        }

        Some(saved.or_conflict(
            ErrorCode::AdmissionNoAlreadyExists,
            "Admission number already exists",
            "Student profile creation failed",
        )?)
    } else {
        None
    };

    info!("Created {} account {}", user.role, user.username);

    Ok(HttpResponse::Created().json(ApiResponse::success(
        CreateUserResponse {
            user,
            student,
            temporary_password,
        },
        "User created",
    )))
}
