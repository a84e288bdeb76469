use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
};
use crate::services::{OrInternal, Reply, respond};
use crate::utils::jwt;
use crate::utils::password::{verify_against_dummy, verify_password};

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(login(service, login_request, request).await)
}

async fn login(service: &AuthService, login_request: LoginRequest, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);
    let config = service.get_config();

    let failed = || {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Username or password is incorrect",
        ))
    };

    // 1. 用户名或邮箱均可登录
    let Some(user) = storage
        .get_user_by_username_or_email(login_request.username.trim())
        .await
        .or_internal("Login failed")?
    else {
        // 不存在的用户同样付出一次 Argon2 校验的耗时
        verify_against_dummy(&login_request.password);
        return Err(failed());
    };

    // 2. 未知用户与密码错误返回相同信息
    if !verify_password(&login_request.password, &user.password_hash) {
        warn!("Failed login attempt for {}", user.username);
        return Err(failed());
    }

    // 3. 停用或封禁的账号不能登录
    if !user.is_active() {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AccountDisabled,
            format!("Account is {}", user.status),
        )));
    }

    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for {}: {}", user.username, e);
    }

    // 4. 记住我时使用更长的 refresh token 有效期
    let refresh_ttl = chrono::TimeDelta::days(if login_request.remember_me {
        config.jwt.refresh_token_remember_me_expiry
    } else {
        config.jwt.refresh_token_expiry
    });

    let token_pair = user.generate_token_pair(Some(refresh_ttl)).map_err(|e| {
        tracing::error!("Failed to generate JWT token: {}", e);
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            "Login failed, unable to generate token",
        ))
    })?;

    info!("User {} logged in as {}", user.username, user.role);

    let refresh_cookie =
        jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, refresh_ttl);

    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60,
        portal: user.role.portal_path().to_string(),
        user,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
