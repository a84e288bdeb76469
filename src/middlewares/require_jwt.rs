/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>`，通过后把当前用户写入请求扩展，
 * 处理函数用 `RequireJWT::extract_user_claims(&req)` 取出。
 *
 * ```rust,ignore
 * web::scope("/api/v1/notifications")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_notifications))
 * ```
 *
 * 用户信息缓存在 `user:{id}`，注销以及管理员修改、删除账号时删除该键。
 * 非 active 状态的账号即使持有有效 token 也会被拒绝，缓存命中时同样检查。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info, warn};

use super::create_error_response;
use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

/// 缓存中用户信息的键，按用户 ID 存放以便管理员修改账号时逐出
pub fn user_cache_key(user_id: i64) -> String {
    format!("user:{user_id}")
}

enum AuthFailure {
    Unauthorized(String),
    Disabled,
    Internal(String),
}

/// 缓存命中与否都要重新检查状态与角色
fn check_account(user: &User, token_role: &str) -> Result<(), AuthFailure> {
    if !user.is_active() {
        return Err(AuthFailure::Disabled);
    }
    // 角色变更后旧 token 作废
    if token_role != user.role.as_str() {
        return Err(AuthFailure::Unauthorized("Token role is outdated".into()));
    }
    Ok(())
}

async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<User, AuthFailure> {
    let token = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| AuthFailure::Unauthorized("Missing or invalid Authorization header".into()))?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Unauthorized("Invalid or expired token".into())
    })?;

    let user_id = claims
        .user_id()
        .map_err(|_| AuthFailure::Unauthorized("Invalid user ID in token".into()))?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| AuthFailure::Internal("Cache not configured".into()))?;

    let cache_key = user_cache_key(user_id);
    match cache.get_raw(&cache_key).await {
        CacheResult::Found(json) => match serde_json::from_str::<User>(&json) {
            Ok(user) => {
                check_account(&user, &claims.role)?;
                return Ok(user);
            }
            Err(_) => {
                cache.remove(&cache_key).await;
                debug!("Dropped undecodable cached user {}", user_id);
            }
        },
        _ => debug!("User {} not cached, loading from storage", user_id),
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| AuthFailure::Internal("Storage not configured".into()))?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| AuthFailure::Internal(format!("Failed to load user: {e}")))?
        .ok_or_else(|| AuthFailure::Unauthorized("User not found".into()))?;

    check_account(&user, &claims.role)?;

    if let Ok(user_json) = serde_json::to_string(&user) {
        cache
            .insert_raw(cache_key, user_json, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // CORS 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(HttpResponse::NoContent().finish().map_into_right_body()));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for user {}", user.id);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(failure) => {
                    let response = match failure {
                        AuthFailure::Unauthorized(reason) => {
                            info!("JWT authentication failed for {}: {}", req.path(), reason);
                            create_error_response(
                                StatusCode::UNAUTHORIZED,
                                ErrorCode::Unauthorized,
                                &format!("Unauthorized: {reason}"),
                            )
                        }
                        AuthFailure::Disabled => create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::AccountDisabled,
                            "Account is not active",
                        ),
                        AuthFailure::Internal(reason) => {
                            warn!("JWT middleware error: {}", reason);
                            create_error_response(
                                StatusCode::INTERNAL_SERVER_ERROR,
                                ErrorCode::InternalServerError,
                                "Authentication unavailable",
                            )
                        }
                    };
                    Ok(req.into_response(response.map_into_right_body()))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 取出当前用户，仅在 RequireJWT 之后的处理函数中有值
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions().get::<User>().map(|user| user.role)
    }
}
