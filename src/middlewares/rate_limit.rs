/*!
 * 速率限制中间件
 *
 * 固定窗口计数，计数存放在进程内的 Moka 缓存中（多实例部署时各实例独立计数）。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::{RateLimit, RequireJWT};
 *
 * web::scope("/api/v1/student")
 *     // 先 RequireJWT 注入用户，限流才能按用户计数
 *     .wrap(RateLimit::api())
 *     .wrap(RequireJWT);
 * ```
 *
 * ## 限制规则
 *
 * - 已认证请求按用户 ID 计数，否则按客户端 IP
 * - 超过限制返回 429 与 `Retry-After`（窗口剩余秒数）
 * - 放行的响应带 `X-RateLimit-Limit` / `X-RateLimit-Remaining`
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use super::create_error_response;
use crate::models::ErrorCode;

/// 所有预设中最长的窗口，决定计数的最长保留时间
const MAX_WINDOW_SECS: u64 = 60;

/// 键为 `前缀:user:{id}` 或 `前缀:ip:{addr}`
static WINDOWS: Lazy<Cache<String, Window>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(MAX_WINDOW_SECS))
        .max_capacity(100_000)
        .build()
});

/// 一个计数窗口
#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

impl Window {
    /// 记一次请求；窗口过期则从当前时刻重新开始
    fn hit(previous: Option<Window>, now: Instant, window: Duration) -> Window {
        match previous {
            Some(w) if now.duration_since(w.started) < window => Window {
                started: w.started,
                count: w.count.saturating_add(1),
            },
            _ => Window {
                started: now,
                count: 1,
            },
        }
    }

    fn retry_after(&self, now: Instant, window: Duration) -> u64 {
        window
            .saturating_sub(now.duration_since(self.started))
            .as_secs()
            .max(1)
    }
}

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: &'static str,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64, key_prefix: &'static str) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.min(MAX_WINDOW_SECS),
            key_prefix,
        }
    }

    /// 登录：5次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, 60, "login")
    }

    /// 刷新令牌：10次/分钟/IP
    pub fn refresh_token() -> Self {
        Self::new(10, 60, "refresh")
    }

    /// 考试自动保存：60次/分钟/用户（前端约每 5 秒保存一次）
    pub fn exam_autosave() -> Self {
        Self::new(60, 60, "autosave")
    }

    /// 各门户接口：300次/分钟/用户
    pub fn api() -> Self {
        Self::new(300, 60, "api")
    }
}

/// 客户端 IP：连接信息优先，其次 X-Forwarded-For 首项，再次 X-Real-IP
fn client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ip) = connection_ip.as_deref().filter(|ip| is_valid_ip(ip)) {
        return ip.to_string();
    }

    let from_header = |name: &str, first_only: bool| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| if first_only { v.split(',').next().unwrap_or("") } else { v })
            .map(str::trim)
            .filter(|ip| is_valid_ip(ip))
            .map(str::to_string)
    };

    from_header("X-Forwarded-For", true)
        .or_else(|| from_header("X-Real-IP", false))
        .or(connection_ip)
        .unwrap_or_else(|| "unknown".to_string())
}

fn is_valid_ip(ip: &str) -> bool {
    ip.parse::<std::net::IpAddr>().is_ok()
}

fn limit_key(prefix: &str, req: &ServiceRequest) -> String {
    use crate::models::users::entities::User;

    let user_id = req.extensions().get::<User>().map(|user| user.id);
    match user_id {
        Some(id) => format!("{prefix}:user:{id}"),
        None => format!("{prefix}:ip:{}", client_ip(req)),
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let key = limit_key(limit.key_prefix, &req);
            let window = Duration::from_secs(limit.window_secs);
            let now = Instant::now();

            let current = Window::hit(WINDOWS.get(&key).await, now, window);
            WINDOWS.insert(key.clone(), current).await;

            if current.count > limit.max_requests {
                warn!("Rate limit exceeded for {} ({}/{})", key, current.count, limit.max_requests);
                let retry_after = current.retry_after(now, window);
                let mut resp = create_error_response(
                    StatusCode::TOO_MANY_REQUESTS,
                    ErrorCode::RateLimitExceeded,
                    "Too many requests, please try again later",
                );
                let headers = resp.headers_mut();
                headers.insert(
                    HeaderName::from_static("retry-after"),
                    HeaderValue::from(retry_after),
                );
                headers.insert(
                    HeaderName::from_static("x-ratelimit-remaining"),
                    HeaderValue::from(0u32),
                );
                return Ok(req.into_response(resp.map_into_right_body()));
            }

            let remaining = limit.max_requests - current.count;
            let mut res = srv.call(req).await?;
            let headers = res.headers_mut();
            headers.insert(
                HeaderName::from_static("x-ratelimit-limit"),
                HeaderValue::from(limit.max_requests),
            );
            headers.insert(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from(remaining),
            );
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    #[::core::prelude::v1::test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");

        assert_eq!(RateLimit::refresh_token().max_requests, 10);
        let autosave = RateLimit::exam_autosave();
        assert_eq!(autosave.max_requests, 60);
        assert!(RateLimit::api().max_requests > autosave.max_requests);
    }

    #[::core::prelude::v1::test]
    fn test_window_resets_after_expiry() {
        let window = Duration::from_secs(60);
        let start = Instant::now();

        let first = Window::hit(None, start, window);
        let second = Window::hit(Some(first), start + Duration::from_secs(30), window);
        assert_eq!(second.count, 2);
        assert_eq!(second.started, start);
        assert_eq!(second.retry_after(start + Duration::from_secs(30), window), 30);

        let fresh = Window::hit(Some(second), start + Duration::from_secs(61), window);
        assert_eq!(fresh.count, 1);
    }

    #[::core::prelude::v1::test]
    fn test_ip_validation() {
        assert!(is_valid_ip("10.0.0.1"));
        assert!(is_valid_ip("::1"));
        assert!(!is_valid_ip("not-an-ip"));
    }

    #[actix_web::test]
    async fn test_requests_over_limit_get_429() {
        let app = test::init_service(
            App::new().service(
                web::resource("/limited")
                    .wrap(RateLimit::new(2, 60, "unit-test"))
                    .route(web::get().to(HttpResponse::Ok)),
            ),
        )
        .await;

        let request = || {
            test::TestRequest::get()
                .uri("/limited")
                .insert_header(("X-Real-IP", "192.0.2.77"))
                .to_request()
        };

        let first = test::call_service(&app, request()).await;
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(first.headers().get("x-ratelimit-remaining").unwrap(), "1");
        assert_eq!(test::call_service(&app, request()).await.status(), StatusCode::OK);

        let blocked = test::call_service(&app, request()).await;
        assert_eq!(blocked.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(blocked.headers().contains_key("retry-after"));
    }
}
