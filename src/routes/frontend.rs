//! 前端静态资源路由
//!
//! 四个门户共用一个 SPA，构建产物由 rust-embed 在编译时嵌入。
//! 客户端路由（`/admin/...`、`/parent/...` 等）统一回退到 index.html；
//! 未匹配的 `/api/` 路径返回 JSON 404，不回退。
//! `./frontend-custom/` 下的同名文件优先，便于学校替换 logo 等资源。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

use crate::models::{ApiResponse, ErrorCode};
use crate::services::system::DynamicConfig;

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

const INDEX: &str = "index.html";
const CUSTOM_DIR: &str = "./frontend-custom";

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}

/// SPA 构建产物中会出现的类型；附件以 URL 形式外链，不经过这里
fn content_type(path: &str) -> &'static str {
    match extension(path) {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" | "webmanifest" => "application/json; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// 带 hash 的构建产物可长期缓存，index.html 与清单每次重新获取
fn is_immutable(path: &str) -> bool {
    matches!(
        extension(path),
        "js" | "mjs" | "css" | "woff" | "woff2" | "ttf" | "png" | "jpg" | "jpeg" | "svg" | "webp"
    )
}

/// 注入学校名称；`%BASE_PATH%` 为空表示部署在根路径
fn process_html(content: &[u8], school_name: &str) -> Vec<u8> {
    String::from_utf8_lossy(content)
        .replace("%BASE_PATH%", "")
        .replace("%SCHOOL_NAME%", school_name)
        .into_bytes()
}

/// 拒绝 `..` 等越出自定义目录的路径
fn is_safe_relative(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, std::path::Component::Normal(_)))
}

fn load(path: &str) -> Option<Vec<u8>> {
    let custom = is_safe_relative(path)
        .then(|| std::fs::read(Path::new(CUSTOM_DIR).join(path)).ok())
        .flatten();

    custom.or_else(|| FrontendAssets::get(path).map(|f| f.data.to_vec()))
}

/// 解析请求路径到实际文件；未命中的客户端路由回退到 index.html
fn resolve(path: &str) -> (&str, Option<Vec<u8>>) {
    if !path.is_empty()
        && let Some(data) = load(path)
    {
        return (path, Some(data));
    }
    (INDEX, load(INDEX))
}

fn is_api_path(path: &str) -> bool {
    path == "api" || path.starts_with("api/")
}

const MISSING_BUNDLE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>EduBridge</title>
</head>
<body>
    <h1>EduBridge portal is not built</h1>
    <p>The API is running, but no frontend bundle was embedded.</p>
    <pre>cd frontend && bun run build</pre>
</body>
</html>"#;

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    if is_api_path(path) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            format!("No API route for /{path}"),
        )));
    }

    let (file, content) = resolve(path);
    let Some(mut data) = content else {
        return Ok(HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(MISSING_BUNDLE));
    };

    let mime = content_type(file);
    if mime.starts_with("text/html") {
        data = process_html(&data, &DynamicConfig::school_name().await);
    }

    let cache_control = if is_immutable(file) {
        "public, max-age=31536000, immutable"
    } else {
        "no-cache, no-store, must-revalidate"
    };

    Ok(HttpResponse::Ok()
        .content_type(mime)
        .insert_header(("Cache-Control", cache_control))
        .body(data))
}

/// 必须最后注册，兜底所有未被 API 作用域匹配的 GET 请求
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    #[::core::prelude::v1::test]
    fn test_content_type() {
        assert_eq!(content_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(content_type("assets/app.mjs"), "application/javascript; charset=utf-8");
        assert_eq!(content_type("manifest.webmanifest"), "application/json; charset=utf-8");
        assert_eq!(content_type("report.pdf"), "application/octet-stream");
    }

    #[::core::prelude::v1::test]
    fn test_process_html_replaces_placeholders() {
        let html = b"<title>%SCHOOL_NAME%</title><base href=\"%BASE_PATH%/\">";
        let out = String::from_utf8(process_html(html, "Springfield High")).unwrap();
        assert_eq!(out, "<title>Springfield High</title><base href=\"/\">");
    }

    #[::core::prelude::v1::test]
    fn test_immutable_assets() {
        assert!(is_immutable("assets/index-3f2a.js"));
        assert!(is_immutable("logo.svg"));
        assert!(!is_immutable("index.html"));
        assert!(!is_immutable("manifest.webmanifest"));
    }

    #[::core::prelude::v1::test]
    fn test_custom_paths_stay_inside_directory() {
        assert!(is_safe_relative("assets/logo.png"));
        assert!(!is_safe_relative("../config.toml"));
        assert!(!is_safe_relative("/etc/passwd"));
    }

    #[actix_web::test]
    async fn test_unknown_api_path_is_json_404() {
        let app = test::init_service(App::new().configure(configure_frontend_routes)).await;
        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/nope").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::NotFound as i32);
    }
}
