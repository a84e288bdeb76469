use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    // rust-embed 要求目录在编译期存在
    if !dist_path.join("index.html").exists() {
        println!("cargo:warning=frontend/dist not found, embedding a placeholder page");
        write_placeholder(&dist_path);
    }
}

fn write_placeholder(dist_path: &Path) {
    fs::create_dir_all(dist_path.join("assets")).expect("Failed to create dist directory");

    let placeholder = r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>%SCHOOL_NAME% - EduBridge</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 640px; margin: 80px auto; padding: 0 20px; }
        .notice { background: #eef4ff; border: 1px solid #c7d7fe; padding: 16px 20px; border-radius: 8px; }
        code { background: #f1f3f4; padding: 2px 6px; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>%SCHOOL_NAME%</h1>
    <div class="notice">
        <p>门户前端尚未构建，API 仍可通过 <code>/api/v1</code> 访问。</p>
        <p><code>cd frontend && bun install && bun run build</code></p>
    </div>
</body>
</html>"#;

    fs::write(dist_path.join("index.html"), placeholder)
        .expect("Failed to write placeholder index.html");
}
