pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::layout::handlers as layout;
use crate::parsing::handlers as parsing;
use crate::render::handlers as render;
use crate::state::AppState;

/// Uploaded résumés larger than this are rejected.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Parsing
        .route("/api/v1/resumes/parse", post(parsing::handle_parse))
        .route(
            "/api/v1/resumes/:document_id",
            get(parsing::handle_get_record).delete(parsing::handle_delete_document),
        )
        // Layout
        .route(
            "/api/v1/resumes/:document_id/layout",
            post(layout::handle_plan_layout),
        )
        // Rendering
        .route(
            "/api/v1/resumes/:document_id/render",
            post(render::handle_render),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::ScriptedInference;

    const SEGMENTS: &str = r#"{
        "candidate_name_text": "John Smith",
        "contact_info_section": "John Smith\njohn@x.com",
        "work_experience_section": "",
        "education_section": "",
        "skills_section": "Python, SQL"
    }"#;

    fn test_state(workspace: &Path, llm: ScriptedInference) -> AppState {
        AppState {
            llm: Arc::new(llm),
            config: Config {
                gemini_api_key: "test-key".to_string(),
                gemini_model: "gemini-2.5-flash".to_string(),
                gemini_layout_model: "gemini-2.5-flash-lite".to_string(),
                llm_timeout_secs: 5,
                llm_max_retries: 0,
                workspace_dir: workspace.to_path_buf(),
                pdf_export_command: None,
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    fn scripted() -> ScriptedInference {
        ScriptedInference::new()
            .reply("Segment the following", SEGMENTS)
            .reply("Parse contact information", r#"{"email": "john@x.com"}"#)
            .reply("Parse skills", r#"{"technical": ["Python", "SQL"]}"#)
    }

    fn upload_request(file_name: &str, body: &str) -> Request<Body> {
        let boundary = "XRESUMEBOUNDARY";
        let payload = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {body}\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/v1/resumes/parse")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(payload))
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn upload(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(upload_request("cv.txt", "John Smith\njohn@x.com\nPython, SQL"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        body["document_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), ScriptedInference::unreachable()));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["service"], "resumeforge");
    }

    #[tokio::test]
    async fn test_parse_then_fetch_record() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), scripted()));

        let response = app
            .clone()
            .oneshot(upload_request("cv.txt", "John Smith\njohn@x.com\nPython, SQL"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["record"]["contact_info"]["name"], "John Smith");
        assert_eq!(body["record"]["skills"]["technical"][1], "SQL");

        let id = body["document_id"].as_str().unwrap();
        assert!(dir.path().join(id).join("resume.parsed.json").exists());

        let response = app
            .oneshot(
                Request::get(format!("/api/v1/resumes/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["contact_info"]["email"], "john@x.com");
    }

    #[tokio::test]
    async fn test_unsupported_upload_is_rejected_without_storing() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), scripted()));
        let response = app
            .oneshot(upload_request("cv.rtf", "{\\rtf1 hello}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_document_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), ScriptedInference::unreachable()));
        let uri = format!("/api/v1/resumes/{}/layout", uuid::Uuid::new_v4());
        let response = app.oneshot(json_request("POST", &uri, "{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_layout_falls_back_then_hits_cache() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), scripted()));
        let id = upload(&app).await;
        let uri = format!("/api/v1/resumes/{id}/layout");

        let first = app
            .clone()
            .oneshot(json_request("POST", &uri, r#"{"style": "Modern"}"#))
            .await
            .unwrap();
        let first = body_json(first).await;
        assert_eq!(first["outcome"], "default_fallback");
        assert_eq!(first["plan"]["pages"][0]["content"][0]["data_key"], "contact_info");

        let second = app.oneshot(json_request("POST", &uri, "{}")).await.unwrap();
        let second = body_json(second).await;
        assert_eq!(second["outcome"], "cache_hit");
        assert_eq!(second["plan"], first["plan"]);
    }

    #[tokio::test]
    async fn test_render_writes_html_and_pdf_unavailable_without_converter() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), scripted()));
        let id = upload(&app).await;
        let uri = format!("/api/v1/resumes/{id}/render");

        let response = app
            .clone()
            .oneshot(json_request("POST", &uri, r#"{"style": "classic"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("<h1>John Smith</h1>"));
        assert!(html.contains("<section class=\"page\""));
        assert!(dir.path().join(&id).join("resume.parsed.html").exists());
        assert!(dir.path().join(&id).join("resume.parsed.layout.json").exists());

        let response = app
            .clone()
            .oneshot(json_request("POST", &uri, r#"{"export_pdf": true}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app
            .oneshot(json_request("POST", &uri, r#"{"style": "gothic"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_removes_all_document_files() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), scripted()));
        let id = upload(&app).await;
        let uri = format!("/api/v1/resumes/{id}");

        let response = app
            .clone()
            .oneshot(Request::delete(uri.as_str()).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(!dir.path().join(&id).exists());

        let response = app
            .oneshot(Request::get(uri.as_str()).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
