pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::builder::handlers as builder;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Builder sessions
        .route("/api/v1/sessions", post(builder::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(builder::handle_get_session).delete(builder::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/actions",
            post(builder::handle_dispatch_action),
        )
        .route(
            "/api/v1/sessions/:id/template",
            put(builder::handle_select_template),
        )
        .route("/api/v1/sessions/:id/step", put(builder::handle_go_to_step))
        .route(
            "/api/v1/sessions/:id/step/next",
            post(builder::handle_next_step),
        )
        .route(
            "/api/v1/sessions/:id/step/previous",
            post(builder::handle_previous_step),
        )
        .route("/api/v1/sessions/:id/save", post(builder::handle_save))
        .route("/api/v1/sessions/:id/download", post(builder::handle_download))
        .route("/api/v1/sessions/:id/upload", post(builder::handle_upload))
        // Analysis
        .route(
            "/api/v1/sessions/:id/analysis",
            post(analysis::handle_analyze).get(analysis::handle_analysis_status),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{self, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::analyzer::{interpret_reply, ResumeAnalyzer};
    use crate::analysis::models::{AnalysisError, AnalysisMode, AnalysisResult};
    use crate::builder::session::SessionStore;
    use crate::config::Config;

    /// Replies with canned model output and counts calls.
    struct CannedAnalyzer {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ResumeAnalyzer for CannedAnalyzer {
        async fn analyze(
            &self,
            _text: &str,
            mode: AnalysisMode,
        ) -> Result<AnalysisResult, AnalysisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AnalysisError::Failed {
                    mode,
                    detail: "upstream returned 500".into(),
                });
            }
            let reply = match mode {
                AnalysisMode::ExtractSkills => {
                    r#"{"technicalSkills": ["Rust", "SQL"], "softSkills": ["Leadership"]}"#
                }
                AnalysisMode::AnalyzeAts => {
                    r#"{"score": 64, "suggestions": ["Use standard section headings"]}"#
                }
            };
            interpret_reply(mode, reply)
        }
    }

    fn test_app(fail: bool) -> (Router, Arc<CannedAnalyzer>) {
        let analyzer = Arc::new(CannedAnalyzer {
            calls: AtomicUsize::new(0),
            fail,
        });
        let state = AppState {
            sessions: SessionStore::new(8),
            analyzer: analyzer.clone(),
            config: Config {
                anthropic_api_key: "test".into(),
                analysis_api_url: "http://localhost:0".into(),
                port: 0,
                max_sessions: 8,
                rust_log: "debug".into(),
            },
        };
        (build_router(state), analyzer)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json")
        };
        (status, value)
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = send(app, "POST", "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["sessionId"].as_str().expect("session id").to_string()
    }

    #[tokio::test]
    async fn health_reports_session_occupancy() {
        let (app, _) = test_app(false);
        new_session(&app).await;
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["sessions"]["active"], 1);
    }

    #[tokio::test]
    async fn new_session_starts_blank_on_template_step() {
        let (app, _) = test_app(false);
        let id = new_session(&app).await;
        let (status, body) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["step"], "template");
        assert_eq!(body["template"], "minimal");
        assert_eq!(body["draft"]["fullName"], "");
        assert_eq!(body["draft"]["experience"].as_array().unwrap().len(), 1);
        assert_eq!(body["draft"]["education"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_skill_is_conflict_and_draft_unchanged() {
        let (app, _) = test_app(false);
        let id = new_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}/actions");

        let (status, _) = send(
            &app,
            "POST",
            &uri,
            Some(json!({"type": "addSkill", "id": "1", "name": "Python"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            "POST",
            &uri,
            Some(json!({"type": "addSkill", "id": "2", "name": "python"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "DUPLICATE_SKILL");

        let (_, snapshot) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        let skills = snapshot["draft"]["skills"].as_array().unwrap();
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0]["id"], "1");
    }

    #[tokio::test]
    async fn out_of_range_index_is_bad_request() {
        let (app, _) = test_app(false);
        let id = new_session(&app).await;
        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/actions"),
            Some(json!({"type": "setEducationField", "index": 4, "field": "year", "value": "2021"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "OUT_OF_RANGE");
    }

    #[tokio::test]
    async fn step_navigation_routes() {
        let (app, _) = test_app(false);
        let id = new_session(&app).await;
        let next = format!("/api/v1/sessions/{id}/step/next");
        for _ in 0..5 {
            send(&app, "POST", &next, None).await;
        }
        let (_, body) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(body["step"], "experience");

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/step"),
            Some(json!({"step": "personal"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["step"], "personal");

        let (_, body) = send(&app, "POST", &format!("/api/v1/sessions/{id}/step/previous"), None).await;
        assert_eq!(body["step"], "template");
    }

    #[tokio::test]
    async fn placeholder_actions() {
        let (app, _) = test_app(false);
        let id = new_session(&app).await;

        let (status, body) = send(&app, "POST", &format!("/api/v1/sessions/{id}/save"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["lastSavedAt"].is_string());

        let (status, body) =
            send(&app, "POST", &format!("/api/v1/sessions/{id}/download"), None).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body["message"], "Resume download started");

        let (status, body) =
            send(&app, "POST", &format!("/api/v1/sessions/{id}/upload"), None).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        assert_eq!(body["error"]["code"], "NOT_IMPLEMENTED");
    }

    #[tokio::test]
    async fn blank_analysis_never_reaches_analyzer() {
        let (app, analyzer) = test_app(false);
        let id = new_session(&app).await;
        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/analysis"),
            Some(json!({"text": " ", "mode": "extract-skills"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "EMPTY_INPUT");
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn ats_analysis_returns_rated_report() {
        let (app, _) = test_app(false);
        let id = new_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}/analysis");
        let (status, body) = send(
            &app,
            "POST",
            &uri,
            Some(json!({"text": "Senior engineer, 8 years Rust", "mode": "analyze-ats"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "ats");
        assert_eq!(body["score"], 64);
        assert_eq!(body["rating"], "good");

        let (_, status_body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status_body["inFlight"], false);
        assert_eq!(status_body["result"]["score"], 64);
    }

    #[tokio::test]
    async fn analysis_failure_is_generic_and_recorded() {
        let (app, _) = test_app(true);
        let id = new_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}/analysis");
        let (status, body) = send(
            &app,
            "POST",
            &uri,
            Some(json!({"text": "resume", "mode": "extract-skills"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body["error"]["message"],
            "Failed to extract skills. Please try again."
        );

        let (_, status_body) = send(&app, "GET", &uri, None).await;
        assert!(status_body["result"].is_null());
        assert_eq!(
            status_body["error"],
            "Failed to extract skills. Please try again."
        );
    }

    #[tokio::test]
    async fn deleted_session_is_gone() {
        let (app, _) = test_app(false);
        let id = new_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}");
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
