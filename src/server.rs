//! HTTP layer: router, handlers, error type.
//!
//! Thin axum front over the extract/quiz/session modules. Flow:
//!   POST /      upload a PDF, generate a quiz, redirect to /quiz
//!   GET  /quiz  show the quiz form
//!   POST /quiz  score answers, redirect to /result
//!   GET  /result  show score and revision list

use crate::config::Config;
use crate::extract;
use crate::quiz;
use crate::session::{self, Session, SessionStore};
use crate::templates;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

// ============================================================================
// AppState
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: Arc::new(SessionStore::new()),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Error type
// ============================================================================

pub struct AppError(StatusCode, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({"error": self.1}))).into_response()
    }
}

impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError(StatusCode::INTERNAL_SERVER_ERROR, s)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Strip path components and anything outside [A-Za-z0-9._-] from an
/// uploaded filename.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let clean: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if clean.trim_matches(['_', '.']).is_empty() {
        "upload.pdf".to_string()
    } else {
        clean
    }
}

/// Collect `answer_<id>` form fields into an id-keyed map. Unrelated
/// fields and malformed ids are ignored.
fn answers_from_form(form: &HashMap<String, String>) -> HashMap<usize, String> {
    let mut answers = HashMap::new();
    for (key, value) in form {
        if let Some(id) = key.strip_prefix("answer_") {
            if let Ok(id) = id.parse::<usize>() {
                answers.insert(id, value.clone());
            }
        }
    }
    answers
}

fn current_session(state: &AppState, headers: &HeaderMap) -> Option<(String, Session)> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    let id = session::session_id_from_cookies(cookies)?;
    let session = state.store.get(&id)?;
    Some((id, session))
}

// ============================================================================
// Handlers
// ============================================================================

// GET /
async fn index_page(State(state): State<AppState>) -> Html<String> {
    Html(templates::render_index(&state.config.css))
}

// POST / — multipart upload with one PDF field named "studyfile".
// Missing, empty, or non-PDF uploads re-render the upload form.
async fn upload_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("studyfile") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if let Ok(bytes) = field.bytes().await {
            upload = Some((filename, bytes.to_vec()));
        }
        break;
    }

    let Some((filename, bytes)) = upload else {
        return Ok(Html(templates::render_index(&state.config.css)).into_response());
    };
    if bytes.is_empty() || !filename.to_ascii_lowercase().ends_with(".pdf") {
        println!("[POST /] Ignoring upload '{}' ({} bytes)", filename, bytes.len());
        return Ok(Html(templates::render_index(&state.config.css)).into_response());
    }

    let path = state.config.upload_dir.join(sanitize_filename(&filename));
    tokio::fs::create_dir_all(&state.config.upload_dir)
        .await
        .map_err(|e| format!("Failed to create upload directory: {}", e))?;
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| format!("Failed to save upload: {}", e))?;

    // pdf-extract is CPU-bound; keep it off the async executor.
    let text = tokio::task::spawn_blocking(move || extract::extract_text_from_bytes(&bytes))
        .await
        .map_err(|e| format!("Extraction task failed: {}", e))?
        .map_err(|e| format!("Failed to extract text: {}", e))?;

    let generated = quiz::generate_quiz(&text, state.config.max_quiz_items);
    println!(
        "[POST /] Saved {} ({} chars extracted, {} questions)",
        path.display(),
        text.len(),
        generated.len()
    );

    let fresh = Session {
        quiz: generated,
        original_text: text,
        ..Default::default()
    };

    // Reuse the browser's session id if it already has one.
    let cookies = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let id = match session::session_id_from_cookies(cookies) {
        Some(id) => {
            state.store.put(&id, fresh);
            id
        }
        None => state.store.create(fresh),
    };

    Ok((
        [(header::SET_COOKIE, session::set_cookie_value(&id))],
        Redirect::to("/quiz"),
    )
        .into_response())
}

// GET /quiz
async fn quiz_page(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let items = current_session(&state, &headers)
        .map(|(_, s)| s.quiz)
        .unwrap_or_default();
    Html(templates::render_quiz(&state.config.css, &items))
}

// POST /quiz — urlencoded answer_<id> fields.
async fn submit_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Redirect {
    if let Some((id, session)) = current_session(&state, &headers) {
        let answers = answers_from_form(&form);
        let report = quiz::score_quiz(&session.quiz, &answers);
        println!(
            "[POST /quiz] Session {} scored {}/{}",
            &id[..8.min(id.len())],
            report.score,
            report.total
        );
        state.store.update(&id, |s| {
            s.score = report.score;
            s.revision = report.revision;
        });
    }
    Redirect::to("/result")
}

// GET /result
async fn result_page(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let (score, total, revision) = match current_session(&state, &headers) {
        Some((_, s)) => (s.score, s.quiz.len(), s.revision),
        None => (0, 0, Vec::new()),
    };
    Html(templates::render_result(
        &state.config.css,
        score,
        total,
        &revision,
    ))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

// GET /health
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Router / serve
// ============================================================================

pub fn router(state: AppState) -> Router {
    let max_bytes = state.config.max_upload_bytes;
    Router::new()
        .route("/", get(index_page).post(upload_handler))
        .route("/quiz", get(quiz_page).post(submit_handler))
        .route("/result", get(result_page))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(max_bytes))
        .layer(RequestBodyLimitLayer::new(max_bytes))
        .with_state(state)
}

/// Bind and run the server until it fails or is shut down.
pub async fn serve(config: Config) -> Result<(), String> {
    let bind_addr = config.bind_addr.clone();
    std::fs::create_dir_all(&config.upload_dir)
        .map_err(|e| format!("Failed to create upload directory: {}", e))?;

    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", bind_addr, e))?;

    println!("[Server] Listening on {}", bind_addr);
    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))
}
