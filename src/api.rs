//! JSON HTTP surface for the browser front end.
//!
//! One route per user interaction: login, the creation form, the per-task
//! update panel, the admin grid, the dashboards, and the export download.
//! Rendering happens client-side; these handlers only move table state.
//!
//! Session state is a token-to-identity map held in process memory. A token
//! carries nothing but `{email, role}`; everything else is re-read from the
//! files on every request, mirroring the original rerun-per-interaction
//! model.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth;
use crate::config::Config;
use crate::error::{Error, JsonError, Result};
use crate::export::{visible_csv, EXPORT_FILE_NAME};
use crate::model::{Role, Session, Task, TaskDraft};
use crate::ops;
use crate::report;
use crate::store::{TaskStore, UserStore};
use crate::table::Table;
use crate::view::visible_tasks;

/// Shared application state behind every handler
pub struct AppState {
    pub config: Config,
    pub tasks: TaskStore,
    pub users: UserStore,
    sessions: Mutex<HashMap<String, Session>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let tasks = TaskStore::new(config.files.tasks.clone(), config.auth.variant);
        let users = UserStore::new(
            config.files.users.clone(),
            config.auth.variant,
            &config.auth.shared_password,
        );
        Self {
            config,
            tasks,
            users,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn open_session(&self, session: Session) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions
            .lock()
            .expect("session map poisoned")
            .insert(token.clone(), session);
        token
    }

    fn close_session(&self, token: &str) {
        self.sessions
            .lock()
            .expect("session map poisoned")
            .remove(token);
    }

    /// Resolve the caller's identity from the Authorization header
    fn session(&self, headers: &HeaderMap) -> Result<Session> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(Error::NotLoggedIn)?;
        self.sessions
            .lock()
            .expect("session map poisoned")
            .get(token)
            .cloned()
            .ok_or(Error::NotLoggedIn)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(JsonError::from(&self))).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let mut routes = Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/:id/status", post(update_status))
        .route("/api/tasks/:id/assignee", post(reassign))
        .route("/api/tasks/:id/reminder", post(set_reminder))
        .route("/api/summary", get(summary))
        .route("/api/aging", get(aging))
        .route("/api/performance", get(performance))
        .route("/api/assignee-status", get(assignee_status))
        .route("/api/export", get(export));

    if state.config.auth.variant.supports_bulk_edit() {
        routes = routes.route("/api/tasks/bulk", post(bulk_save));
    }
    if state.config.auth.variant.supports_password_change() {
        routes = routes.route("/api/password", post(change_password));
    }

    routes.with_state(state)
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    #[serde(default)]
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
    email: String,
    role: Role,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let session = auth::login(
        &state.config.auth,
        &state.users,
        &request.email,
        request.password.as_deref(),
    )?;
    info!(email = %session.email, role = session.role.as_str(), "login");
    let response = LoginResponse {
        email: session.email.clone(),
        role: session.role,
        token: state.open_session(session),
    };
    Ok(Json(response))
}

async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> StatusCode {
    if let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
    {
        state.close_session(token);
    }
    StatusCode::NO_CONTENT
}

#[derive(Debug, Deserialize)]
struct PasswordRequest {
    new_password: String,
}

async fn change_password(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<PasswordRequest>,
) -> Result<StatusCode> {
    let session = state.session(&headers)?;
    auth::change_password(
        &state.config.auth,
        &state.users,
        &session,
        &request.new_password,
    )?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_tasks(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Task>>> {
    let session = state.session(&headers)?;
    let table = state.tasks.load()?;
    let tasks = Task::all_from(&table);
    Ok(Json(visible_tasks(
        &tasks,
        &session,
        state.config.auth.variant,
    )))
}

#[derive(Debug, Serialize)]
struct CreateResponse {
    id: i64,
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(draft): Json<TaskDraft>,
) -> Result<Json<CreateResponse>> {
    let session = state.session(&headers)?;
    let id = ops::create_task(&state.tasks, &session, &draft)?;
    Ok(Json(CreateResponse { id }))
}

#[derive(Debug, Deserialize)]
struct StatusUpdateRequest {
    status: String,
    #[serde(default)]
    completion_remarks: String,
}

async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<StatusCode> {
    let session = state.session(&headers)?;
    ops::update_status(
        &state.tasks,
        &session,
        id,
        &request.status,
        &request.completion_remarks,
    )?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct ReassignRequest {
    assigned_to: String,
}

async fn reassign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<ReassignRequest>,
) -> Result<StatusCode> {
    let session = state.session(&headers)?;
    ops::reassign(&state.tasks, &session, id, &request.assigned_to)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_reminder(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode> {
    let session = state.session(&headers)?;
    ops::set_reminder(&state.tasks, &session, id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn bulk_save(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(grid): Json<Table>,
) -> Result<StatusCode> {
    let session = state.session(&headers)?;
    ops::bulk_save(&state.tasks, &session, &grid)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn summary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<report::Summary>> {
    let session = state.session(&headers)?;
    let variant = state.config.auth.variant;
    let table = state.tasks.load()?;
    let visible = visible_tasks(&Task::all_from(&table), &session, variant);
    Ok(Json(report::summary(&visible, variant)))
}

async fn aging(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<report::AgingRow>>> {
    let session = state.session(&headers)?;
    let variant = state.config.auth.variant;
    let table = state.tasks.load()?;
    let visible = visible_tasks(&Task::all_from(&table), &session, variant);
    Ok(Json(report::aging_table(
        &visible,
        Local::now().date_naive(),
    )))
}

// Both rankings below read the full table regardless of the caller's role;
// the original exposed them that way.

async fn performance(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<report::PerformanceRow>>> {
    state.session(&headers)?;
    let table = state.tasks.load()?;
    Ok(Json(report::performance(
        &Task::all_from(&table),
        state.config.auth.variant,
    )))
}

async fn assignee_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<report::AssigneeStatusCount>>> {
    state.session(&headers)?;
    let table = state.tasks.load()?;
    Ok(Json(report::assignee_status_counts(&Task::all_from(
        &table,
    ))))
}

async fn export(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Result<Response> {
    let session = state.session(&headers)?;
    let table = state.tasks.load()?;
    let csv = visible_csv(&table, &session, state.config.auth.variant);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
