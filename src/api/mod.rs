// src/api/mod.rs — HTTP adapter: one session per client, driven by events

pub mod handlers;
pub mod types;

use axum::routing::{get, post};
use axum::Router;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::infra::config::ApiConfig;
use crate::session::{Coach, Session};
pub use types::{ErrorResponse, SessionResponse};

/// Live sessions keyed by id. Each session has its own async lock so one
/// client's slow event never blocks another client.
pub type SessionRegistry = Arc<Mutex<HashMap<Uuid, SessionSlot>>>;

/// One registered session and the last time a request reached it.
pub struct SessionSlot {
    session: Arc<tokio::sync::Mutex<Session>>,
    last_seen: Instant,
}

impl SessionSlot {
    fn new(session: Session) -> Self {
        Self {
            session: Arc::new(tokio::sync::Mutex::new(session)),
            last_seen: Instant::now(),
        }
    }

    fn touch(&mut self) -> Arc<tokio::sync::Mutex<Session>> {
        self.last_seen = Instant::now();
        Arc::clone(&self.session)
    }

    /// A slot still held by an in-flight request is never idle.
    fn is_idle(&self, limit: Duration) -> bool {
        Arc::strong_count(&self.session) == 1 && self.last_seen.elapsed() >= limit
    }
}

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub coach: Arc<Coach>,
    pub sessions: SessionRegistry,
    /// Upper bound on processing one event, simulated delays included.
    pub event_timeout: Duration,
    pub session_idle: Duration,
    pub max_sessions: usize,
}

impl ApiState {
    pub fn new(coach: Arc<Coach>, event_timeout: Duration) -> Self {
        let defaults = ApiConfig::default();
        Self {
            coach,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            event_timeout,
            session_idle: defaults.session_idle(),
            max_sessions: defaults.max_sessions,
        }
    }

    pub fn from_config(coach: Arc<Coach>, config: &ApiConfig) -> Self {
        Self::new(coach, config.event_timeout())
            .with_session_limits(config.session_idle(), config.max_sessions)
    }

    pub fn with_session_limits(mut self, idle: Duration, max_sessions: usize) -> Self {
        self.session_idle = idle;
        self.max_sessions = max_sessions;
        self
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }
}

/// Build the axum router with all API routes.
pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/personas", get(handlers::list_personas))
        .route("/api/v1/personas/{id}", get(handlers::get_persona))
        .route("/api/v1/sessions", post(handlers::create_session))
        .route(
            "/api/v1/sessions/{id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/api/v1/sessions/{id}/events", post(handlers::post_event))
        .route("/api/v1/analytics", get(handlers::get_analytics))
        .route("/api/v1/stats", get(handlers::get_stats))
        .layer(cors)
        .with_state(state)
}

/// Start the API server and serve until Ctrl-C.
pub async fn start_server(config: &ApiConfig, state: ApiState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    let router = build_router(state);

    tracing::info!("API server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("API server shutting down");
        })
        .await?;
    Ok(())
}
