// src/api/handlers.rs

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::api::{types::*, ApiState, SessionSlot};
use crate::infra::errors::CoachError;
use crate::persona::{Difficulty, Persona};
use crate::session::{Session, SessionEvent};
use crate::view::{self, analytics::StatTile, AnalyticsView, PersonaCard};

/// GET /api/v1/health — Simple health check.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/v1/personas — Persona cards, optionally filtered by difficulty.
pub async fn list_personas(
    State(state): State<ApiState>,
    Query(query): Query<PersonaQuery>,
) -> Result<Json<Vec<PersonaCard>>, ApiError> {
    let filter = match query.difficulty.as_deref() {
        None => None,
        Some(raw) if raw.is_empty() || raw.eq_ignore_ascii_case("all") => None,
        Some(raw) => Some(
            Difficulty::parse(raw)
                .ok_or_else(|| bad_request(format!("Unknown difficulty '{raw}'")))?,
        ),
    };
    Ok(Json(view::persona_cards(state.coach.catalog(), filter)))
}

/// GET /api/v1/personas/:id — One persona by display name.
pub async fn get_persona(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Persona>, ApiError> {
    let persona = state.coach.catalog().get(&id).map_err(api_error)?;
    Ok(Json(persona.clone()))
}

/// POST /api/v1/sessions — Start a session on the dashboard.
pub async fn create_session(
    State(state): State<ApiState>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let session = Session::new();
    let response = respond(&state, &session);
    state.insert(session)?;
    tracing::info!(session = %response.session_id, "session created");
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/sessions/:id — Current view of a session.
pub async fn get_session(
    State(state): State<ApiState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let slot = state.lookup(session_id(id)?)?;
    let session = slot.lock().await;
    Ok(Json(respond(&state, &session)))
}

/// POST /api/v1/sessions/:id/events — Apply one event and return the new view.
///
/// Events for the same session are serialized by its lock. A rejected or
/// timed-out event leaves the session unchanged.
pub async fn post_event(
    State(state): State<ApiState>,
    id: Result<Path<Uuid>, PathRejection>,
    event: Result<Json<SessionEvent>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = session_id(id)?;
    let Json(event) =
        event.map_err(|e| bad_request(format!("Invalid event: {}", e.body_text())))?;
    let slot = state.lookup(id)?;
    let mut session = slot.lock().await;

    let limit = state.event_timeout;
    match tokio::time::timeout(limit, state.coach.handle_event(&mut session, event)).await {
        Ok(result) => result.map_err(api_error)?,
        Err(_) => {
            return Err(api_error(CoachError::BackendUnavailable {
                backend: "session".into(),
                message: format!("event not processed within {}s", limit.as_secs()),
            }))
        }
    }

    Ok(Json(respond(&state, &session)))
}

/// DELETE /api/v1/sessions/:id — Drop a session.
pub async fn delete_session(
    State(state): State<ApiState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = session_id(id)?;
    state.remove(id)?;
    tracing::info!(session = %id, "session closed");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/analytics — Trend, radar and history.
pub async fn get_analytics() -> Json<AnalyticsView> {
    Json(view::analytics())
}

/// GET /api/v1/stats — Dashboard counters.
pub async fn get_stats() -> Json<Vec<StatTile>> {
    Json(view::quick_stats())
}

fn session_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| bad_request(format!("Invalid session id: {}", e.body_text())))
}

fn respond(state: &ApiState, session: &Session) -> SessionResponse {
    SessionResponse {
        session_id: session.id(),
        view: view::project(session, state.coach.catalog()),
    }
}

impl ApiState {
    /// Register a session, first dropping idle ones. Refused when full.
    fn insert(&self, session: Session) -> Result<(), ApiError> {
        let mut sessions = self.sessions.lock().map_err(|_| poisoned())?;
        let before = sessions.len();
        sessions.retain(|_, slot| !slot.is_idle(self.session_idle));
        if sessions.len() < before {
            tracing::debug!(evicted = before - sessions.len(), "idle sessions dropped");
        }
        if sessions.len() >= self.max_sessions {
            tracing::warn!(live = sessions.len(), "session registry full");
            return Err(api_error(CoachError::BackendUnavailable {
                backend: "sessions".into(),
                message: format!("{} sessions already open", sessions.len()),
            }));
        }
        sessions.insert(session.id(), SessionSlot::new(session));
        Ok(())
    }

    fn lookup(&self, id: Uuid) -> Result<Arc<tokio::sync::Mutex<Session>>, ApiError> {
        let mut sessions = self.sessions.lock().map_err(|_| poisoned())?;
        match sessions.get(&id).map(|slot| slot.is_idle(self.session_idle)) {
            Some(false) => sessions
                .get_mut(&id)
                .map(SessionSlot::touch)
                .ok_or_else(|| api_error(session_not_found(id))),
            Some(true) => {
                sessions.remove(&id);
                tracing::debug!(session = %id, "idle session dropped");
                Err(api_error(session_not_found(id)))
            }
            None => Err(api_error(session_not_found(id))),
        }
    }

    fn remove(&self, id: Uuid) -> Result<(), ApiError> {
        let mut sessions = self.sessions.lock().map_err(|_| poisoned())?;
        sessions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| api_error(session_not_found(id)))
    }
}

fn session_not_found(id: Uuid) -> CoachError {
    CoachError::NotFound {
        kind: "Session",
        id: id.to_string(),
    }
}

fn poisoned() -> ApiError {
    api_error(CoachError::Other(anyhow::anyhow!("session registry lock poisoned")))
}
