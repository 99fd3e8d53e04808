//! HTTP surface: a single-page client plus a JSON API over game sessions.

use crate::question_provider::QuestionProvider;
use crate::session::SessionManager;
use axum::{
    Json, Router,
    body::Body,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use millionaire_core::{GameError, GameEvent, GameView, Lifeline, Transition};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    sessions: SessionManager,
    provider: Arc<QuestionProvider>,
}

impl AppState {
    /// Creates handler state.
    #[instrument(skip_all)]
    pub fn new(sessions: SessionManager, provider: QuestionProvider) -> Self {
        info!(configured = provider.is_configured(), "Creating app state");
        Self {
            sessions,
            provider: Arc::new(provider),
        }
    }

    /// The session store.
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Loads a question into the session if it needs one.
    ///
    /// Returns an inline notice when the provider fails; the question stays
    /// unset so the next render tries again.
    #[instrument(skip(self))]
    async fn ensure_question(&self, id: &str) -> Result<Option<String>, ApiError> {
        let session = self
            .sessions
            .get_session(id)
            .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))?;
        if !session.game.needs_question() {
            return Ok(None);
        }

        let level = session.game.current_level();
        debug!(level, "Fetching question without holding the session lock");
        match self.provider.fetch_question(level).await {
            Ok(question) => {
                let stored = self
                    .sessions
                    .with_session(id, |s| s.game.set_question(question))
                    .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))?;
                if let Err(e) = stored {
                    debug!(error = %e, "Discarding fetched question");
                }
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, level, "Question fetch failed");
                Ok(Some(e.notice()))
            }
        }
    }

    fn view(&self, id: &str, notice: Option<String>) -> Result<SessionView, ApiError> {
        let session = self
            .sessions
            .get_session(id)
            .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))?;
        Ok(SessionView {
            session_id: session.id,
            game: GameView::render(&session.game),
            notice,
        })
    }

    fn apply(&self, id: &str, event: GameEvent) -> Result<ActionResponse, ApiError> {
        let transition = self
            .sessions
            .with_session(id, |s| s.game.handle(event))
            .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))??;
        info!(session_id = id, ?transition, "Event applied");
        Ok(ActionResponse {
            transition,
            view: self.view(id, None)?,
        })
    }
}

/// A rendered session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// Session ID.
    pub session_id: String,
    /// Rendered game.
    #[serde(flatten)]
    pub game: GameView,
    /// Inline provider or configuration message.
    pub notice: Option<String>,
}

/// Response to a player action.
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    /// What the action did.
    pub transition: Transition,
    /// The session after the action.
    pub view: SessionView,
}

/// Request body for answering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnswerRequest {
    /// Picked option index; anything outside 0-3 is rejected as a game error.
    pub option: i64,
}

/// Error returned by the JSON API.
#[derive(Debug, Clone, derive_more::Display)]
pub enum ApiError {
    /// No session with this ID.
    #[display("Session {} not found", _0)]
    SessionNotFound(String),
    /// The game rejected the action.
    #[display("{}", _0)]
    Game(GameError),
    /// The picked option cannot be an index at all.
    #[display("Option index {} is outside 0..=3", _0)]
    OptionOutOfRange(i64),
    /// The request body or path could not be read.
    #[display("{}", _0)]
    BadRequest(String),
}

impl std::error::Error for ApiError {}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self::Game(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::Game(_) | Self::OptionOutOfRange(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        warn!(status = %status, error = %self, "Request rejected");
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

/// Builds the application router.
#[instrument(skip(state))]
pub fn router(state: AppState) -> Router {
    info!("Building router");
    Router::new()
        .route("/", get(index))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(show_session).delete(delete_session))
        .route("/api/sessions/{id}/answer", post(answer))
        .route("/api/sessions/{id}/lifelines/{kind}", post(use_lifeline))
        .route("/api/sessions/{id}/restart", post(restart))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[instrument(skip(state))]
async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let id = state.sessions.create_session();
    Ok((StatusCode::CREATED, Json(state.view(&id, None)?)))
}

#[instrument(skip(state))]
async fn show_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let notice = state.ensure_question(&id).await?;
    Ok(Json(state.view(&id, notice)?))
}

#[instrument(skip(state))]
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove_session(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound(id))
    }
}

#[instrument(skip(state))]
async fn answer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>, ApiError> {
    let Json(req) = body?;
    let option =
        usize::try_from(req.option).map_err(|_| ApiError::OptionOutOfRange(req.option))?;
    Ok(Json(state.apply(&id, GameEvent::Answer(option))?))
}

#[instrument(skip(state))]
async fn use_lifeline(
    State(state): State<AppState>,
    path: Result<Path<(String, Lifeline)>, PathRejection>,
) -> Result<Json<ActionResponse>, ApiError> {
    let Path((id, kind)) = path?;
    Ok(Json(state.apply(&id, GameEvent::UseLifeline(kind))?))
}

#[instrument(skip(state))]
async fn restart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, ApiError> {
    Ok(Json(state.apply(&id, GameEvent::Restart)?))
}
