//! Millionaire - an AI-generated quiz served as a web page.
//!
//! # Architecture
//!
//! - **Core** (`millionaire_core`): ladder, lifelines and the game state machine
//! - **Provider**: turns a level into a validated question via a remote model
//! - **Session**: one independent game per player
//! - **Server**: axum routes rendering sessions as JSON plus a single-page client
//!
//! # Example
//!
//! ```no_run
//! use millionaire::{AppConfig, AppState, HttpTransport, QuestionProvider, SessionManager, router};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::load("millionaire.toml")?;
//! let transport = HttpTransport::new(config.provider().api_base(), None)?;
//! let provider = QuestionProvider::from_settings(Arc::new(transport), config.provider());
//! let app = router(AppState::new(SessionManager::new(), provider));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod llm_client;
mod question_provider;
mod server;
mod session;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, ProviderSettings, ServerSettings};

// Crate-level exports - LLM transport
pub use llm_client::{CompletionRequest, HttpTransport, LlmError, LlmTransport};

// Crate-level exports - Question provider
pub use question_provider::{ProviderError, QuestionProvider};

// Crate-level exports - Server
pub use server::{ActionResponse, AnswerRequest, ApiError, AppState, SessionView, router};

// Crate-level exports - Session management
pub use session::{GameSession, SessionId, SessionManager};

// Crate-level exports - Game types
pub use millionaire_core::{
    AnswerOutcome, GameError, GameEvent, GameState, GameStatus, GameView, Lifeline,
    LifelineReveal, OptionLabel, QUESTION_COUNT, Question, RewardTable, Transition,
};
