//! Millionaire - CLI entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use millionaire::{AppConfig, AppState, HttpTransport, QuestionProvider, SessionManager, router};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    match cli.command {
        Command::Serve { port, host } => run_server(config, host, port).await,
        Command::Question { level } => print_question(config, level).await,
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,millionaire=debug,millionaire_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[instrument(skip(config))]
fn build_provider(config: &AppConfig) -> Result<QuestionProvider> {
    let settings = config.provider();
    let transport = HttpTransport::new(settings.api_base(), settings.request_timeout())?;
    let provider = QuestionProvider::from_settings(Arc::new(transport), settings);
    if !provider.is_configured() {
        warn!(
            variable = %settings.api_key_env(),
            "No API key configured; every question fetch will report a configuration error"
        );
    }
    Ok(provider)
}

/// Run the web server
#[instrument(skip(config))]
async fn run_server(config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let port = port
        .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(*config.server().port());
    let host = host.unwrap_or_else(|| config.server().host().clone());

    let provider = build_provider(&config)?;
    let sessions = SessionManager::with_limits(
        config.server().session_idle_limit(),
        *config.server().max_sessions(),
    );
    spawn_idle_sweep(sessions.clone());
    let app = router(AppState::new(sessions, provider));

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!("Server ready at http://{}:{}/", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Periodically drop sessions nobody has touched within the idle limit
fn spawn_idle_sweep(sessions: SessionManager) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            ticker.tick().await;
            sessions.evict_idle(std::time::Instant::now());
        }
    });
}

/// Fetch one question and print it
#[instrument(skip(config))]
async fn print_question(config: AppConfig, level: u8) -> Result<()> {
    let provider = build_provider(&config)?;
    let question = provider.fetch_question(level).await?;
    println!("{}", serde_json::to_string_pretty(&question)?);
    Ok(())
}
