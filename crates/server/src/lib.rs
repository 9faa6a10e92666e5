use anyhow::{Context as AnyhowContext, Result};
use apphub_aggregator::{Aggregator, ArtifactKind, Namespace};
use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::Response,
    routing::get,
    Router,
};
use clap::Parser;
use std::sync::Arc;

mod config;
mod http_api;
mod static_files;

pub use config::{ServeArgs, ServerConfig, WalkOrderArg};
pub use http_api::ErrorEnvelope;

#[derive(Parser)]
#[command(name = "apphub")]
#[command(about = "Serves per-app JSON, script, stylesheet and template bundles", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = ServerConfig::from_args(cli.serve)?;

    log::info!("{}", std::env::args().next().unwrap_or_else(|| "apphub".to_string()));
    for (name, value) in config.describe() {
        log::info!("  --{name}={value}");
    }
    log::info!("serving: /apps/{{app}}/");

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    serve(listener, config).await
}

/// Shared read-only state for every request.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
    pub aggregator: Aggregator,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let aggregator = Aggregator::new(config.layout.clone()).with_order(config.walk_order);
        Self { config, aggregator }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/apps/:app/", get(app_shell))
        .route("/apps/:app/:file", get(app_file))
        .fallback(static_asset)
        .with_state(state)
}

pub async fn serve(listener: tokio::net::TcpListener, config: ServerConfig) -> Result<()> {
    let local_addr = listener.local_addr()?;
    let app = router(Arc::new(AppState::new(config)));
    log::info!("Listening on http://{local_addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn app_shell(
    State(state): State<Arc<AppState>>,
    Path(_app): Path<String>,
) -> Result<Response, StatusCode> {
    static_files::serve_file(&state.config.static_path.join("index.html")).await
}

async fn app_file(
    State(state): State<Arc<AppState>>,
    Path((app, file)): Path<(String, String)>,
    uri: Uri,
) -> Result<Response, StatusCode> {
    let Some(kind) = ArtifactKind::from_route_file(&file) else {
        return static_files::serve(&state.config.static_path, uri.path()).await;
    };

    let namespace = match Namespace::parse(&app) {
        Ok(namespace) => namespace,
        Err(err) => {
            log::warn!("error: rejecting app {app:?}: {err}");
            return http_api::error_response(&err);
        }
    };

    let worker_state = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        worker_state.aggregator.aggregate(Some(&namespace), kind)
    })
    .await
    .map_err(|err| {
        log::error!("error: aggregation task for {app}/{file} failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    match result {
        Ok(artifact) => {
            if !artifact.errors.is_empty() {
                log::warn!(
                    "Served {kind} for {app} with {} skipped fragment(s)",
                    artifact.errors.len()
                );
            }
            http_api::artifact_response(artifact)
        }
        Err(err) => {
            log::error!("error: collecting {kind} for {app}: {err}");
            http_api::error_response(&err)
        }
    }
}

async fn static_asset(State(state): State<Arc<AppState>>, uri: Uri) -> Result<Response, StatusCode> {
    static_files::serve(&state.config.static_path, uri.path()).await
}
