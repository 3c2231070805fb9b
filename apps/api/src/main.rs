mod analysis;
mod config;
mod errors;
mod routes;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::extraction::TextExtractor;
use crate::analysis::taxonomy::SkillTaxonomy;
use crate::analysis::ResumeAnalyzer;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::UploadStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    let taxonomy = Arc::new(load_taxonomy(&config).await?);
    info!("Skill taxonomy loaded ({} skills)", taxonomy.len());

    let uploads = UploadStore::open(&config.upload_dir).await?;

    let state = AppState {
        analyzer: Arc::new(ResumeAnalyzer::new(TextExtractor::default(), taxonomy)),
        uploads,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Built-in table unless `SKILL_TAXONOMY_PATH` points at a JSON override.
async fn load_taxonomy(config: &Config) -> Result<SkillTaxonomy> {
    let Some(path) = &config.skill_taxonomy_path else {
        return Ok(SkillTaxonomy::default());
    };

    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read skill taxonomy {}", path.display()))?;
    let taxonomy = SkillTaxonomy::from_json(&json)
        .with_context(|| format!("Invalid skill taxonomy {}", path.display()))?;

    info!("Using skill taxonomy from {}", path.display());
    Ok(taxonomy)
}
