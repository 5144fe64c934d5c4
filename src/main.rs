mod agents;
mod catalog;
mod chatbots;
mod config;
mod directory;
mod error;
mod llm;
mod server;
mod store;
mod tools;
mod upstream;
mod workflows;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::Request;
use clap::Parser;
use dotenvy::dotenv;
use sentry::integrations::tower::{NewSentryLayer, SentryHttpLayer};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::directory::client::ProductHuntClient;
use crate::llm::client::GroqClient;
use crate::store::memory_repository::MemoryRecordStore;
use crate::store::mongo_repository::MongoRecordStore;
use crate::store::repository::RecordStore;

#[derive(Parser)]
#[command(name = "axzora", about = "AI tools directory, agent runner and workflow generator")]
enum Cli {
    /// Start the HTTP server (default when no subcommand is given)
    #[command(alias = "run")]
    Serve,
    /// Print the effective catalog (built-ins plus CATALOG_PATH overrides) as YAML
    Catalog,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    // Default to Serve when no subcommand is given, but still allow --help
    // and --version to work.
    let args: Vec<String> = std::env::args().collect();
    let cli = if args.len() <= 1 {
        Cli::Serve
    } else {
        Cli::parse()
    };

    let config = Config::from_env();
    match cli {
        Cli::Serve => run_server(config).await,
        Cli::Catalog => {
            let catalog = load_catalog(&config)?;
            let yaml = serde_yaml::to_string(&catalog).context("failed to serialize catalog")?;
            print!("{yaml}");
            Ok(())
        }
    }
}

fn load_catalog(config: &Config) -> Result<Catalog> {
    match &config.catalog_path {
        Some(path) => Catalog::load(path),
        None => Ok(Catalog::default()),
    }
}

/// The document store is advisory: if it cannot be set up, run with the
/// in-memory store instead of refusing to start.
async fn build_store(config: &Config) -> Arc<dyn RecordStore> {
    let Some(uri) = config.mongodb_uri.as_deref() else {
        tracing::info!("MONGODB_URI not set, keeping records in memory");
        return Arc::new(MemoryRecordStore::new());
    };

    match MongoRecordStore::connect(uri, &config.mongodb_database).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "document store unavailable, keeping records in memory");
            Arc::new(MemoryRecordStore::new())
        }
    }
}

async fn run_server(config: Config) -> Result<(), Box<dyn Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("axzora=info,tower_http=warn,hyper=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true).with_bracketed_fields(false))
        .with(sentry::integrations::tracing::layer().event_filter(
            |metadata| match *metadata.level() {
                tracing::Level::ERROR => sentry::integrations::tracing::EventFilter::Event,
                tracing::Level::WARN | tracing::Level::INFO => {
                    sentry::integrations::tracing::EventFilter::Breadcrumb
                }
                _ => sentry::integrations::tracing::EventFilter::Ignore,
            },
        ))
        .init();

    let _guard = sentry::init((
        config.sentry_dsn.clone().unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.environment.clone().into()),
            send_default_pii: false,
            traces_sample_rate: 0.2,
            enable_logs: true,
            ..Default::default()
        },
    ));

    if config.groq_api_key.is_none() {
        tracing::warn!("GROQ_API_KEY not set, agent and workflow requests will be rejected upstream");
    }
    if config.producthunt_token.is_none() {
        tracing::warn!("PRODUCTHUNT_DEVELOPER_TOKEN not set, tool listings will be rejected upstream");
    }

    let catalog = Arc::new(load_catalog(&config)?);

    let timeout_secs = config.upstream_timeout.as_secs();
    let http_client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(config.upstream_timeout)
        .build()
        .context("failed to build HTTP client")?;

    let llm = Arc::new(GroqClient::new(
        http_client.clone(),
        config.groq_base_url.clone(),
        config.groq_api_key.clone(),
        config.llm_model.clone(),
        timeout_secs,
    ));
    let directory = Arc::new(ProductHuntClient::new(
        http_client,
        config.producthunt_url.clone(),
        config.producthunt_token.clone(),
        timeout_secs,
    ));
    let store = build_store(&config).await;

    let app_state = server::AppState {
        llm,
        directory,
        store,
        catalog,
        upstream_timeout: config.upstream_timeout,
    };

    let app = server::create_app(app_state)
        .layer(SentryHttpLayer::new().enable_transaction())
        .layer(NewSentryLayer::<Request<Body>>::new_from_top());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, model = %config.llm_model, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
