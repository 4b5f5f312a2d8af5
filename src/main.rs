use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use cbe_assist::advisor::{Advisor, create_advisor};
use cbe_assist::careers::CareerCatalog;
use cbe_assist::channels::{sms_routes, spawn_cli_channel, ussd_routes};
use cbe_assist::config::{AdvisorConfig, AppConfig, GatewayConfig};
use cbe_assist::delivery::{AfricasTalkingGateway, SmsGateway};
use cbe_assist::prompts::TablePromptResolver;
use cbe_assist::session::SessionEngine;
use cbe_assist::store::{LibSqlStore, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("📚 CBE Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   SMS webhook:  http://{}/sms", config.bind_addr);
    eprintln!("   USSD webhook: http://{}/ussd", config.bind_addr);

    // ── Session store ───────────────────────────────────────────────────
    let store: Arc<dyn SessionStore> = Arc::new(
        LibSqlStore::new_local(std::path::Path::new(&config.db_path))
            .await
            .unwrap_or_else(|e| {
                eprintln!("Error: Failed to open database at {}: {}", config.db_path, e);
                std::process::exit(1);
            }),
    );
    eprintln!("   Database: {}", config.db_path);

    // ── Advisor ─────────────────────────────────────────────────────────
    let advisor: Option<Arc<dyn Advisor>> = match AdvisorConfig::from_env() {
        Some(advisor_config) => match create_advisor(&advisor_config) {
            Ok(advisor) => Some(advisor),
            Err(e) => {
                eprintln!("   Advisor: disabled ({e})");
                None
            }
        },
        None => {
            eprintln!("   Advisor: disabled (no ANTHROPIC_API_KEY)");
            None
        }
    };

    // ── Outbound delivery ───────────────────────────────────────────────
    let gateway: Option<Arc<dyn SmsGateway>> = match GatewayConfig::from_env() {
        Some(gateway_config) => {
            eprintln!("   Gateway: enabled ({})", gateway_config.base_url);
            Some(Arc::new(AfricasTalkingGateway::new(gateway_config)))
        }
        None => {
            eprintln!("   Gateway: disabled (replies inline only)");
            None
        }
    };

    // ── Engine ──────────────────────────────────────────────────────────
    let engine = Arc::new(SessionEngine::new(
        store,
        Arc::new(TablePromptResolver::new()),
        Arc::new(CareerCatalog::new()),
        advisor,
        config.advisor_timeout,
    ));

    // Optional local REPL for walking the flow without a gateway.
    if config.cli_channel {
        eprintln!("   CLI channel: enabled — type a message and press Enter.");
        let _cli_handle = spawn_cli_channel(Arc::clone(&engine));
    }

    // ── HTTP surface ────────────────────────────────────────────────────
    let app = Router::new()
        .route("/", get(health))
        .merge(sms_routes(Arc::clone(&engine), gateway))
        .merge(ussd_routes(engine))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Webhook server started");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
