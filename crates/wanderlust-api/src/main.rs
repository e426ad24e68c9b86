//! Wanderlust API Server
//!
//! Travel booking backend: accounts, hotels, bookings, favorites, messaging,
//! and flight/hotel search through external providers.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use wanderlust_api::auth::JwtManager;
use wanderlust_api::providers::{
    AmadeusClient, AmadeusConfig, FlightProvider, HotelProvider, HotelbedsClient,
    HotelbedsConfig, UnconfiguredProvider,
};
use wanderlust_api::server::{AppState, build_router};
use wanderlust_api::storage::ApiDatabase;

const DEV_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Parser, Debug)]
#[command(name = "wanderlust-api")]
#[command(version, about = "Wanderlust travel API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "WANDERLUST_ADDR", default_value = "0.0.0.0:3001")]
    addr: SocketAddr,

    /// Path to SQLite database file.
    #[arg(long, env = "WANDERLUST_DB_PATH")]
    db_path: Option<PathBuf>,

    /// JWT secret key.
    #[arg(long, env = "WANDERLUST_JWT_SECRET", default_value = DEV_JWT_SECRET)]
    jwt_secret: String,

    /// Token TTL in seconds.
    #[arg(long, default_value_t = 3600)]
    token_ttl: i64,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    request_timeout: u64,

    /// Directory served for paths no API route matches (hotel photos).
    #[arg(long, env = "WANDERLUST_PUBLIC_DIR")]
    public_dir: Option<PathBuf>,

    /// Insert the sample hotel catalogue if the hotels table is empty.
    #[arg(long)]
    seed: bool,

    /// Code required to register with the operator role. Unset leaves
    /// operator signup open.
    #[arg(long, env = "WANDERLUST_OPERATOR_CODE")]
    operator_code: Option<String>,

    /// Amadeus API key.
    #[arg(long, env = "AMADEUS_API_KEY")]
    amadeus_key: Option<String>,

    /// Amadeus API secret.
    #[arg(long, env = "AMADEUS_API_SECRET")]
    amadeus_secret: Option<String>,

    /// Amadeus API base URL.
    #[arg(long, env = "AMADEUS_BASE_URL", default_value = "https://test.api.amadeus.com")]
    amadeus_url: String,

    /// Hotelbeds API key.
    #[arg(long, env = "HOTELBEDS_API_KEY")]
    hotelbeds_key: Option<String>,

    /// Hotelbeds API secret.
    #[arg(long, env = "HOTELBEDS_API_SECRET")]
    hotelbeds_secret: Option<String>,

    /// Hotelbeds API base URL.
    #[arg(long, env = "HOTELBEDS_BASE_URL", default_value = "https://api.test.hotelbeds.com")]
    hotelbeds_url: String,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    wanderlust_core::tracing_init::init_tracing(
        "wanderlust_api=info,tower_http=info",
        args.log_json,
    );

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %args.addr,
        "Starting wanderlust-api"
    );

    if args.jwt_secret == DEV_JWT_SECRET {
        warn!("Using the development JWT secret; set WANDERLUST_JWT_SECRET in production");
    }

    let db_path = match &args.db_path {
        Some(path) => path.clone(),
        None => default_db_path()?,
    };
    info!(path = %db_path.display(), "Opening API database");
    let db = ApiDatabase::open(&db_path).await?;
    if args.seed {
        db.seed_sample_hotels().await?;
    }

    let jwt = JwtManager::new(args.jwt_secret.as_bytes(), args.token_ttl);
    let flights = flight_provider(&args)?;
    let hotels = hotel_provider(&args)?;

    if let Some(dir) = &args.public_dir {
        info!(path = %dir.display(), "Serving public files");
    }

    let state = AppState::new(db, jwt, flights, hotels)
        .with_operator_code(args.operator_code)
        .with_request_timeout(Duration::from_secs(args.request_timeout))
        .with_public_dir(args.public_dir);
    if state.operator_code.is_none() {
        warn!("No operator signup code configured; anyone may register as an operator");
    }

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    info!(addr = %args.addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received shutdown signal");
        })
        .await?;

    info!("API server stopped");
    Ok(())
}

fn flight_provider(args: &Args) -> anyhow::Result<Arc<dyn FlightProvider>> {
    match (&args.amadeus_key, &args.amadeus_secret) {
        (Some(key), Some(secret)) => {
            let client = AmadeusClient::new(AmadeusConfig {
                base_url: args.amadeus_url.clone(),
                api_key: key.clone(),
                api_secret: secret.clone(),
            })?;
            info!(base_url = %args.amadeus_url, "Amadeus flight search enabled");
            Ok(Arc::new(client))
        }
        _ => {
            warn!("Amadeus credentials not set; flight search will fail");
            Ok(Arc::new(UnconfiguredProvider::new("Amadeus")))
        }
    }
}

fn hotel_provider(args: &Args) -> anyhow::Result<Arc<dyn HotelProvider>> {
    match (&args.hotelbeds_key, &args.hotelbeds_secret) {
        (Some(key), Some(secret)) => {
            let client = HotelbedsClient::new(HotelbedsConfig {
                base_url: args.hotelbeds_url.clone(),
                api_key: key.clone(),
                api_secret: secret.clone(),
            })?;
            info!(base_url = %args.hotelbeds_url, "Hotelbeds hotel search enabled");
            Ok(Arc::new(client))
        }
        _ => {
            warn!("Hotelbeds credentials not set; hotel search will return 503");
            Ok(Arc::new(UnconfiguredProvider::new("Hotelbeds")))
        }
    }
}

fn default_db_path() -> anyhow::Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".wanderlust").join("wanderlust.db"))
}
