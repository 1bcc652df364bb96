//! # Klinik Sehat Web Library
//!
//! Page server for the Klinik Sehat medicine inventory.
//! This is the entry point that loads configuration and serves the pages.
//!
//! ## Module Organization
//! ```text
//! klinik_web/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── klinik.toml + KLINIK_* overrides
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState
//! │   └── camera.rs   ◄─── Camera scan session
//! ├── pages/
//! │   ├── mod.rs      ◄─── Page enum + router
//! │   ├── dashboard.rs
//! │   ├── camera.rs
//! │   ├── upload.rs
//! │   ├── qr.rs
//! │   ├── medicine.rs
//! │   └── history.rs
//! ├── render.rs       ◄─── Layout, sidebar, notices, tables
//! └── error.rs        ◄─── PageError for handlers
//! ```

pub mod config;
pub mod error;
pub mod pages;
pub mod render;
pub mod state;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use state::AppState;

/// Clinic name used when the config does not set one.
pub const DEFAULT_CLINIC_NAME: &str = "Klinik Sehat";

/// Builds the complete application over `state`.
pub fn app(state: AppState) -> Router {
    pages::router(state)
}

/// Runs the page server until Ctrl+C.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: info,klinik=debug, can be overridden with RUST_LOG       │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → klinik.toml → KLINIK_* variables                       │
/// │                                                                         │
/// │  3. Initialize State ─────────────────────────────────────────────────► │
/// │     • Storage over data_obat.csv / scan_log.csv                         │
/// │     • QrCodec over qr/                                                  │
/// │     • CameraSession over the configured device                          │
/// │                                                                         │
/// │  4. Bind & Serve ─────────────────────────────────────────────────────► │
/// │     • 127.0.0.1:8501 unless configured otherwise                        │
/// │     • Graceful shutdown on Ctrl+C / SIGTERM                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Klinik Sehat");

    let config = AppConfig::load(None)?;
    info!(
        data_file = %config.storage.data_file.display(),
        log_file = %config.storage.log_file.display(),
        qr_dir = %config.storage.qr_dir.display(),
        "Configuration loaded"
    );

    let addr = config.server.bind_address();
    let state = AppState::new(config);

    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Serving pages at http://{}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=klinik_store=trace` - Trace the CSV layer only
/// - Default: INFO, DEBUG for the klinik crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,klinik=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
