//! # Klinik Sehat Entry Point
//!
//! Starts the page server. The actual setup is in lib.rs so the router can
//! be driven from tests without a socket.
//!
//! ```text
//! $ klinik-web
//! INFO Starting Klinik Sehat
//! INFO Serving pages at http://127.0.0.1:8501
//! ```

#[tokio::main]
async fn main() {
    if let Err(e) = klinik_web::run().await {
        eprintln!("klinik-web: {e}");
        std::process::exit(1);
    }
}
