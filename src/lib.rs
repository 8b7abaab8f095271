pub mod app_errors;
pub mod config;
pub mod modules;
pub mod utils;
pub mod validation;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Subscriber setup for binaries embedding the engine.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "gatelist=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
