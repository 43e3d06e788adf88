pub mod api;
pub mod calibration;
pub mod config;
pub mod constraint;
mod error;
pub mod server;
pub mod state;
pub mod store;

pub use error::NetuiError;

/// Install the fmt subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}
