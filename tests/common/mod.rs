//! Shared test setup.
//!
//! Call [`init_tracing`] at the top of a test to see split events:
//!
//! ```bash
//! RUST_LOG=drh_map=debug cargo test --features tracing --test scenarios
//! ```
//!
//! `DRH_LOG_CONSOLE=0` silences console output.

#![allow(dead_code)]

use std::env;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

static INIT: Once = Once::new();

/// Install the test subscriber. Only the first call takes effect.
pub fn init_tracing() {
    INIT.call_once(setup_tracing);
}

fn make_filter(default_level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{default_level}")))
}

fn setup_tracing() {
    let console_enabled = !env::var("DRH_LOG_CONSOLE").is_ok_and(|v| v == "0");

    let console_layer = console_enabled.then(|| {
        tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact()
            .with_filter(make_filter(Level::INFO))
    });

    let _ = Registry::default().with(console_layer).try_init();
}
