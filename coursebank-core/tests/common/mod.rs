//! Test helper functions for integration tests
//!
//! Shared across the test files using the tests/common/ pattern.

use coursebank_core::Catalog;
use std::sync::Once;

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// A small program: two introductory courses and two that build on them
pub const SAMPLE_DEPOT: &str = r#"INF1120 "Programmation I" 3 active
MAT1600 "Algebre matricielle" 4 active
INF2120 "Programmation II" 3 INF1120 active
INF3135 "Construction et maintenance de logiciels" 3 INF2120 MAT1600 active
"#;

#[allow(dead_code)]
pub fn sample_catalog() -> Catalog {
    Catalog::from_lines(SAMPLE_DEPOT.lines()).expect("sample depot should parse")
}
