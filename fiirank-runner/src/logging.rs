//! Logging setup for the `fiirank` binary.
//!
//! Installs a `tracing-subscriber` registry writing to stderr, so stdout
//! stays clean for CSV/JSON output. `RUST_LOG` overrides the level given on
//! the command line.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// HTTP and HTML-parsing crates kept at `warn` unless `RUST_LOG` says otherwise.
pub const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls", "html5ever", "selectors"];

fn directives(level: &str) -> String {
    let mut directives = String::from(level);
    for module in NOISY_MODULES {
        directives.push_str(&format!(",{module}=warn"));
    }
    directives
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(level: &str, json: bool) {
    let subscriber = tracing_subscriber::registry().with(build_filter(level));

    if json {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true);
        let _ = subscriber.with(layer).try_init();
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);
        let _ = subscriber.with(layer).try_init();
    }

    tracing::debug!(level, json, "logging initialized");
}
