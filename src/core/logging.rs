//! Structured logging setup
//!
//! Initialized exactly once from `main`; components just use `tracing` macros.
//! Output goes to stderr so stdout stays clean for callers that pipe it.
//!
//! Environment:
//! - `RUST_LOG`: standard filter directives, take precedence
//! - `CORRAL_LOG_LEVEL`: default level when `--log-level` is not given
//! - `CORRAL_LOG_JSON`: `true` for JSON lines (CI log collectors)

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
  pub level: Level,
  pub use_json: bool,
  pub include_target: bool,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: Level::INFO,
      use_json: false,
      include_target: false,
    }
  }
}

impl LoggingConfig {
  /// Explicit level if given, else `CORRAL_LOG_LEVEL`, else INFO
  pub fn from_env(level: Option<&str>) -> Self {
    let level = level
      .map(str::to_string)
      .or_else(|| env::var("CORRAL_LOG_LEVEL").ok())
      .map(|l| parse_level(&l))
      .unwrap_or(Level::INFO);

    let use_json = env::var("CORRAL_LOG_JSON")
      .ok()
      .and_then(|v| v.parse::<bool>().ok())
      .unwrap_or(false);

    Self {
      level,
      use_json,
      include_target: level >= Level::DEBUG,
    }
  }
}

/// Parse a level name; unknown names fall back to INFO
pub fn parse_level(level_str: &str) -> Level {
  match level_str.trim().to_lowercase().as_str() {
    "trace" => Level::TRACE,
    "debug" => Level::DEBUG,
    "info" => Level::INFO,
    "warn" | "warning" => Level::WARN,
    "error" => Level::ERROR,
    _ => Level::INFO,
  }
}

fn build_filter(level: Level) -> EnvFilter {
  if env::var("RUST_LOG").is_ok() {
    return EnvFilter::from_default_env();
  }

  let mut filter = EnvFilter::new(format!("corral={}", level));
  for directive in ["reqwest=warn", "hyper=warn", "hyper_util=warn"] {
    if let Ok(d) = directive.parse() {
      filter = filter.add_directive(d);
    }
  }
  filter
}

/// Install the global subscriber; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
  INIT.call_once(|| {
    let filter = build_filter(config.level);

    if config.use_json {
      let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true))
        .try_init();
    } else {
      let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
          fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_target)
            .without_time(),
        )
        .try_init();
    }
  });
}
