//! Logging setup for the wheel engine
//!
//! Structured logging goes through `tracing`. Native builds install a
//! `tracing-subscriber` registry; wasm builds forward to the browser console
//! through `tracing-wasm`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use scentwheel::core::logging::init_logging;
//!
//! init_logging(Some("debug"), Some("pretty")).unwrap();
//! ```
//!
//! # Environment Variables
//!
//! - `SCENTWHEEL_LOG_LEVEL`: filter directive (trace|debug|info|warn|error|off)
//! - `SCENTWHEEL_LOG_FORMAT`: compact|pretty|json
//! - `RUST_LOG`: standard filter, used when the level is not given otherwise
//!
//! Precedence, highest first: explicit argument, `SCENTWHEEL_LOG_*`,
//! `RUST_LOG` (level only), then the default. The CLI passes its flags as
//! the explicit arguments, so a flag given on the command line beats the
//! environment.
//!
//! # Filtering
//!
//! ```bash
//! # Layout and scene spans only
//! RUST_LOG="scentwheel::core::scene=debug" scentwheel render -i notes.json
//!
//! # Everything at info, resize traffic at trace
//! RUST_LOG="info,scentwheel::core::resize=trace" scentwheel render -i notes.json
//! ```

use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

#[cfg(target_arch = "wasm32")]
use tracing_wasm::WASMLayerConfig;

/// Environment variable holding the log level
pub const LEVEL_ENV: &str = "SCENTWHEEL_LOG_LEVEL";

/// Environment variable holding the log format
pub const FORMAT_ENV: &str = "SCENTWHEEL_LOG_FORMAT";

const DEFAULT_LEVEL: &str = "info";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line output
    #[default]
    Compact,
    /// Multi-line output with source locations
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Environment variable holding the standard filter directive
pub const RUST_LOG_ENV: &str = "RUST_LOG";

/// Level directive from the argument, `SCENTWHEEL_LOG_LEVEL`, `RUST_LOG`,
/// or `info`, in that order
pub fn resolve_level(level: Option<&str>) -> String {
    resolve_level_or(level, DEFAULT_LEVEL)
}

/// Like [`resolve_level`] with a caller-chosen last resort
pub fn resolve_level_or(level: Option<&str>, fallback: &str) -> String {
    level
        .map(str::to_string)
        .or_else(|| std::env::var(LEVEL_ENV).ok())
        .or_else(|| std::env::var(RUST_LOG_ENV).ok())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Format from the argument, `SCENTWHEEL_LOG_FORMAT`, or compact
pub fn resolve_format(format: Option<&str>) -> Result<LogFormat, String> {
    match format
        .map(str::to_string)
        .or_else(|| std::env::var(FORMAT_ENV).ok())
    {
        Some(name) => LogFormat::from_str(&name).map_err(|e| format!("Invalid log format: {}", e)),
        None => Ok(LogFormat::default()),
    }
}

/// Initialize the global subscriber
///
/// Fails on an unknown format or when a subscriber is already installed.
/// Unparseable level directives fall back to `info`.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(target_arch = "wasm32")]
    {
        // the browser console has a single output shape
        let _ = (level, format);
        tracing_wasm::set_as_global_default_with_config(WASMLayerConfig::default());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let log_level = resolve_level(level);
        let log_format = resolve_format(format)?;

        let filter = if log_level == "off" {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
        };

        let registry = Registry::default().with(filter);
        match log_format {
            LogFormat::Compact => registry
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_span_events(FmtSpan::NONE)
                        .compact(),
                )
                .try_init()?,
            LogFormat::Pretty => registry
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?,
            LogFormat::Json => registry
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_span_events(FmtSpan::CLOSE)
                        .json(),
                )
                .try_init()?,
        }

        Ok(())
    }
}

/// Initialize logging from the environment alone
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}
