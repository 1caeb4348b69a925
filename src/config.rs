//! Dashboard configuration from environment variables

use std::{env, path::PathBuf, time::Duration};

/// Light/dark chart variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Where readings come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Http,
    Simulated,
}

impl SourceKind {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Some(SourceKind::Http),
            "simulated" | "sim" => Some(SourceKind::Simulated),
            _ => None,
        }
    }
}

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the simulation service
    pub base_url: String,

    /// Interval between polls
    pub poll_interval: Duration,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Directory CSV exports are written to
    pub export_dir: PathBuf,

    pub theme: Theme,
    pub source: SourceKind,

    /// Run without the terminal UI
    pub headless: bool,

    pub rust_log: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `EEG_BASE_URL` (default: http://127.0.0.1:5000)
    /// - `EEG_POLL_INTERVAL_MS` (default: 1000)
    /// - `EEG_REQUEST_TIMEOUT_MS` (default: 10000)
    /// - `EEG_EXPORT_DIR` (default: .)
    /// - `EEG_THEME` (default: light)
    /// - `EEG_SOURCE` (default: http)
    /// - `EEG_HEADLESS` (default: false)
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("EEG_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),

            poll_interval: Duration::from_millis(
                env::var("EEG_POLL_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|ms| *ms > 0)
                    .unwrap_or(1_000),
            ),

            request_timeout: Duration::from_millis(
                env::var("EEG_REQUEST_TIMEOUT_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|ms| *ms > 0)
                    .unwrap_or(10_000),
            ),

            export_dir: env::var("EEG_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),

            theme: env::var("EEG_THEME")
                .ok()
                .and_then(|s| Theme::parse(&s))
                .unwrap_or(Theme::Light),

            source: env::var("EEG_SOURCE")
                .ok()
                .and_then(|s| SourceKind::parse(&s))
                .unwrap_or(SourceKind::Http),

            headless: env::var("EEG_HEADLESS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),

            rust_log: env::var("RUST_LOG").ok(),
        }
    }
}
