use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Standard gravity used to convert body mass to body weight.
pub const GRAVITY: f64 = 9.81;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match env_opt(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring unparsable env value");
            default
        }),
        None => default,
    }
}

// ── Report format ─────────────────────────────────────────────

/// Which report files the pipeline writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Json,
    Text,
    Both,
}

impl ReportFormat {
    pub fn wants_json(self) -> bool {
        matches!(self, ReportFormat::Json | ReportFormat::Both)
    }

    pub fn wants_text(self) -> bool {
        matches!(self, ReportFormat::Text | ReportFormat::Both)
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Both => write!(f, "both"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "text" | "txt" => Ok(ReportFormat::Text),
            "both" => Ok(ReportFormat::Both),
            other => Err(format!("unknown report format: '{}'", other)),
        }
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory scanned for threshold rule YAML files.
    pub rules_dir: PathBuf,
    /// Directory reports are written to.
    pub output_dir: PathBuf,
    /// Subject body mass in kilograms.
    pub body_weight_kg: f64,
    pub report_format: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules_dir: PathBuf::from("rules"),
            output_dir: PathBuf::from("output"),
            body_weight_kg: 70.0,
            report_format: ReportFormat::Both,
        }
    }
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rules_dir: PathBuf::from(env_or(
                "MOTIONRISK_RULES_DIR",
                &defaults.rules_dir.to_string_lossy(),
            )),
            output_dir: PathBuf::from(env_or(
                "MOTIONRISK_OUTPUT_DIR",
                &defaults.output_dir.to_string_lossy(),
            )),
            body_weight_kg: env_parse("MOTIONRISK_BODY_WEIGHT_KG", defaults.body_weight_kg),
            report_format: env_parse("MOTIONRISK_REPORT_FORMAT", defaults.report_format),
        }
    }

    /// Subject body weight in newtons.
    pub fn body_weight_newtons(&self) -> f64 {
        self.body_weight_kg * GRAVITY
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  rules_dir:   {}", self.rules_dir.display());
        tracing::info!("  output_dir:  {}", self.output_dir.display());
        tracing::info!("  body_weight: {:.1} kg", self.body_weight_kg);
        tracing::info!("  format:      {}", self.report_format);
    }
}
