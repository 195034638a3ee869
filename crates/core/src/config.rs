use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub const DEFAULT_FRED_BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

// ── Top-level config ──────────────────────────────────────────

/// Runtime settings sourced from the environment.
///
/// The indicator catalog itself lives in a file (see [`crate::Catalog`]);
/// this only covers credentials and fetch behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub fred: FredConfig,
    pub fetch: FetchConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `RISKGAUGE_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("RISKGAUGE_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            fred: FredConfig::from_env_profiled(p),
            fetch: FetchConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  fred:   base_url={}, limit={}, api_key={}",
            self.fred.base_url,
            self.fred.observation_limit,
            if self.fred.is_configured() { "(set)" } else { "(none)" }
        );
        tracing::info!(
            "  fetch:  timeout={}s, concurrency={}",
            self.fetch.timeout_secs,
            self.fetch.concurrency
        );
    }
}

// ── FRED ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FredConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub observation_limit: u32,
}

impl FredConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            api_key: profiled_env_opt(p, "FRED_API_KEY"),
            base_url: profiled_env_or(p, "FRED_BASE_URL", DEFAULT_FRED_BASE_URL),
            observation_limit: profiled_env_opt(p, "FRED_OBSERVATION_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(4000),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

// ── Fetch ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Upper bound on a single indicator's fetch, in seconds.
    pub timeout_secs: u64,
    /// Indicators evaluated at once.
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 45,
            concurrency: 8,
        }
    }
}

impl FetchConfig {
    fn from_env_profiled(p: &str) -> Self {
        let defaults = Self::default();
        Self {
            timeout_secs: profiled_env_u64(p, "FETCH_TIMEOUT_SECS", defaults.timeout_secs),
            concurrency: profiled_env_usize(p, "FETCH_CONCURRENCY", defaults.concurrency).max(1),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
