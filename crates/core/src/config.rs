use std::env;
use std::path::PathBuf;

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

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub data: DataConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `RISKSCOPE_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("RISKSCOPE_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            data: DataConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:   {}:{} (cors origin: {})", self.server.host, self.server.port, self.server.cors_origin);
        tracing::info!("  dataset:  {}", self.data.dataset_path.display());
        tracing::info!("  scoring:  {}", self.data.scoring_config_path.display());
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_u16(p, "PORT", 5000),
            cors_origin: profiled_env_or(p, "CORS_ORIGIN", "*"),
        }
    }
}

// ── Data ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV dataset scored by every request.
    pub dataset_path: PathBuf,
    /// ScoringConfig YAML document. Defaults apply when the file is absent.
    pub scoring_config_path: PathBuf,
}

impl DataConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            dataset_path: PathBuf::from(profiled_env_or(p, "DATA_PATH", "data/users.csv")),
            scoring_config_path: PathBuf::from(profiled_env_or(
                p,
                "SCORING_CONFIG",
                "data/rules/scoring-config.yml",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiled_key_takes_precedence() {
        // Unique key names so parallel tests don't race on shared env vars.
        env::set_var("RSTEST_PORT", "7000");
        env::set_var("RSTEST_PROF_RSTEST_PORT", "8000");
        assert_eq!(profiled_env_u16("RSTEST_PROF", "RSTEST_PORT", 1), 8000);
        assert_eq!(profiled_env_u16("", "RSTEST_PORT", 1), 7000);
        assert_eq!(profiled_env_u16("OTHER", "RSTEST_PORT", 1), 7000);
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(profiled_env_or("NOPE", "RSTEST_UNSET_KEY", "fallback"), "fallback");
        assert_eq!(profiled_env_u16("", "RSTEST_UNSET_NUM", 5000), 5000);
    }

    #[test]
    fn profile_label_defaults() {
        let cfg = Config::for_profile("");
        assert_eq!(cfg.profile_label(), "default");
        let cfg = Config::for_profile("prod");
        assert_eq!(cfg.profile_label(), "PROD");
    }
}
