// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

/// Pacing and randomness of the simulated counterpart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// "Thinking" pause before a counterpart reply is appended.
    pub reply_delay_ms: u64,
    /// Pause before the end-of-session report is produced.
    pub assessment_delay_ms: u64,
    /// Fixed RNG seed; replies are reproducible when set.
    pub seed: Option<u64>,
    /// Upper bound on a single dialogue/assessment backend call.
    pub backend_timeout_secs: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1500,
            assessment_delay_ms: 1000,
            seed: None,
            backend_timeout_secs: 10,
        }
    }
}

impl SimulationConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn assessment_delay(&self) -> Duration {
        Duration::from_millis(self.assessment_delay_ms)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Report blank messages as `EmptyInput` instead of ignoring them.
    pub reject_empty_messages: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Extra `[[persona]]` definitions appended to the built-in catalog.
    pub personas_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Adapter-level limit on processing one submitted event.
    pub event_timeout_secs: u64,
    /// Sessions untouched for this long are dropped from the registry.
    pub session_idle_secs: u64,
    /// New sessions are refused once this many are live.
    pub max_sessions: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8787,
            event_timeout_secs: 30,
            session_idle_secs: 1800,
            max_sessions: 1000,
        }
    }
}

impl ApiConfig {
    pub fn event_timeout(&self) -> Duration {
        Duration::from_secs(self.event_timeout_secs)
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Instant replies and reports; used by tests and benches.
    pub fn without_delays() -> Self {
        let mut config = Self::default();
        config.simulation.reply_delay_ms = 0;
        config.simulation.assessment_delay_ms = 0;
        config
    }
}
