use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::filter::{DEFAULT_PREFIXES, InterfaceFilter};
use crate::poller::SnmpSettings;

/// Probe configuration. Every field has a default, so the file itself is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub snmp: SnmpConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnmpConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Wait for one GETNEXT response before resending.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Resends per GETNEXT before the host counts as not responding.
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Wall-clock bound for the whole interface walk.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
}

fn default_port() -> u16 {
    161
}

fn default_request_timeout_ms() -> u64 {
    1000
}

fn default_retries() -> u32 {
    5
}

fn default_deadline_secs() -> u64 {
    90
}

impl Default for SnmpConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            request_timeout_ms: default_request_timeout_ms(),
            retries: default_retries(),
            deadline_secs: default_deadline_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Interface name prefixes to classify; `#` matches one digit.
    #[serde(default = "default_prefixes")]
    pub prefixes: Vec<String>,
}

fn default_prefixes() -> Vec<String> {
    DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            prefixes: default_prefixes(),
        }
    }
}

impl AppConfig {
    /// Loads from `path`, else from `CONFIG_FILE`, else built-in defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("CONFIG_FILE").map(PathBuf::from));
        match path {
            Some(path) => {
                let s = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Self::load_from_str(&s)
            }
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.snmp.port > 0,
            "snmp.port must be between 1 and 65535, got {}",
            self.snmp.port
        );
        anyhow::ensure!(
            self.snmp.request_timeout_ms > 0,
            "snmp.request_timeout_ms must be > 0, got {}",
            self.snmp.request_timeout_ms
        );
        anyhow::ensure!(
            self.snmp.deadline_secs > 0,
            "snmp.deadline_secs must be > 0, got {}",
            self.snmp.deadline_secs
        );
        anyhow::ensure!(
            !self.filter.prefixes.is_empty(),
            "filter.prefixes must be non-empty"
        );
        anyhow::ensure!(
            self.filter.prefixes.iter().all(|p| !p.is_empty()),
            "filter.prefixes must not contain an empty prefix"
        );
        Ok(())
    }

    pub fn snmp_settings(&self) -> SnmpSettings {
        SnmpSettings {
            request_timeout: Duration::from_millis(self.snmp.request_timeout_ms),
            retries: self.snmp.retries,
            deadline: Duration::from_secs(self.snmp.deadline_secs),
        }
    }

    pub fn interface_filter(&self) -> InterfaceFilter {
        InterfaceFilter::new(self.filter.prefixes.iter().cloned())
    }
}
