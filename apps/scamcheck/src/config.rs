use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use client_core::{OrchestratorConfig, DEFAULT_SAMPLE_DELAY};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "scamcheck.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub request_timeout_secs: u64,
    pub sample_delay_ms: u64,
    pub max_input_chars: usize,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        let orchestrator = OrchestratorConfig::default();
        Self {
            service_url: "http://127.0.0.1:5000".into(),
            request_timeout_secs: orchestrator.request_timeout.as_secs(),
            sample_delay_ms: DEFAULT_SAMPLE_DELAY.as_millis() as u64,
            max_input_chars: orchestrator.max_input_chars,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    service_url: Option<String>,
    request_timeout_secs: Option<u64>,
    sample_delay_ms: Option<u64>,
    max_input_chars: Option<usize>,
    log_filter: Option<String>,
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn sample_delay(&self) -> Duration {
        Duration::from_millis(self.sample_delay_ms)
    }

    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            request_timeout: self.request_timeout(),
            max_input_chars: self.max_input_chars,
        }
    }

    fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let file_cfg: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file_cfg.service_url {
            self.service_url = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            self.request_timeout_secs = v;
        }
        if let Some(v) = file_cfg.sample_delay_ms {
            self.sample_delay_ms = v;
        }
        if let Some(v) = file_cfg.max_input_chars {
            self.max_input_chars = v;
        }
        if let Some(v) = file_cfg.log_filter {
            self.log_filter = v;
        }
        Ok(())
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("SCAMCHECK_SERVICE_URL") {
            self.service_url = v;
        }
        if let Some(v) = var("APP__SERVICE_URL") {
            self.service_url = v;
        }

        if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
            if let Ok(parsed) = v.parse() {
                self.request_timeout_secs = parsed;
            }
        }
        if let Some(v) = var("APP__SAMPLE_DELAY_MS") {
            if let Ok(parsed) = v.parse() {
                self.sample_delay_ms = parsed;
            }
        }
        if let Some(v) = var("APP__MAX_INPUT_CHARS") {
            if let Ok(parsed) = v.parse() {
                self.max_input_chars = parsed;
            }
        }

        if let Some(v) = var("APP__LOG_FILTER") {
            self.log_filter = v;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.service_url)
            .with_context(|| format!("invalid service_url '{}'", self.service_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "service_url must use http or https, got '{}'",
                url.scheme()
            );
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        if self.max_input_chars == 0 {
            bail!("max_input_chars must be greater than zero");
        }
        Ok(())
    }
}

/// Defaults, then the config file, then environment variables.
///
/// A missing default config file is fine; a missing explicit one is not.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    config_path: Option<&Path>,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(&path) {
        Ok(raw) => settings
            .apply_file(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound && config_path.is_none() => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }

    settings.apply_env(var);
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
