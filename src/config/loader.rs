use std::path::Path;
use std::sync::LazyLock;

use anyhow::{anyhow, Context, Result};
use http::HeaderValue;
use regex::Regex;
use tracing::{debug, error};

use crate::config::settings::Settings;

static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}").expect("env var pattern is valid")
});

/// Load settings from a YAML file, or defaults when no path is given.
pub async fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        debug!("no config file given, using defaults");
        return Ok(Settings::default());
    };
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_settings(&expand_env_vars(&content))
        .map_err(|e| anyhow!("Invalid config format: {}", e))
}

pub fn parse_settings(content: &str) -> Result<Settings> {
    let settings: Settings = serde_yaml::from_str(content)
        .inspect_err(|e| error!("parse config error: {}", e))?;

    validate_settings(&settings).map_err(|errors| anyhow!(errors.join("; ")))?;
    Ok(settings)
}

/// Collects every problem instead of stopping at the first one.
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let http = &settings.http;

    if http.timeout_ms == Some(0) {
        errors.push("http.timeout_ms must be > 0".to_owned());
    }
    if http.connect_timeout_ms == Some(0) {
        errors.push("http.connect_timeout_ms must be > 0".to_owned());
    }
    if http.user_agent.is_empty() || HeaderValue::from_str(&http.user_agent).is_err() {
        errors.push(format!("http.user_agent '{}' is not a valid header value", http.user_agent));
    }
    if let Some(logging) = &settings.logging {
        let level = logging.level.to_lowercase();
        if !["trace", "debug", "info", "warn", "error"].contains(&level.as_str()) {
            errors.push(format!("logging.level '{}' is not one of trace, debug, info, warn, error", logging.level));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        for e in &errors {
            error!("config validation: {}", e);
        }
        Err(errors)
    }
}

fn expand_env_vars(input: &str) -> String {
    ENV_VAR_RE
        .replace_all(input, |caps: &regex::Captures| {
            let var = &caps[1];
            let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(var).unwrap_or_else(|_| default.to_string())
        })
        .to_string()
}
