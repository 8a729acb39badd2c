use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use shared::protocol::CANDIDATE_ENDPOINT_PATH;
use url::Url;

const DEFAULT_API_ROOT: &str = "http://localhost:5000";
pub const LOCAL_CONFIG_FILE: &str = "candidate_form.toml";
const ENDPOINT_ENV_VARS: [&str; 2] = ["CANDIDATE_FORM_ENDPOINT", "APP__ENDPOINT_URL"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub endpoint: Url,
    pub initial_route: String,
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    endpoint_url: Option<String>,
}

/// Defaults, then the first config file found, then the environment, then the command line.
pub fn load_startup_config(
    cli_endpoint: Option<String>,
    initial_route: String,
) -> anyhow::Result<StartupConfig> {
    let file_endpoint = config_file_candidates()
        .into_iter()
        .find_map(|path| read_file_settings(&path))
        .and_then(|settings| settings.endpoint_url);

    let raw = resolve_endpoint(file_endpoint, read_non_empty_env_var, cli_endpoint);
    Ok(StartupConfig {
        endpoint: parse_endpoint(&raw)?,
        initial_route,
    })
}

fn default_endpoint() -> String {
    format!("{DEFAULT_API_ROOT}{CANDIDATE_ENDPOINT_PATH}")
}

fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("candidate_form").join("config.toml"));
    }
    candidates
}

fn read_file_settings(path: &Path) -> Option<FileSettings> {
    let raw = fs::read_to_string(path).ok()?;
    match toml::from_str::<FileSettings>(&raw) {
        Ok(settings) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            Some(settings)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "ignoring malformed config file: {err}");
            None
        }
    }
}

fn read_non_empty_env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn resolve_endpoint(
    file_endpoint: Option<String>,
    env: impl Fn(&str) -> Option<String>,
    cli_endpoint: Option<String>,
) -> String {
    let mut endpoint = default_endpoint();
    if let Some(v) = file_endpoint {
        endpoint = v;
    }
    for name in ENDPOINT_ENV_VARS {
        if let Some(v) = env(name) {
            endpoint = v;
        }
    }
    if let Some(v) = cli_endpoint {
        endpoint = v;
    }
    endpoint
}

fn parse_endpoint(raw: &str) -> anyhow::Result<Url> {
    let endpoint =
        Url::parse(raw.trim()).with_context(|| format!("invalid submission endpoint '{raw}'"))?;
    match endpoint.scheme() {
        "http" | "https" => Ok(endpoint),
        scheme => anyhow::bail!("submission endpoint must use http or https, got '{scheme}'"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
