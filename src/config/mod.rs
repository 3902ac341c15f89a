mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::{debug, warn};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub async fn load() -> Result<Config> {
    let explicit_path = env::var("CONFIG_PATH").ok();
    let config_path = explicit_path
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    debug!("Loading configuration from: {}", config_path);

    let mut config = match load_from_file(&config_path).await {
        Ok(config) => config,
        // Only the implicit default file may be absent; everything then
        // comes from defaults and the environment.
        Err(Error::Io(e))
            if explicit_path.is_none() && e.kind() == std::io::ErrorKind::NotFound =>
        {
            debug!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
            Config::default()
        }
        Err(e) => return Err(e),
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok())?;

    Ok(config)
}

/// Read and parse one YAML file, without environment overrides.
pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
    let config_str = tokio::fs::read_to_string(path).await?;
    parse(&config_str)
}

pub fn parse(config_str: &str) -> Result<Config> {
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

/// Overlay process environment onto a parsed config. `lookup` abstracts
/// `std::env::var` so the mapping can be exercised without touching the
/// real environment.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let first = |keys: &[&str]| keys.iter().find_map(|key| lookup(key));

    if let Some(service) = lookup("SERVICE") {
        config.service = service.parse()?;
    }

    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }

    if let Some(url) = first(&["ANALYZER_URL", "IMAGE_PROCESSOR_URL"]) {
        config.gateway.analyzer_url = url;
    }

    if let Some(url) = first(&["GENERATOR_URL", "MESSAGE_GENERATOR_URL"]) {
        config.gateway.generator_url = url;
    }

    if let Some(project) = first(&["PROJECT_ID", "GOOGLE_CLOUD_PROJECT"]) {
        config.vision.project_id = Some(project);
    }

    Ok(())
}

/// Environment variable a secret name is exposed under, e.g.
/// `vision-api-key` -> `VISION_API_KEY`.
pub fn secret_env_var(secret_name: &str) -> String {
    secret_name
        .chars()
        .map(|c| match c {
            '-' | '.' | '/' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// Resolve a provider credential at call time. An inline key wins over the
/// named secret.
pub fn resolve_secret(inline: Option<&str>, secret_name: &str) -> Result<String> {
    if let Some(key) = inline.filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }

    let var = secret_env_var(secret_name);
    match env::var(&var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => {
            warn!("Secret '{}' is not available (expected in {})", secret_name, var);
            Err(Error::config(format!(
                "Secret '{}' is not configured",
                secret_name
            )))
        }
    }
}
