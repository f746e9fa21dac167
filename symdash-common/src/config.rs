//! Configuration loading and setting resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Default listen port for the Debug Images dashboard (symdash-di)
pub const DEFAULT_LISTEN_PORT: u16 = 5731;

/// Default upstream symbol-store API base URL
pub const DEFAULT_UPSTREAM_URL: &str = "http://127.0.0.1:5700/api/0";

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub listen_port: u16,
    pub upstream_url: String,
}

/// Resolve one string setting following the priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file key
/// 4. None (caller applies the compiled default)
pub fn resolve_setting(
    cli_arg: Option<&str>,
    env_var_name: &str,
    config_file_key: &str,
) -> Option<String> {
    // Priority 1: Command-line argument
    if let Some(value) = cli_arg {
        return Some(value.to_string());
    }

    // Priority 2: Environment variable
    if let Ok(value) = std::env::var(env_var_name) {
        return Some(value);
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(value) = config.get(config_file_key).and_then(|v| v.as_str()) {
                    return Some(value.to_string());
                }
                // Integer-typed keys (e.g. port) are accepted too
                if let Some(value) = config.get(config_file_key).and_then(|v| v.as_integer()) {
                    return Some(value.to_string());
                }
            }
        }
    }

    None
}

/// Locate the configuration file: `SYMDASH_CONFIG` if set, else
/// `./symdash.toml` when present.
fn locate_config_file() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("SYMDASH_CONFIG") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(path);
        }
        return Err(Error::Config(format!("Config file not found: {:?}", path)));
    }

    let local = PathBuf::from("symdash.toml");
    if local.exists() {
        return Ok(local);
    }

    Err(Error::Config("No config file found".to_string()))
}

impl ServiceConfig {
    /// Resolve the full service configuration from CLI arguments, the
    /// environment, and the optional config file.
    pub fn resolve(cli_port: Option<u16>, cli_upstream_url: Option<&str>) -> Result<Self> {
        let listen_port = match resolve_setting(
            cli_port.map(|p| p.to_string()).as_deref(),
            "SYMDASH_PORT",
            "listen_port",
        ) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("Invalid listen port: {raw}")))?,
            None => DEFAULT_LISTEN_PORT,
        };

        let upstream_url =
            resolve_setting(cli_upstream_url, "SYMDASH_UPSTREAM_URL", "upstream_url")
                .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());

        Ok(ServiceConfig {
            listen_port,
            upstream_url,
        })
    }
}
