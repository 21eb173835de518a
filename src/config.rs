use std::{path::PathBuf, time::Duration};

use dotenvy::dotenv;
use serde::Deserialize;
use tracing::warn;

use crate::{
    cli::Cli,
    clients::sendgrid::DEFAULT_HOST,
    error::ExportError,
    models::{store::StorePolicy, validation::validate_api_key},
    utils::normalize_path,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Optional `SENDGRID_*` variables, read from the process environment or `.env`.
///
/// The API host is only taken from the real process environment: a `.env`
/// lying around in the working directory must not redirect the API key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvOverrides {
    pub host: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_format: Option<LogFormat>,

    #[serde(skip)]
    pub ignored_dotenv_host: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub host: String,
    pub base_dir: PathBuf,
    pub policy: StorePolicy,
    pub timeout: Option<Duration>,
}

impl EnvOverrides {
    pub fn load() -> Result<Self, ExportError> {
        let host_in_process_env = std::env::var_os("SENDGRID_HOST").is_some();
        dotenv().ok();

        let overrides = envy::prefixed("SENDGRID_").from_env::<Self>()?;
        Ok(overrides.host_from_process_env(host_in_process_env))
    }

    /// Drops a host that only `.env` supplied.
    pub fn host_from_process_env(mut self, host_in_process_env: bool) -> Self {
        if !host_in_process_env && self.host.take().is_some() {
            self.ignored_dotenv_host = true;
        }
        self
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_default()
    }
}

impl Config {
    pub fn from_cli(cli: &Cli, env: EnvOverrides) -> Result<Self, ExportError> {
        validate_api_key(&cli.api_key)?;

        let base_dir = resolve_base_dir(&cli.base_dir)?;

        if env.ignored_dotenv_host {
            warn!("Ignoring SENDGRID_HOST from .env, export it in the environment to change the API host");
        }

        let host = env
            .host
            .map(|h| h.trim().trim_end_matches('/').to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        if host != DEFAULT_HOST {
            warn!(host = %host, "Using a non-default SendGrid host, the API key is sent there");
        }

        Ok(Self {
            api_key: cli.api_key.trim().to_string(),
            host,
            base_dir,
            policy: StorePolicy {
                include_plain: cli.include_plain,
                overwrite_existing: cli.overwrite,
                all_versions: cli.all,
            },
            timeout: env.timeout_secs.map(Duration::from_secs),
        })
    }
}

/// Blank means the current working directory.
fn resolve_base_dir(raw: &str) -> Result<PathBuf, ExportError> {
    if raw.trim().is_empty() {
        let cwd = std::env::current_dir().map_err(ExportError::Environment)?;
        return Ok(normalize_path(cwd));
    }

    Ok(normalize_path(raw))
}
