//! Settings at ~/.config/weekplan/config.toml.
//!
//! Every key is optional; a missing file means all defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use config::{Config, File};
use serde::Deserialize;
use weekplan_core::Locale;
use weekplan_core::emit::Compiler;

static DEFAULT_SESSION_DIR: &str = "~/.config/weekplan/sessions";

fn default_credentials() -> PathBuf {
    PathBuf::from("credentials.json")
}

fn default_account() -> String {
    "default".to_string()
}

fn default_session_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SESSION_DIR)
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub locale: Locale,

    /// IANA zone name; the system zone when unset
    #[serde(default)]
    pub timezone: Option<String>,

    /// OAuth client file downloaded from the Google Cloud console
    #[serde(default = "default_credentials")]
    pub credentials: PathBuf,

    /// Key under which the session is stored
    #[serde(default = "default_account")]
    pub account: String,

    #[serde(default = "default_session_dir")]
    pub session_dir: PathBuf,

    #[serde(default)]
    pub compiler: Compiler,
}

impl Settings {
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("weekplan");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .with_context(|| format!("Failed to read config file at {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        Ok(settings)
    }

    pub fn credentials_path(&self) -> PathBuf {
        expand(&self.credentials)
    }

    pub fn session_path(&self) -> PathBuf {
        expand(&self.session_dir)
    }

    pub fn time_zone(&self) -> Result<Tz> {
        match &self.timezone {
            Some(name) => name
                .parse()
                .map_err(|_| anyhow::anyhow!("Unknown time zone '{}' in config", name)),
            None => Ok(system_time_zone()),
        }
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

fn system_time_zone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse().ok())
        .unwrap_or(Tz::UTC)
}
