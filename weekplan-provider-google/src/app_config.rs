//! OAuth client credentials for the Google Calendar API.
//!
//! Accepts the `credentials.json` downloaded from
//! https://console.cloud.google.com/apis/credentials, whose client is nested
//! under `installed` or `web`, as well as a flat object.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Google OAuth client credentials (user-provided).
#[derive(Debug, Clone, Deserialize)]
pub struct AppCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CredentialsFile {
    Installed { installed: AppCredentials },
    Web { web: AppCredentials },
    Flat(AppCredentials),
}

impl AppCredentials {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Google credentials not found at {}\n\n\
                Create an OAuth client of type \"Desktop app\" at\n\
                https://console.cloud.google.com/apis/credentials\n\
                and save its JSON there.",
                path.display()
            );
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials from {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse credentials from {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let file: CredentialsFile = serde_json::from_str(contents)?;

        Ok(match file {
            CredentialsFile::Installed { installed } => installed,
            CredentialsFile::Web { web } => web,
            CredentialsFile::Flat(creds) => creds,
        })
    }
}
