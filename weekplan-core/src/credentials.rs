//! Long-lived OAuth credentials and where they are kept between runs.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

/// Access and refresh token for one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// A credential issued now that expires after `expires_in` seconds.
    pub fn issued(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Credential {
            access_token,
            refresh_token,
            expires_at: Utc::now() + Duration::seconds(expires_in),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Persistent storage for credentials, keyed by account identity.
pub trait CredentialStore {
    fn load(&self, account: &str) -> PlannerResult<Option<Credential>>;

    fn save(&self, account: &str, credential: &Credential) -> PlannerResult<()>;
}

/// Keeps credentials for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credentials: Mutex<HashMap<String, Credential>>,
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self, account: &str) -> PlannerResult<Option<Credential>> {
        let credentials = self
            .credentials
            .lock()
            .map_err(|e| PlannerError::Credentials(e.to_string()))?;
        Ok(credentials.get(account).cloned())
    }

    fn save(&self, account: &str, credential: &Credential) -> PlannerResult<()> {
        let mut credentials = self
            .credentials
            .lock()
            .map_err(|e| PlannerError::Credentials(e.to_string()))?;
        credentials.insert(account.to_string(), credential.clone());
        Ok(())
    }
}
