//! Creates a valid Google session (access token) that we can use to call the gcal API

use anyhow::{Context, Result};
use google_calendar::Client;
use weekplan_core::credentials::{Credential, CredentialStore};

use crate::app_config::AppCredentials;
use crate::authenticate::{authenticate, redirect_uri};

pub struct Session {
    account: String,
    credential: Credential,
}

impl Session {
    /// Load the stored session for `account`, refreshing it when expired and
    /// running the browser consent flow when there is none yet.
    pub async fn obtain<S: CredentialStore>(
        app: &AppCredentials,
        account: &str,
        store: &S,
    ) -> Result<Self> {
        let stored = store
            .load(account)
            .with_context(|| format!("Failed to load session for {}", account))?;

        let mut session = match stored {
            Some(credential) => Session {
                account: account.to_string(),
                credential,
            },
            None => {
                eprintln!("No stored Google session for '{}', starting sign-in.", account);
                let session = Session {
                    account: account.to_string(),
                    credential: authenticate(app).await?,
                };
                session.save(store)?;
                session
            }
        };

        if session.credential.is_expired() {
            session.refresh(app).await?;
            session.save(store)?;
        }

        Ok(session)
    }

    pub fn client(&self, app: &AppCredentials) -> Client {
        Client::new(
            app.client_id.clone(),
            app.client_secret.clone(),
            redirect_uri(),
            self.credential.access_token.clone(),
            self.credential.refresh_token.clone(),
        )
    }

    fn save<S: CredentialStore>(&self, store: &S) -> Result<()> {
        store
            .save(&self.account, &self.credential)
            .with_context(|| format!("Failed to save session for {}", self.account))
    }

    async fn refresh(&mut self, app: &AppCredentials) -> Result<()> {
        tracing::info!(account = %self.account, "access token expired, refreshing");

        let tokens = self
            .client(app)
            .refresh_access_token()
            .await
            .context("Failed to refresh token")?;

        self.credential = Credential::issued(
            tokens.access_token,
            keep_refresh_token(tokens.refresh_token, &self.credential.refresh_token),
            tokens.expires_in,
        );

        Ok(())
    }
}

/// Google typically doesn't return a new refresh_token on refresh.
fn keep_refresh_token(fresh: String, previous: &str) -> String {
    if fresh.is_empty() {
        previous.to_string()
    } else {
        fresh
    }
}
