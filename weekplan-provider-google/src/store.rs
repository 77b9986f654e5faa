//! Credentials kept as one TOML file per account.

use std::path::{Path, PathBuf};

use weekplan_core::credentials::{Credential, CredentialStore};
use weekplan_core::{PlannerError, PlannerResult};

pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileCredentialStore { dir: dir.into() }
    }

    fn path(&self, account: &str) -> PathBuf {
        let slug = account.replace(['/', '\\', ':'], "_");
        self.dir.join(format!("{slug}.toml"))
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self, account: &str) -> PlannerResult<Option<Credential>> {
        let path = self.path(account);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)?;
        let credential = toml::from_str(&contents).map_err(|e| {
            PlannerError::Credentials(format!(
                "Failed to parse session from {}: {e}",
                path.display()
            ))
        })?;

        Ok(Some(credential))
    }

    fn save(&self, account: &str, credential: &Credential) -> PlannerResult<()> {
        let contents = toml::to_string_pretty(credential)
            .map_err(|e| PlannerError::Credentials(format!("Failed to serialize session: {e}")))?;

        let path = self.path(account);
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, contents)?;
        restrict_to_owner(&path)?;

        Ok(())
    }
}

/// Session files hold OAuth tokens: owner-only (0600).
#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("sessions"));
        let credential = Credential::issued("access".into(), "refresh".into(), 3600);

        assert_eq!(store.load("anna@example.ch").unwrap(), None);
        store.save("anna@example.ch", &credential).unwrap();

        let loaded = store.load("anna@example.ch").unwrap().unwrap();
        assert_eq!(loaded.refresh_token, "refresh");
        assert_eq!(loaded.expires_at.timestamp(), credential.expires_at.timestamp());
    }

    #[test]
    fn account_names_are_made_path_safe() {
        let store = FileCredentialStore::new("/tmp/sessions");
        assert_eq!(
            store.path("work/team:one"),
            PathBuf::from("/tmp/sessions/work_team_one.toml")
        );
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path());
        store
            .save("default", &Credential::issued("a".into(), "r".into(), 60))
            .unwrap();

        let mode = std::fs::metadata(dir.path().join("default.toml"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn corrupt_file_is_a_credentials_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.toml"), "not = [valid").unwrap();

        let store = FileCredentialStore::new(dir.path());
        assert!(matches!(store.load("default"), Err(PlannerError::Credentials(_))));
    }
}
