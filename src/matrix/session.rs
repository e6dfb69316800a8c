//! Matrix session persistence.
//!
//! The bot keeps one JSON file under its data directory with the
//! authenticated session and the latest sync token, so a restart resumes
//! where the previous run left off instead of logging in again and
//! replaying history.

use std::path::{Path, PathBuf};

use anyhow::Context;
use log::trace;
use matrix_sdk::authentication::matrix::MatrixSession;
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Session state written to disk.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedSession {
    /// Authenticated Matrix session (tokens and device identity)
    pub session: MatrixSession,
    /// Latest sync token, absent until the first sync completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_token: Option<String>,
}

/// Reads and writes the persisted session file.
#[derive(Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store writing to `session.json` under the data directory.
    pub fn new(data_dir: &Path) -> Self {
        SessionStore { path: data_dir.join("session.json") }
    }

    /// Loads the persisted session, or `None` if no session was saved yet.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed; a corrupt
    /// session file should stop startup rather than trigger a fresh login
    /// that would orphan the previous device.
    pub async fn load(&self) -> Result<Option<PersistedSession>, anyhow::Error> {
        match fs::read_to_string(&self.path).await {
            Ok(data) => {
                let persisted = serde_json::from_str(&data)
                    .with_context(|| format!("invalid session file {}", self.path.display()))?;
                Ok(Some(persisted))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("failed to read session file {}", self.path.display()))),
        }
    }

    /// Writes the session file.
    pub async fn save(&self, persisted: &PersistedSession) -> Result<(), anyhow::Error> {
        trace!("persisting session to {}", self.path.display());
        let data = serde_json::to_string(persisted)?;
        fs::write(&self.path, data).await?;
        Ok(())
    }

    /// Updates the sync token of the already-persisted session.
    ///
    /// # Errors
    ///
    /// Fails if no session was persisted yet; the token on its own is
    /// useless without the session it belongs to.
    pub async fn save_sync_token(&self, sync_token: &str) -> Result<(), anyhow::Error> {
        let Some(mut persisted) = self.load().await? else {
            anyhow::bail!("no persisted session to attach the sync token to");
        };
        persisted.sync_token = Some(sync_token.to_owned());
        self.save(&persisted).await
    }

    /// Returns the persisted sync token, if any.
    pub async fn sync_token(&self) -> Result<Option<String>, anyhow::Error> {
        Ok(self.load().await?.and_then(|persisted| persisted.sync_token))
    }
}
