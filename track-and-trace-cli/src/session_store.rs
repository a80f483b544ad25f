//! Session cookies kept between runs
//!
//! Each invocation builds a fresh gateway, so the cookies issued at sign-in are
//! written to a small JSON file and loaded back on the next run.
//!
//! Default location:
//! - Linux: `~/.local/share/track-and-trace/session.json`
//! - macOS: `~/Library/Application Support/track-and-trace/session.json`
//! - Windows: `%LOCALAPPDATA%/track-and-trace/session.json`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use track_and_trace_gateway::Session;

const APP_DIR: &str = "track-and-trace";
const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    /// Cookies are only replayed against the service that issued them.
    user_endpoint: String,
    cookies: String,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at `explicit`, or in the platform data directory.
    pub fn resolve(explicit: Option<&Path>) -> Option<Self> {
        match explicit {
            Some(path) => Some(Self::new(path.to_path_buf())),
            None => dirs::data_local_dir()
                .map(|dir| Self::new(dir.join(APP_DIR).join(SESSION_FILE_NAME))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved cookies into `session`. Returns whether anything was restored.
    pub async fn load_into(&self, session: &Session, user_endpoint: &str) -> Result<bool> {
        if !self.path.exists() {
            tracing::debug!("No saved session at {}", self.path.display());
            return Ok(false);
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read session file {}", self.path.display()))?;
        let stored: StoredSession = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file {}", self.path.display()))?;

        if stored.user_endpoint != user_endpoint {
            tracing::debug!(
                "Saved session belongs to {}, not {user_endpoint}; ignoring it",
                stored.user_endpoint
            );
            return Ok(false);
        }

        session.restore_cookies(&stored.cookies);
        Ok(true)
    }

    /// Write the session's cookies, or remove the file when there are none.
    pub async fn save(&self, session: &Session, user_endpoint: &str) -> Result<()> {
        let Some(cookies) = session.cookie_header() else {
            return self.clear().await;
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let stored = StoredSession {
            user_endpoint: user_endpoint.to_string(),
            cookies,
        };
        let content = serde_json::to_string_pretty(&stored)?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600)).await?;
        }

        tracing::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!("Session file {} removed", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove session file {}", self.path.display())),
        }
    }
}
