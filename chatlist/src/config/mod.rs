use std::path::{Path, PathBuf};

use anyhow::{Context as _, anyhow};
use serde::{Deserialize, Serialize};

use crate::PROFILE_DIR_ENV;

/// Screen preferences persisted between runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppPrefs {
    /// Empty search shows only favorite, unread and invited chats.
    pub show_unread_and_favorites: bool,
    /// Search bar and toolbar at the bottom of the screen.
    pub one_hand_ui: bool,
}

/// JSON-file backed preferences store at `<profile dir>/prefs.json`.
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    const FILE_NAME: &'static str = "prefs.json";

    /// Create a store rooted at `profile_dir`. Does not perform I/O.
    pub fn new(profile_dir: impl AsRef<Path>) -> Self {
        Self {
            path: profile_dir.as_ref().join(Self::FILE_NAME),
        }
    }

    /// Store in the default profile directory.
    pub fn open_default() -> Result<Self, anyhow::Error> {
        Ok(Self::new(Self::profile_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `CHATLIST_PROFILE_DIR` when it is absolute, else the platform config
    /// directory.
    pub fn profile_dir() -> Result<PathBuf, anyhow::Error> {
        if let Ok(custom_dir) = std::env::var(PROFILE_DIR_ENV) {
            let path = PathBuf::from(custom_dir);
            if path.is_absolute() {
                return Ok(path);
            } else {
                tracing::warn!("{PROFILE_DIR_ENV} is not an absolute path, using default");
            }
        }
        let base_dir = dirs::config_dir()
            .or_else(dirs::data_dir)
            .context("Failed to determine config directory")?;
        Ok(base_dir.join("chatlist"))
    }

    /// Load preferences. A missing file yields the defaults.
    pub async fn load(&self) -> Result<AppPrefs, anyhow::Error> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(v) => v,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "Preferences not found, using defaults");
                return Ok(AppPrefs::default());
            }
            Err(err) => {
                return Err(anyhow!(
                    "Failed to read preferences '{}': {}",
                    self.path.display(),
                    err
                ));
            }
        };
        let prefs: AppPrefs = serde_json::from_str(&raw)
            .map_err(|e| anyhow!("Failed to parse preferences: {}", e))?;
        Ok(prefs)
    }

    pub async fn save(&self, prefs: &AppPrefs) -> Result<(), anyhow::Error> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create profile dir '{}'", dir.display()))?;
        }
        let raw = serde_json::to_string_pretty(prefs)
            .map_err(|e| anyhow!("Failed to serialize preferences: {}", e))?;
        tokio::fs::write(&self.path, raw)
            .await
            .with_context(|| format!("Failed to write preferences '{}'", self.path.display()))?;
        Ok(())
    }

    /// Flip the unread-and-favorites filter and persist the result.
    pub async fn toggle_show_unread_and_favorites(&self) -> Result<AppPrefs, anyhow::Error> {
        let mut prefs = self.load().await?;
        prefs.show_unread_and_favorites = !prefs.show_unread_and_favorites;
        self.save(&prefs).await?;
        tracing::debug!(
            show_unread_and_favorites = prefs.show_unread_and_favorites,
            "Filter toggled"
        );
        Ok(prefs)
    }
}
