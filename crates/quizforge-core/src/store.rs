//! Learner profile persistence.
//!
//! Profiles are keyed by user id. Loading never fails: an absent,
//! unreadable, or malformed record yields a fresh default profile.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;
use crate::learner::UserProfile;

/// Storage backend for learner profiles.
pub trait ProfileStore: Send + Sync {
    /// Load the profile for `user_id`, or a fresh one if none is usable.
    fn load(&self, user_id: &str) -> UserProfile;

    /// Persist a profile under its own `user_id`.
    fn save(&self, profile: &UserProfile) -> Result<(), StoreError>;
}

/// Whether `user_id` is safe to embed in a file name.
pub fn is_valid_user_id(user_id: &str) -> bool {
    !user_id.is_empty()
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// One `user_profile_{user_id}.json` file per user in a directory.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    dir: PathBuf,
}

impl JsonProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the profile for `user_id`.
    pub fn profile_path(&self, user_id: &str) -> PathBuf {
        self.dir.join(format!("user_profile_{user_id}.json"))
    }
}

impl ProfileStore for JsonProfileStore {
    fn load(&self, user_id: &str) -> UserProfile {
        if !is_valid_user_id(user_id) {
            tracing::warn!("invalid user id {user_id:?}, using a fresh profile");
            return UserProfile::new(user_id);
        }

        let path = self.profile_path(user_id);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no profile at {}, starting fresh", path.display());
                return UserProfile::new(user_id);
            }
            Err(e) => {
                tracing::warn!("failed to read profile {}: {}", path.display(), e);
                return UserProfile::new(user_id);
            }
        };

        match serde_json::from_str::<UserProfile>(&content) {
            Ok(mut profile) => {
                // the file name is the key; a mismatched id inside is ignored
                profile.user_id = user_id.to_string();
                profile
            }
            Err(e) => {
                tracing::warn!("corrupt profile {}: {}, starting fresh", path.display(), e);
                UserProfile::new(user_id)
            }
        }
    }

    fn save(&self, profile: &UserProfile) -> Result<(), StoreError> {
        if !is_valid_user_id(&profile.user_id) {
            return Err(StoreError::InvalidUserId(profile.user_id.clone()));
        }

        let path = self.profile_path(&profile.user_id);
        let json = serde_json::to_string_pretty(profile)?;
        let io_err = |source: std::io::Error| StoreError::Io {
            path: path.display().to_string(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        std::fs::write(&path, json).map_err(io_err)?;

        tracing::info!(
            "saved profile {} ({} responses) to {}",
            profile.user_id,
            profile.total_questions(),
            path.display()
        );
        Ok(())
    }
}

/// In-process store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<String, UserProfile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, UserProfile>> {
        self.profiles.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self, user_id: &str) -> UserProfile {
        self.lock()
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| UserProfile::new(user_id))
    }

    fn save(&self, profile: &UserProfile) -> Result<(), StoreError> {
        if profile.user_id.is_empty() {
            return Err(StoreError::InvalidUserId(String::new()));
        }
        self.lock().insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }
}
