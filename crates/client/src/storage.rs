//! Persistence for the client's credentials.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::models::UserInfo;

/// Everything the client remembers between requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredAuth {
    pub access: Option<String>,
    pub refresh: Option<String>,
    /// Static token issued by `/auth/admin-login`.
    pub api_token: Option<String>,
    pub user: Option<UserInfo>,
}

/// A place to keep [`StoredAuth`].
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<StoredAuth, ClientError>;
    fn save(&self, auth: &StoredAuth) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

/// In-process store; credentials are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: Mutex<StoredAuth>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<StoredAuth, ClientError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, auth: &StoredAuth) -> Result<(), ClientError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        *guard = auth.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        self.save(&StoredAuth::default())
    }
}

/// JSON file store. A missing file reads as an empty store.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<StoredAuth, ClientError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoredAuth::default()),
            Err(e) => Err(ClientError::Storage(format!(
                "Failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&self, auth: &StoredAuth) -> Result<(), ClientError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| {
                ClientError::Storage(format!("Failed to create {}: {e}", dir.display()))
            })?;
        }
        let bytes = serde_json::to_vec_pretty(auth)?;
        std::fs::write(&self.path, bytes).map_err(|e| {
            ClientError::Storage(format!("Failed to write {}: {e}", self.path.display()))
        })
    }

    fn clear(&self) -> Result<(), ClientError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(format!(
                "Failed to remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}
