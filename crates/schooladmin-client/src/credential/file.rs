//! JSON file credential store, so a login survives between CLI runs.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, warn};

use schooladmin_core::error::{AppError, ErrorKind};
use schooladmin_core::result::AppResult;
use schooladmin_core::traits::credential::{Credential, CredentialProvider};

/// Persists the credential as JSON at a fixed path.
///
/// The file is read once on open and cached; `set` and `clear` write
/// through to disk before updating the cache.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    cached: RwLock<Option<Credential>>,
}

impl FileCredentialStore {
    /// Open the store at `path`. A missing file means signed out; an
    /// unreadable one is logged and also treated as signed out.
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let cached = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Credential>(&text) {
                Ok(credential) => Some(credential),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring corrupt credential file");
                    None
                }
            },
            Err(e) if e.kind() == IoErrorKind::NotFound => None,
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Internal,
                    format!("Failed to read credential file {}", path.display()),
                    e,
                ));
            }
        };

        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }

    /// Location of the credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, credential: &Credential) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(credential)?;
        fs::write(&self.path, json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

impl CredentialProvider for FileCredentialStore {
    fn get(&self) -> Option<String> {
        self.credential().map(|c| c.token)
    }

    fn credential(&self) -> Option<Credential> {
        self.cached
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&self, credential: Credential) -> AppResult<()> {
        self.write_file(&credential)?;
        debug!(path = %self.path.display(), "Credential stored");
        *self
            .cached
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(credential);
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Credential removed"),
            Err(e) if e.kind() == IoErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        *self
            .cached
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}
