//! Best score storage backends
//!
//! Native builds keep a small JSON file; web builds write a bare integer to
//! LocalStorage under the key the browser game always used. Both read
//! leniently: JSON or a plain integer is accepted, and anything unreadable
//! counts as 0.

use serde::{Deserialize, Serialize};

use crate::score::parse_best_score;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode best score: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage unavailable")]
    Unavailable,
}

/// On-disk/LocalStorage payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BestScoreRecord {
    best_score: u32,
}

fn decode(raw: Option<&str>) -> u32 {
    match raw.map(|s| serde_json::from_str::<BestScoreRecord>(s)) {
        Some(Ok(record)) => record.best_score,
        _ => parse_best_score(raw),
    }
}

fn encode(score: u32) -> Result<String, StorageError> {
    Ok(serde_json::to_string(&BestScoreRecord { best_score: score })?)
}

/// Bare integer, the format other readers of the LocalStorage key expect
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn encode_plain(score: u32) -> String {
    score.to_string()
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::{StorageError, decode, encode};
    use crate::score::BestScoreStore;

    /// Best score kept in a file, replaced atomically (tmp -> rename)
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        pub fn write(&self, score: u32) -> Result<(), StorageError> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let tmp = self.path.with_extension("tmp");
            fs::write(&tmp, encode(score)?)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }

    impl BestScoreStore for FileStore {
        fn load_best_score(&self) -> u32 {
            match fs::read_to_string(&self.path) {
                Ok(raw) => decode(Some(&raw)),
                Err(err) => {
                    if err.kind() != std::io::ErrorKind::NotFound {
                        log::warn!("Could not read {}: {err}", self.path.display());
                    }
                    0
                }
            }
        }

        fn save_best_score(&mut self, score: u32) {
            if let Err(err) = self.write(score) {
                log::warn!("Could not save best score to {}: {err}", self.path.display());
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{StorageError, decode, encode_plain};
    use crate::score::BestScoreStore;

    /// Best score in the browser's LocalStorage, stored as a bare integer
    #[derive(Debug, Clone, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        /// LocalStorage key
        const STORAGE_KEY: &'static str = "bestScore";

        fn storage() -> Result<web_sys::Storage, StorageError> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or(StorageError::Unavailable)
        }

        fn write(&self, score: u32) -> Result<(), StorageError> {
            let storage = Self::storage()?;
            storage
                .set_item(Self::STORAGE_KEY, &encode_plain(score))
                .map_err(|_| StorageError::Unavailable)
        }
    }

    impl BestScoreStore for LocalStorageStore {
        fn load_best_score(&self) -> u32 {
            let raw = Self::storage()
                .ok()
                .and_then(|s| s.get_item(Self::STORAGE_KEY).ok())
                .flatten();
            decode(raw.as_deref())
        }

        fn save_best_score(&mut self, score: u32) {
            match self.write(score) {
                Ok(()) => log::info!("Best score saved to LocalStorage"),
                Err(err) => log::warn!("Could not save best score: {err}"),
            }
        }
    }
}
