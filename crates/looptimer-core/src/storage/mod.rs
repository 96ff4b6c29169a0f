mod config;
mod database;
mod memory;

pub use config::Config;
pub use database::{Database, STATE_KEY};
pub use memory::MemoryStorage;

use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Persistence collaborator for the store.
///
/// `load` yields the raw stored payload (or `None` when nothing was ever
/// saved); decoding and recovery happen in the store.
pub trait StateStorage {
    fn load(&self) -> Result<Option<String>>;

    fn save(&self, payload: &str) -> Result<()>;
}

impl<S: StateStorage + ?Sized> StateStorage for Box<S> {
    fn load(&self) -> Result<Option<String>> {
        (**self).load()
    }

    fn save(&self, payload: &str) -> Result<()> {
        (**self).save(payload)
    }
}

/// Returns the data directory.
///
/// `LOOPTIMER_DATA_DIR` wins when set. Otherwise `~/.config/looptimer`, or
/// `~/.config/looptimer-dev` with `LOOPTIMER_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("LOOPTIMER_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env =
                std::env::var("LOOPTIMER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("looptimer-dev")
            } else {
                base_dir.join("looptimer")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| CoreError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
