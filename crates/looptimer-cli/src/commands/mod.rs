pub mod config;
pub mod node;
pub mod run;
pub mod runner;
pub mod settings;
pub mod workout;

use looptimer_core::{CoreError, Database, TimerStore};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the store over the on-disk database in the data directory.
pub fn open_store() -> Result<TimerStore, CoreError> {
    Ok(TimerStore::open(Database::open()?))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Turn an ignored store operation into a CLI error.
pub fn ensure(applied: bool, message: impl Into<String>) -> CmdResult {
    if applied {
        Ok(())
    } else {
        let message: String = message.into();
        Err(message.into())
    }
}
