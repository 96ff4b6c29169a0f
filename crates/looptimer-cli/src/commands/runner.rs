use clap::Subcommand;

use super::{open_store, print_json, CmdResult};

#[derive(Subcommand)]
pub enum RunnerAction {
    /// Print the stored runner state as JSON
    Status,
    /// Stop the stored run and return to idle
    Exit,
}

pub fn run(action: RunnerAction) -> CmdResult {
    let mut store = open_store()?;

    match action {
        RunnerAction::Status => {
            print_json(&store.runner().snapshot())?;
        }
        RunnerAction::Exit => match store.exit_runner() {
            Some(event) => print_json(&event)?,
            None => print_json(&store.runner().snapshot())?,
        },
    }

    store.flush()?;
    Ok(())
}
