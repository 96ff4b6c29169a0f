use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "looptimer", version, about = "Nested interval timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Workout management
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// Edit the active workout's tree
    Node {
        #[command(subcommand)]
        action: commands::node::NodeAction,
    },
    /// Play the active workout in the foreground
    Run {
        /// Workout to activate before starting
        #[arg(long)]
        workout: Option<String>,
    },
    /// Inspect or stop the stored run
    Runner {
        #[command(subcommand)]
        action: commands::runner::RunnerAction,
    },
    /// Sound preset and theme
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Logs go to stderr so stdout stays machine-readable.
/// `RUST_LOG` wins over the configured `log.level`.
fn init_tracing() {
    let level = looptimer_core::Config::load_or_default().log.level;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Workout { action } => commands::workout::run(action),
        Commands::Node { action } => commands::node::run(action),
        Commands::Run { workout } => commands::run::run(workout),
        Commands::Runner { action } => commands::runner::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
