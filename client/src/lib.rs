mod error;
mod run;
pub mod ui;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use common::{Config, Mode, Phase, config::parse_mode};

pub use error::ClientError;
pub use run::{SolveReport, report_error, run_interactive, solve, status_line};

/// Generate perfect mazes and watch breadth-first or depth-first search
/// find the way through them.
#[derive(Parser, Debug)]
#[command(name = "MazeSearch", version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CliCommand {
    /// Solve one maze without animation and print the result
    Solve {
        /// Traversal mode: bfs or dfs
        #[arg(value_parser = parse_mode)]
        mode: Mode,

        /// Print the final grid and path as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Logs go to stderr so they never mix with the grid; `RUST_LOG` overrides
/// the default level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run_client(args: Args) -> Result<Phase, ClientError> {
    let config = Config::from_env()?;

    match args.command {
        Some(CliCommand::Solve { mode, json }) => {
            solve(&config, mode, json, &mut std::io::stdout().lock())
        }
        None => {
            run_interactive(&config)?;
            Ok(Phase::Idle)
        }
    }
}
