use clap::Parser;
use tsa_auction::{epsilon_sweep, AscendingAuction};
use tsa_core::models::Market;

mod io;
pub use io::*;

mod commands;
pub use commands::*;

pub mod scenarios;

// The top-level arguments -- presently just which subcommand to execute
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn evaluate(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Run {
                io,
                overrides,
                trace,
            } => {
                let mut config = io.load()?;
                overrides.apply(&mut config);
                let mut market = Market::new(config)?;
                let outcome = AscendingAuction::new().run(&mut market);
                tracing::info!(
                    status = ?outcome.status,
                    rounds = outcome.rounds_used,
                    "auction finished"
                );
                if trace {
                    run::print_trace(&outcome);
                }
                let report = run::RunReport::new(&market, outcome);
                let output = io.write()?;
                serde_json::to_writer_pretty(output, &report)?;
            }
            Commands::Sweep {
                io,
                overrides,
                epsilons,
            } => {
                let mut config = io.load()?;
                overrides.apply(&mut config);
                let metrics = epsilon_sweep(&config, &epsilons)?;
                let output = io.write()?;
                serde_json::to_writer_pretty(output, &metrics)?;
            }
            Commands::Export { io } => {
                let config = io.load()?;
                let output = io.write()?;
                serde_json::to_writer_pretty(output, &config)?;
            }
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("unknown scenario {0:?}; available: {names}", names = scenarios::NAMES.join(", "))]
    UnknownScenario(String),
    #[error("either a market file or --scenario is required")]
    MissingInput,
}
