use super::{IOArgs, OverrideArgs};
use clap::Subcommand;

pub mod run;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the ascending auction and report the terminal state
    Run {
        #[command(flatten)]
        io: IOArgs,

        #[command(flatten)]
        overrides: OverrideArgs,

        /// Print the per-round price/allocation trace to stderr
        #[arg(short, long)]
        trace: bool,
    },

    /// Re-run the market once per price increment and compare the runs
    Sweep {
        #[command(flatten)]
        io: IOArgs,

        #[command(flatten)]
        overrides: OverrideArgs,

        /// The price increments to sweep over
        #[arg(
            long,
            value_delimiter = ',',
            default_value = "0.05,0.1,0.25,0.5,1.0,2.0"
        )]
        epsilons: Vec<f64>,
    },

    /// Write the loaded market definition back out as JSON
    Export {
        #[command(flatten)]
        io: IOArgs,
    },
}
