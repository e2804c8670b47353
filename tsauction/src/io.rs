use crate::{scenarios, CliError};
use clap::Args;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write, stdin, stdout},
    path::PathBuf,
    str::FromStr,
};
use tsa_core::models::MarketConfig;

// Every subcommand consumes a market definition and emits a JSON document.
// This struct standardizes their implementation.
#[derive(Args)]
pub struct IOArgs {
    /// The market JSON file ("-" implies stdin)
    #[arg(
        value_parser = clap::value_parser!(PathOrStd),
        required_unless_present = "scenario",
        conflicts_with = "scenario"
    )]
    input: Option<PathOrStd>,

    /// Use a built-in scenario instead of a file
    #[arg(short, long)]
    scenario: Option<String>,

    /// Seed for the randomized built-in scenarios
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// The output file ("-" implies stdout)
    #[arg(short, long, default_value = "-", value_parser = clap::value_parser!(PathOrStd))]
    output: PathOrStd,
}

impl IOArgs {
    pub fn load(&self) -> anyhow::Result<MarketConfig> {
        if let Some(name) = &self.scenario {
            return Ok(scenarios::builtin(name, self.seed)?);
        }
        match &self.input {
            Some(PathOrStd::Path(path)) => {
                Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
            }
            Some(PathOrStd::Std) => Ok(serde_json::from_reader(stdin().lock())?),
            None => Err(CliError::MissingInput)?,
        }
    }

    pub fn write(&self) -> anyhow::Result<Box<dyn Write>> {
        match &self.output {
            PathOrStd::Path(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
            PathOrStd::Std => Ok(Box::new(stdout().lock())),
        }
    }
}

// Scenario-level knobs that apply on top of whatever source was loaded.
#[derive(Args)]
pub struct OverrideArgs {
    /// Override the price increment
    #[arg(short, long)]
    epsilon: Option<f64>,

    /// Override the round cap
    #[arg(long)]
    round_cap: Option<usize>,

    /// Override the number of identical resource timelines
    #[arg(short, long)]
    resources: Option<usize>,
}

impl OverrideArgs {
    pub fn apply(&self, config: &mut MarketConfig) {
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(round_cap) = self.round_cap {
            config.round_cap = round_cap;
        }
        if let Some(resources) = self.resources {
            config.resources = resources;
        }
    }
}

#[derive(Clone)]
enum PathOrStd {
    Path(PathBuf),
    Std,
}

impl FromStr for PathOrStd {
    type Err = <PathBuf as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Self::Std)
        } else {
            Ok(Self::Path(s.parse()?))
        }
    }
}
