use std::io;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::info;

use stockmatrix_analytics::{AnalysisConfig, AnalysisJob, PolicyInput, PolicyJob, PolicyReport};
use stockmatrix_cli::{Cli, Command, DemoArgs, RunArgs, input, output, sample};

fn main() -> Result<()> {
    let cli = Cli::parse();
    stockmatrix_observability::init(cli.log_format);

    let (report, format) = match cli.command {
        Command::Run(args) => {
            let format = args.format;
            (run(args)?, format)
        }
        Command::Demo(args) => {
            let format = args.format;
            (demo(args)?, format)
        }
    };

    output::write_report(&report, format, io::stdout().lock())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn run(args: RunArgs) -> Result<PolicyReport> {
    let mut config = input::load_config(args.config.as_deref())?;
    if args.strict {
        config = config.with_strict(true);
    }
    let transactions = input::load_transactions(&args.transactions)?;
    let inventory = input::load_inventory(&args.inventory)?;
    info!(
        transactions = transactions.len(),
        inventory = inventory.len(),
        "input files loaded"
    );

    let job = PolicyJob::new(
        config,
        PolicyInput {
            as_of: args.as_of.unwrap_or_else(today),
            transactions,
            inventory,
        },
    );
    job.run().context("analysis failed")
}

fn demo(args: DemoArgs) -> Result<PolicyReport> {
    let config = AnalysisConfig::default();
    let as_of = args.as_of.unwrap_or_else(today);
    let data = sample::generate(args.parts, args.seed, as_of, config.window_months)?;
    info!(
        parts = args.parts,
        seed = args.seed,
        transactions = data.transactions.len(),
        "sample data generated"
    );

    let job = PolicyJob::new(
        config,
        PolicyInput {
            as_of,
            transactions: data.transactions,
            inventory: data.inventory,
        },
    );
    job.run().context("analysis failed")
}
