//! CLI frontend for `roll`: dice expressions, a yes/no oracle, narrative d6
//! tables, and spark tables.

mod commands;
mod config;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use roll_dice::RandomSource;
use roll_oracle::{NarrativeTable, Odds};
use tracing_subscriber::EnvFilter;

use config::RollConfig;

const EXAMPLES: &str = "\
Examples:
  roll 2d6 + d4 + 3
  roll d20 - 2
  roll -o
  roll --oracle=likely
  roll -s drama
  roll --list-spark --spark-file tables.json
  roll -w -l";

#[derive(Parser)]
#[command(
    name = "roll",
    about = "Dice, oracle and spark table roller for solo play",
    version,
    after_help = EXAMPLES
)]
struct Cli {
    /// Ask the oracle a yes/no question (ODDS: impossible .. 50/50 .. certain)
    #[arg(
        short,
        long,
        value_name = "ODDS",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "50/50"
    )]
    oracle: Option<Odds>,

    /// Roll 2d12 on a spark table, by sheet or table name
    #[arg(short, long, value_name = "SHEET|TABLE")]
    spark: Option<String>,

    /// Spark data file, CSV export or JSON [default: Spark Tables PL.csv]
    #[arg(long, value_name = "PATH", env = "SPARK_FILE")]
    spark_file: Option<PathBuf>,

    /// List spark sheets and their tables
    #[arg(long)]
    list_spark: bool,

    /// Roll on the wilderness table
    #[arg(short, long)]
    wilderness: bool,

    /// Roll on the luck table
    #[arg(short, long)]
    luck: bool,

    /// Roll on the unresolved situation table
    #[arg(short, long)]
    unresolved: bool,

    /// Roll on the local mood table
    #[arg(short, long)]
    mood: bool,

    /// Seed the random source for reproducible rolls
    #[arg(long, value_name = "N", env = "ROLL_SEED")]
    seed: Option<u64>,

    /// Log debug detail to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Dice expression, e.g. `2d6 + d4 + 3`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    expression: Vec<String>,
}

impl Cli {
    /// Narrative tables selected by flag, in run order.
    fn narrative_tables(&self) -> Vec<NarrativeTable> {
        let flags = [self.wilderness, self.luck, self.unresolved, self.mood];
        NarrativeTable::all()
            .iter()
            .zip(flags)
            .filter_map(|(table, on)| on.then_some(*table))
            .collect()
    }

    fn dice_expression(&self) -> Option<String> {
        let joined = self.expression.join(" ");
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn has_operation(&self) -> bool {
        self.list_spark
            || self.oracle.is_some()
            || self.spark.is_some()
            || !self.narrative_tables().is_empty()
            || self.dice_expression().is_some()
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !cli.has_operation() {
        // Help goes to stdout; a bare invocation is still a usage error.
        if let Err(e) = print_usage(&mut io::stdout()) {
            eprintln!("{} cannot print usage: {e}", "error:".red().bold());
        }
        process::exit(1);
    }

    let config = RollConfig::default()
        .with_spark_file(cli.spark_file.clone())
        .with_seed(cli.seed);
    tracing::debug!(spark_file = %config.spark_file.display(), seed = ?config.seed, "resolved config");

    let mut rng = config.rng();
    if let Err(e) = run(&cli, &config, &mut rng) {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}

fn print_usage(out: &mut impl Write) -> io::Result<()> {
    Cli::command().write_help(out)?;
    writeln!(out)
}

/// Run the selected operations: listing, oracle, spark, narrative, dice.
fn run(cli: &Cli, config: &RollConfig, rng: &mut impl RandomSource) -> Result<(), String> {
    if cli.list_spark {
        // A listing failure is reported but does not stop later operations.
        commands::spark::list(&config.spark_file)
            .unwrap_or_else(|e| eprintln!("{} {e}", "warning:".yellow().bold()));
    }

    if let Some(odds) = cli.oracle {
        commands::oracle::run(odds, &mut *rng);
    }

    if let Some(name) = &cli.spark {
        commands::spark::roll(&config.spark_file, name, &mut *rng)?;
    }

    for table in cli.narrative_tables() {
        commands::narrative::run(table, &mut *rng);
    }

    if let Some(expr) = cli.dice_expression() {
        commands::dice::run(&expr, rng)?;
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
