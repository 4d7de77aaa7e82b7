use anagram_sieve::{
    bench::{self, Tier},
    cases, driver,
    filter::{Variant, VARIANTS},
};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use itertools::Itertools;
use rand::{rngs::StdRng, SeedableRng};
use std::{fs, io, path::PathBuf, process::ExitCode};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod errors;

/// Remove anagrams and sub-anagrams from a word list.
#[derive(Debug, Parser)]
#[command(name = "sieve", version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the test cases against every variant
    Check {
        /// Test case file; defaults to testcases/cases.json
        #[arg(long)]
        cases: Option<PathBuf>,
        /// Only run this variant
        #[arg(long)]
        variant: Option<String>,
    },
    /// Print the surviving words, one per line
    Filter {
        #[arg(long, default_value = "indexed")]
        variant: String,
        /// Words to filter; read from stdin when empty
        words: Vec<String>,
    },
    /// Time every variant on generated inputs
    Bench {
        #[arg(long)]
        seed: Option<u64>,
        /// Write a markdown report here
        #[arg(long)]
        output: Option<PathBuf>,
        /// Input sizes, comma separated
        #[arg(long, value_delimiter = ',')]
        sizes: Vec<usize>,
    },
}

fn main() -> Result<ExitCode> {
    errors::install_hooks()?;
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "info" })
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match cli.command {
        Command::Check { cases, variant } => check(cases, variant),
        Command::Filter { variant, words } => filter_words(&variant, words),
        Command::Bench {
            seed,
            output,
            sizes,
        } => run_bench(seed, output, sizes),
    }
}

fn check(path: Option<PathBuf>, variant: Option<String>) -> Result<ExitCode> {
    let variants = match variant {
        Some(key) => vec![Variant::by_key(&key)?],
        None => VARIANTS.iter().collect(),
    };
    let cases = cases::load(path.as_deref());

    let mut success = true;
    for variant in variants {
        let report = driver::run(variant, &cases);
        println!("{report}\n");
        success &= report.is_success();
    }

    for (case, outputs) in driver::disagreements(&cases) {
        warn!(id = case.id, "variants disagree\n{outputs}");
        success = false;
    }

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn filter_words(variant: &str, mut words: Vec<String>) -> Result<ExitCode> {
    let variant = Variant::by_key(variant)?;
    if words.is_empty() {
        let input = io::read_to_string(io::stdin()).wrap_err("could not read stdin")?;
        words = input.split_whitespace().map(str::to_string).collect();
    }
    let survivors = variant.filter(&words)?;
    info!(
        variant = variant.key,
        input = words.len(),
        survivors = survivors.len()
    );
    if !survivors.is_empty() {
        println!("{}", survivors.iter().join("\n"));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_bench(seed: Option<u64>, output: Option<PathBuf>, sizes: Vec<usize>) -> Result<ExitCode> {
    let seed = seed.unwrap_or_else(rand::random);
    let tiers = if sizes.is_empty() {
        Tier::DEFAULT.to_vec()
    } else {
        sizes.into_iter().map(Tier::for_size).collect()
    };
    info!(seed, tiers = tiers.len(), "starting benchmark");

    let results = bench::run(&tiers, &mut StdRng::seed_from_u64(seed))?;
    println!("{}", bench::summary(&results));

    if let Some(path) = output {
        fs::write(&path, bench::markdown(&results, seed))
            .wrap_err_with(|| format!("could not write {}", path.display()))?;
        info!(path = %path.display(), "saved benchmark report");
    }
    Ok(ExitCode::SUCCESS)
}
