use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mafstats::{Alphabet, MafReader, PanelConfig, StatisticKind, StatisticsPanel};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mafstats", about = "Per-block statistics over multiple alignment (MAF) files")]
struct Cli {
    /// Log panel construction and dropped blocks in more detail.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute statistics on every block and print one TSV line per block.
    Stats {
        /// MAF file (stdin when omitted).
        input: Option<PathBuf>,
        /// Statistics to compute (see `list`), comma separated or repeated.
        #[arg(short, long = "stat", required = true, value_delimiter = ',')]
        stats: Vec<StatisticKind>,
        /// Species selection (ingroup, four taxa, or rows to count).
        #[arg(long, value_delimiter = ',')]
        species: Vec<String>,
        /// First population for polymorphism statistics.
        #[arg(long, value_delimiter = ',')]
        pop1: Vec<String>,
        /// Second population for polymorphism statistics.
        #[arg(long, value_delimiter = ',')]
        pop2: Vec<String>,
        /// Outgroup polarising the site frequency spectrum.
        #[arg(long)]
        outgroup: Option<String>,
        /// Site frequency spectrum bin bounds.
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        bounds: Vec<f64>,
        /// Two species for pairwise divergence.
        #[arg(long, num_args = 2, value_names = ["SP1", "SP2"])]
        pair: Vec<String>,
        /// Species to report sequence lengths for.
        #[arg(long = "length-species", value_delimiter = ',')]
        length_species: Vec<String>,
        /// Suffix for character counts output.
        #[arg(long, default_value = "")]
        suffix: String,
        /// Alphabet of the alignment (dna or rna).
        #[arg(long, default_value = "dna")]
        alphabet: Alphabet,
        /// Decimal places for floating point values.
        #[arg(long, default_value_t = 6)]
        precision: usize,
    },
    /// List the statistics that can be requested.
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Stats {
            input,
            stats,
            species,
            pop1,
            pop2,
            outgroup,
            bounds,
            pair,
            length_species,
            suffix,
            alphabet,
            precision,
        } => {
            let mut config = PanelConfig::new()
                .with_alphabet(alphabet)
                .with_species(species)
                .with_sfs_bounds(bounds)
                .with_length_species(length_species)
                .with_suffix(suffix);
            for kind in stats {
                config = config.with_statistic(kind);
            }
            if !pop1.is_empty() || !pop2.is_empty() {
                config = config.with_populations(pop1, pop2);
            }
            if let Some(outgroup) = outgroup {
                config = config.with_outgroup(outgroup);
            }
            if let [first, second] = pair.as_slice() {
                config = config.with_pair(first.clone(), second.clone());
            }
            let panel = config.build().context("invalid statistics configuration")?;
            run_stats(input, panel, precision)?
        }
        Commands::List => run_list(),
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_input(input: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open MAF file {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn run_stats(input: Option<PathBuf>, mut panel: StatisticsPanel, precision: usize) -> Result<()> {
    if panel.is_empty() {
        bail!("no statistic requested");
    }
    let reader = MafReader::new(open_input(input.as_ref())?);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let mut dropped = 0usize;
    for (idx, block) in reader.enumerate() {
        let block_no = idx + 1;
        let block = block.with_context(|| format!("failed to read block {block_no}"))?;
        if let Err(err) = panel.compute(&block) {
            if err.is_block_local() {
                tracing::warn!(block = block_no, error = %err, "block skipped");
                dropped += 1;
                continue;
            }
            return Err(err).with_context(|| format!("statistics failed on block {block_no}"));
        }

        writeln!(out, "{}", panel.tsv_row(&block_no.to_string(), precision))?;
    }
    out.flush()?;

    if dropped > 0 {
        tracing::warn!(dropped, "some blocks were skipped");
    }
    Ok(())
}

fn run_list() {
    for kind in StatisticKind::ALL {
        println!("{kind}");
    }
}
