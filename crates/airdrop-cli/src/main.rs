//! airdrop
//!
//! Command-line host for the ticket airdrop lottery. Reads the artifacts the
//! chain fetchers leave on disk, builds the leaderboard, and runs the
//! deterministic draw for a block signature.
//!
//! Usage:
//!   airdrop leaderboard --tickets <path> [--names <path>] [--out <path>] [--locked-out <path>]
//!   airdrop airdrop     --leaderboard <path> --block <n> (--signature <s> | --signatures <path>) [draw options] [--out <path>]
//!   airdrop draws       --block <n> (--signature <s> | --signatures <path>) [draw options] [--out <path>]
//!   airdrop methods

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use airdrop_core::source::{NameLookup, SignatureSource, TicketSource};
use airdrop_draw::{generate_draws, run_airdrop, DistributionMethod};
use airdrop_entropy::DigitStream;
use airdrop_ledger::{build_leaderboard, locked_tickets, tally_weights};

mod config;
mod sources;

use config::DrawOptions;
use sources::{load_leaderboard, load_names, write_json, SignatureFile, TicketFile};

// ── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "airdrop",
    version,
    about = "Deterministic, auditable ticket airdrop lottery"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the weighted leaderboard from a ticket snapshot.
    Leaderboard {
        /// Ticket snapshot (JSON array).
        #[arg(long, default_value = "tickets.json")]
        tickets: PathBuf,
        /// Account display names (JSON object or array of {id, name}).
        #[arg(long)]
        names: Option<PathBuf>,
        #[arg(long, default_value = "leaderboard.json")]
        out: PathBuf,
        /// Also write the locked (non-liquid) tickets here.
        #[arg(long)]
        locked_out: Option<PathBuf>,
    },

    /// Draw winners for a block against a saved leaderboard.
    Airdrop {
        #[arg(long, default_value = "leaderboard.json")]
        leaderboard: PathBuf,
        #[command(flatten)]
        block: BlockArgs,
        #[command(flatten)]
        draw: DrawOptions,
        #[arg(long, default_value = "airdrop.json")]
        out: PathBuf,
    },

    /// Print (and optionally save) the raw draw numbers of each method.
    Draws {
        #[command(flatten)]
        block: BlockArgs,
        #[command(flatten)]
        draw: DrawOptions,
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the available distribution methods.
    Methods,
}

#[derive(clap::Args, Debug)]
struct BlockArgs {
    /// Block whose witness signature seeds the draw.
    #[arg(long)]
    block: u64,
    /// Raw signature of the block.
    #[arg(long, conflicts_with = "signatures")]
    signature: Option<String>,
    /// JSON object mapping block numbers to signatures.
    #[arg(long)]
    signatures: Option<PathBuf>,
}

impl BlockArgs {
    fn signature(&self) -> anyhow::Result<String> {
        match (&self.signature, &self.signatures) {
            (Some(sig), _) => Ok(sig.clone()),
            (None, Some(path)) => {
                let file = SignatureFile::open(path)?;
                Ok(file.block_signature(self.block)?)
            }
            (None, None) => bail!("one of --signature or --signatures is required"),
        }
    }
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,airdrop=info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Leaderboard {
            tickets,
            names,
            out,
            locked_out,
        } => cmd_leaderboard(&tickets, names.as_deref(), &out, locked_out.as_deref()),
        Command::Airdrop {
            leaderboard,
            block,
            draw,
            out,
        } => cmd_airdrop(&leaderboard, &block, &draw, &out),
        Command::Draws { block, draw, out } => cmd_draws(&block, &draw, out.as_deref()),
        Command::Methods => {
            for m in DistributionMethod::ALL {
                println!("{:<20} chunk width {}", m.name(), m.chunk_width());
            }
            Ok(())
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────────────

fn cmd_leaderboard(
    tickets: &Path,
    names: Option<&Path>,
    out: &Path,
    locked_out: Option<&Path>,
) -> anyhow::Result<()> {
    let snapshot = TicketFile::new(tickets)
        .tickets()
        .with_context(|| format!("loading tickets from {}", tickets.display()))?;
    info!(tickets = snapshot.len(), "ticket snapshot loaded");

    if let Some(path) = locked_out {
        write_json(path, &locked_tickets(&snapshot)).context("writing locked tickets")?;
        println!("Locked tickets saved to {}", path.display());
    }

    let names = names
        .map(load_names)
        .transpose()
        .context("loading account names")?;
    let tallies = tally_weights(&snapshot)?;
    let board = build_leaderboard(
        &tallies,
        names.as_ref().map(|n| n as &dyn NameLookup),
    )
    .context("building leaderboard")?;

    write_json(out, &board).context("writing leaderboard")?;
    println!("Leaderboard of {} holders saved to {}", board.len(), out.display());
    Ok(())
}

fn cmd_airdrop(
    leaderboard: &Path,
    block: &BlockArgs,
    draw: &DrawOptions,
    out: &Path,
) -> anyhow::Result<()> {
    let board = load_leaderboard(leaderboard)
        .with_context(|| format!("loading leaderboard from {}", leaderboard.display()))?;
    let config = draw.resolve().context("resolving draw configuration")?;
    let signature = block.signature()?;

    let result = run_airdrop(&board, &signature, block.block, &config)
        .with_context(|| format!("running airdrop for block {}", block.block))?;

    for w in &result.result {
        println!(
            "{:<12} {:<24} {:>6} hits {:>10.5}% {:>16.5}",
            w.id, w.name, w.count, w.percent, w.reward
        );
    }
    write_json(out, &result).context("writing airdrop result")?;
    println!(
        "{} winners from {} draws; result saved to {}",
        result.result.len(),
        result.total_draws,
        out.display()
    );
    Ok(())
}

fn cmd_draws(block: &BlockArgs, draw: &DrawOptions, out: Option<&Path>) -> anyhow::Result<()> {
    let config = draw.resolve().context("resolving draw configuration")?;
    let signature = block.signature()?;
    let stream = DigitStream::from_signature(&signature, config.hash);
    let draws = generate_draws(&stream, &config.methods)?;

    println!("block {} digit stream: {} digits", block.block, stream.len());
    for d in &draws {
        println!("{:<20} {:>8} draws", d.method.name(), d.numbers.len());
    }
    if let Some(path) = out {
        write_json(path, &draws).context("writing draws")?;
        println!("Draws saved to {}", path.display());
    }
    Ok(())
}
