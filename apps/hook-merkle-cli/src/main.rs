use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use error::CliResult;

#[derive(Parser)]
#[command(name = "hook-merkle")]
#[command(about = "Hook Merkle CLI - Commit permitted hook arguments to a merkle tree")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the hook merkle tree and write its artifacts for each chain
    BuildTrees {
        /// Directory holding token_list.json, yield_sources_list.json and owner_list.json
        #[arg(short, long, default_value = "lists")]
        lists_dir: PathBuf,

        /// Output directory for root_<chainId>.json and treeDump_<chainId>.json
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Chain id to build for (repeatable)
        #[arg(short, long = "chain-id", default_values_t = vec![1u64])]
        chain_ids: Vec<u64>,

        /// Hook registry YAML (defaults to the built-in ERC-4626 hooks)
        #[arg(long)]
        hooks_file: Option<PathBuf>,

        /// Comma-separated hook addresses, in registry order
        #[arg(long)]
        hook_addresses: Option<String>,

        /// Keep leaves in generation order instead of sorting by hash
        #[arg(long)]
        unsorted_leaves: bool,
    },

    /// Verify every proof in a treeDump_<chainId>.json file
    VerifyDump {
        /// Tree dump file
        dump: PathBuf,

        /// Optional root_<chainId>.json to check the root against
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::BuildTrees {
            lists_dir,
            output_dir,
            chain_ids,
            hooks_file,
            hook_addresses,
            unsorted_leaves,
        } => commands::build_trees::execute(config::BuildTreesConfig {
            lists_dir,
            output_dir,
            chain_ids,
            hooks_file,
            hook_addresses,
            sort_leaves: !unsorted_leaves,
        }),

        Commands::VerifyDump { dump, root } => commands::verify_dump::execute(dump, root),
    }
}
