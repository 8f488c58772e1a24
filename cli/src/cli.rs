use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use simple_store::config::DEFAULT_CONFIG_FILE;

#[derive(Debug, Parser)]
#[command(name = "simple-store")]
#[command(bin_name = "simple-store")]
#[command(about = "Read and write the SimpleStore contract on Sepolia")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub options: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a starter configuration file.
    Init(InitArgs),
    /// Show the signing account and its balance, and validate the setup.
    Check,
    /// Print the value currently stored in the contract.
    Read,
    /// Store a new value and wait for confirmation.
    Write(WriteArgs),
    /// Print the contract interface as JSON.
    Schema(SchemaArgs),
    /// Generate shell completion scripts.
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct GlobalOptions {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Sepolia JSON-RPC endpoint, overriding the file and environment.
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Contract address, overriding the file and environment.
    #[arg(long, global = true)]
    pub address: Option<String>,

    /// Increase log output (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration file.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct WriteArgs {
    /// Unsigned decimal integer to store.
    #[arg(default_value = "42")]
    pub value: String,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}
