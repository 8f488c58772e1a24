mod cli;
mod commands;
mod error;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        ui::error(err.to_string());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(ui::log_filter(cli.options.verbose)),
    )
    .format_timestamp(None)
    .init();

    match cli.command {
        Commands::Init(args) => commands::init::run(&cli.options, args),
        Commands::Check => commands::check::run(&cli.options).await,
        Commands::Read => commands::read::run(&cli.options).await,
        Commands::Write(args) => commands::write::run(&cli.options, args).await,
        Commands::Schema(args) => commands::schema::run(args),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
