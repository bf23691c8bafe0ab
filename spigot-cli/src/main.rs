//! Spigot CLI - Command-line interface
//!
//! Provides command-line access to Spigot functionality.

mod commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "spigot")]
#[command(about = "A YouTube stream lookup and download server")]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    commands::handle_command(cli.command).await?;

    Ok(())
}
