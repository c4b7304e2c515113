//! storyfreq CLI: grow a vocabulary deck from frequent story words.
//!
//! Mines MTG story articles for high-frequency words, looks them up in a
//! dictionary and merges them into a deck JSON file.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
