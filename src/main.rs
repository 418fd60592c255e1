mod api;
mod category;
mod check;
mod cli;
mod config;
mod data;
mod enrichments;
mod presentation;
mod render;
mod tui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::time::Duration;

use category::Category;
use config::Config;

#[derive(Parser)]
#[command(name = "freemodels")]
#[command(about = "TUI/CLI tool for discovering free AI models on OpenRouter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List free models as a card table
    List {
        /// Only show one use-case category (Writing, Coding, Learning, Business, Creative)
        #[arg(long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the full card for one free model
    Show {
        /// Model ID (e.g., mistralai/mistral-7b-instruct:free)
        model_id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Poll the catalogue endpoint until it serves models (deployment check)
    Check {
        /// URL to poll (defaults to the configured catalogue endpoint)
        #[arg(long)]
        url: Option<String>,
        /// Attempts before giving up
        #[arg(long)]
        retries: Option<u32>,
        /// Seconds between attempts
        #[arg(long)]
        delay: Option<u64>,
        /// Per-attempt timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Some(Commands::List { category, json }) => {
            let category = category.as_deref().map(parse_category).transpose()?;
            cli::list::free_models(&config, category, json)?;
        }
        Some(Commands::Show { model_id, json }) => cli::show::model(&config, &model_id, json)?,
        Some(Commands::Check {
            url,
            retries,
            delay,
            timeout,
        }) => {
            let options = check::CheckOptions {
                url: url
                    .or_else(|| config.check.url.clone())
                    .unwrap_or_else(|| config.api.url.clone()),
                retries: retries.unwrap_or(config.check.retries),
                delay: Duration::from_secs(delay.unwrap_or(config.check.delay_seconds)),
                timeout: Duration::from_secs(timeout.unwrap_or(config.check.timeout_seconds)),
            };
            check::run(&options)?;
        }
        None => tui::run(&config)?,
    }

    Ok(())
}

fn parse_category(name: &str) -> Result<Category> {
    Category::from_name(name)
        .ok_or_else(|| anyhow::anyhow!("Unknown category '{}' (expected Writing, Coding, Learning, Business, or Creative)", name))
}
