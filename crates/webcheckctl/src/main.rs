//! Webcheck Control - CLI client for the webcheck daemon
//!
//! Sends batches of pages through webcheckd and prints the results.

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use webcheckctl::client::{WebcheckClient, DEFAULT_SERVER};
use webcheckctl::commands;
use webcheckctl::errors::exit_code_for;

#[derive(Parser)]
#[command(name = "webcheckctl")]
#[command(about = "Webcheck - W3C HTML and CSS validation", long_about = None)]
#[command(version)]
struct Cli {
    /// webcheckd base URL
    #[arg(long, global = true, default_value = DEFAULT_SERVER)]
    server: String,

    /// Print raw JSON results
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the HTML of each page
    Html {
        /// Page URLs, validated in order
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Validate the CSS of each page
    Css {
        /// Page URLs, validated in order
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Validate HTML and CSS of a GitHub Pages course site
    Site {
        /// GitHub username owning the site
        username: String,
    },
}

async fn run(cli: Cli) -> Result<i32> {
    let client = WebcheckClient::new(&cli.server)?;

    match cli.command {
        Commands::Html { urls } => commands::html(&client, &urls, cli.json).await,
        Commands::Css { urls } => commands::css(&client, &urls, cli.json).await,
        Commands::Site { username } => commands::site(&client, &username, cli.json).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            exit_code_for(&e)
        }
    };

    std::process::exit(code);
}
