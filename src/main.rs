//! git-glance - Terminal summary panel for git repositories
//!
//! Run with `git-glance` in a repository, or `git-glance --help` for usage.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use git_glance::{
    config::Config,
    repo::LocalRepo,
    summary::rows,
    tui::App,
    RepoQuery, APP_NAME, VERSION,
};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(about = "A terminal summary panel for git repositories")]
#[command(long_about = None)]
struct Cli {
    /// Repository path (default: current directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive summary panel (default)
    Tui,

    /// Print the summary rows as plain text and exit
    Status,

    /// Show configuration
    Config {
        /// Initialize config file with defaults
        #[arg(long)]
        init: bool,
    },
}

fn setup_logging(debug: bool, log_file: Option<&PathBuf>) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info").add_directive("tokio=warn".parse()?)
    };

    if let Some(path) = log_file {
        // Log to file when running the TUI so logs don't corrupt the display
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(file).with_target(false))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false))
            .with(filter)
            .init();
    }

    Ok(())
}

fn repo_path(cli: &Cli) -> PathBuf {
    cli.path
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config, using defaults: {}", e);
        Config::default()
    });

    match cli.command {
        None | Some(Commands::Tui) => {
            let log_file = config
                .log_file
                .clone()
                .unwrap_or_else(|| std::env::temp_dir().join("git-glance.log"));
            setup_logging(cli.debug || config.debug, Some(&log_file))?;

            info!("Starting git-glance v{}", VERSION);

            let repo = Arc::new(LocalRepo::discover(repo_path(&cli))?);
            let mut app = App::new(config, repo)?;
            app.run().await?;
        }

        Some(Commands::Status) => {
            setup_logging(cli.debug || config.debug, None)?;

            let repo = LocalRepo::discover(repo_path(&cli))?;
            let head = repo.head();
            let status = repo.status();

            for line in rows::generate_rows(&head, status.as_ref()) {
                println!("{}", line.as_text());
            }
        }

        Some(Commands::Config { init }) => {
            setup_logging(cli.debug, None)?;

            if init {
                config.save()?;
                println!(
                    "Configuration initialized at {:?}",
                    Config::config_file_path()?
                );
            } else {
                println!("Configuration:");
                println!("{}", toml::to_string_pretty(&config)?);
                println!("\nConfig file: {:?}", Config::config_file_path()?);
            }
        }
    }

    Ok(())
}
