use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use market_board::{
    board::PollingController,
    config::BoardConfig,
    identity::UserIdentity,
    providers::build_provider,
    render::render_board,
};
use quote_feed::{QuoteProvider, providers::finnhub_rest::FinnhubProvider};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Live market board")]
struct Cli {
    /// Board settings (TOML). Defaults apply when omitted.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Name shown in the board header.
    #[arg(long, global = true)]
    user_name: Option<String>,
    /// Email used when no name is given.
    #[arg(long, global = true)]
    user_email: Option<String>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Show the board and keep it updated until Ctrl-C.
    Watch,
    /// Print one normalized quote as JSON.
    Quote {
        #[arg(long)]
        symbol: String,
    },
    /// Print recent candles as JSON.
    Series {
        #[arg(long)]
        symbol: String,
        #[arg(long, default_value = "1min")]
        interval: String,
        #[arg(long, default_value_t = 30)]
        outputsize: u32,
    },
    /// Check connectivity and market status.
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = BoardConfig::load(cli.config.as_deref())?;

    match cli.cmd {
        Cmd::Watch => {
            let user = UserIdentity::new(cli.user_name, cli.user_email);
            watch(&config, &user).await?;
        }
        Cmd::Quote { symbol } => {
            let provider = build_provider(&config)?;
            let quote = provider.fetch_quote(symbol.trim()).await?;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        Cmd::Series {
            symbol,
            interval,
            outputsize,
        } => {
            let provider = build_provider(&config)?;
            let series = provider
                .fetch_time_series(symbol.trim(), &interval, outputsize)
                .await?;
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
        Cmd::Status => {
            let provider = FinnhubProvider::with_config(config.finnhub_config())?;
            if !provider.check_connection().await {
                println!("connection: unavailable");
                return Ok(());
            }
            let status = provider.market_status().await?;
            println!("connection: ok");
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }

    Ok(())
}

async fn watch(config: &BoardConfig, user: &UserIdentity) -> Result<()> {
    let provider = build_provider(config)?;
    let mut controller = PollingController::new(provider, config.symbols.clone())
        .with_interval(config.poll_interval());
    if let Some(seed) = config.spread_seed {
        controller = controller.with_seed(seed);
    }

    info!(symbols = ?config.symbols, interval = ?config.poll_interval(), "starting board");
    let handle = controller.spawn();
    let mut updates = handle.updates();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                changed.context("board stopped publishing")?;
                let snapshot = updates.borrow_and_update().clone();
                let mut stdout = std::io::stdout().lock();
                // clear the screen and home the cursor before redrawing
                write!(stdout, "\x1b[2J\x1b[H{}", render_board(&snapshot, user))?;
                stdout.flush()?;
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("listen for Ctrl-C")?;
                info!("shutting down");
                break;
            }
        }
    }

    handle.stop();
    Ok(())
}
