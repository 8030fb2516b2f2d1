mod server;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use rmcp::{ServiceExt, transport::stdio};
use shabbat_config::Config;
use shabbat_core::{
    LockDecision, Location, ShabbatStatus, format_clock_time, format_duration, resolve_instant,
};

#[derive(Parser)]
#[command(name = "shabbat", about = "Shabbat time-window calculator CLI and MCP server")]
struct Cli {
    /// Evaluate at this RFC 3339 instant instead of now
    #[arg(long, global = true)]
    at: Option<String>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server on stdio transport
    Serve,

    /// Show whether the rest window is open and the countdown to its next boundary
    Status {
        /// Print the status snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show candle-lighting and Havdalah for the week
    Window,

    /// Show the lock decision (fails open)
    Lock,

    /// Format a number of minutes for display
    Duration {
        /// Whole minutes
        minutes: u64,
    },

    /// Re-evaluate the status periodically until interrupted
    Watch {
        /// Seconds between refreshes
        #[arg(long, default_value_t = 60)]
        interval: u64,

        /// Stop after this many refreshes
        #[arg(long)]
        count: Option<u64>,
    },

    /// Write the default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("SHABBAT_CONFIG_DIR").ok().map(PathBuf::from)
}

fn open_config() -> Result<Config> {
    Config::load(config_dir().as_deref()).context("failed to load config")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Serve => cmd_serve().await,
        Commands::Status { json } => cmd_status(&cli, *json),
        Commands::Window => cmd_window(&cli),
        Commands::Lock => cmd_lock(&cli),
        Commands::Duration { minutes } => {
            println!("{}", format_duration(*minutes));
            Ok(())
        }
        Commands::Watch { interval, count } => cmd_watch(&cli, *interval, *count).await,
        Commands::Init { force } => cmd_init(*force),
    }
}

fn instant(cli: &Cli) -> Result<DateTime<Utc>> {
    resolve_instant(cli.at.as_deref()).context("failed to parse --at")
}

/// "19:31 (Fri 2024-06-21)" in the location's zone.
fn local_label(instant: DateTime<Utc>, location: &Location) -> String {
    let tz = location.timezone();
    format!(
        "{} ({})",
        format_clock_time(instant, tz),
        instant.with_timezone(&tz).format("%a %Y-%m-%d")
    )
}

fn status_line(status: &ShabbatStatus, location: &Location) -> String {
    if status.is_shabbat {
        let end = status.shabbat_end.map(|t| format_clock_time(t, location.timezone()));
        format!(
            "shabbat: yes, ends {} (in {})",
            end.unwrap_or_default(),
            status.countdown()
        )
    } else {
        format!("shabbat: no, starts in {}", status.countdown())
    }
}

async fn cmd_serve() -> Result<()> {
    let config = open_config()?;
    let server = server::ShabbatServer::new(config).context("failed to start MCP server")?;
    tracing::info!("starting MCP server for '{}'", server.location().name());

    let service = match server.serve(stdio()).await {
        Ok(service) => service,
        Err(e) => {
            // stdin closed before the initialize handshake
            tracing::info!("client went away before initialization: {e}");
            return Ok(());
        }
    };
    service.waiting().await?;
    Ok(())
}

fn cmd_status(cli: &Cli, json: bool) -> Result<()> {
    let config = open_config()?;
    let location = config.location().context("invalid location in config")?;
    let now = instant(cli)?;

    let status = config
        .calculator()
        .status(now, &location)
        .context("failed to compute Shabbat status")?;

    if json {
        println!("{}", status.to_json().context("failed to serialize status")?);
        return Ok(());
    }

    println!("location:   {} ({})", location.name(), location.country_code());
    println!("local time: {}", local_label(now, &location));
    if status.is_shabbat {
        println!("shabbat:    yes");
        if let Some(end) = status.shabbat_end {
            println!("ends:       {}", local_label(end, &location));
        }
    } else {
        println!("shabbat:    no");
        if let Some(start) = status.next_shabbat_start {
            println!("starts:     {}", local_label(start, &location));
        }
    }
    println!("countdown:  {}", status.countdown());
    Ok(())
}

fn cmd_window(cli: &Cli) -> Result<()> {
    let config = open_config()?;
    let location = config.location().context("invalid location in config")?;
    let now = instant(cli)?;

    let window = config
        .calculator()
        .compute_window(now, &location)
        .context("failed to compute Shabbat window")?;

    println!("location:        {} ({})", location.name(), location.country_code());
    println!("candle-lighting: {}", local_label(window.candle_lighting, &location));
    println!("havdalah:        {}", local_label(window.havdalah, &location));
    println!(
        "duration:        {}",
        format_duration(window.duration().num_minutes().max(0) as u64)
    );
    Ok(())
}

fn cmd_lock(cli: &Cli) -> Result<()> {
    let config = open_config()?;
    let location = config.location().context("invalid location in config")?;
    let now = instant(cli)?;

    let result = config.calculator().status(now, &location);
    if let Err(e) = &result {
        tracing::warn!("treating app as unlocked: {e}");
    }
    let decision = LockDecision::evaluate(&result, location.timezone());

    println!("locked:     {}", if decision.locked { "yes" } else { "no" });
    if !decision.message.is_empty() {
        println!("message:    {}", decision.message);
    }
    if let Some(reopens) = &decision.reopens_at {
        println!("reopens at: {reopens}");
    }
    Ok(())
}

async fn cmd_watch(cli: &Cli, interval: u64, count: Option<u64>) -> Result<()> {
    if cli.at.is_some() {
        tracing::warn!("--at is ignored by watch; using the live clock");
    }
    let config = open_config()?;
    let location = config.location().context("invalid location in config")?;
    let calculator = config.calculator();

    let mut ticker = tokio::time::interval(Duration::from_secs(interval.max(1)));
    let mut ticks = 0u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = shabbat_core::now();
                match calculator.status(now, &location) {
                    Ok(status) => println!(
                        "[{}] {}",
                        format_clock_time(now, location.timezone()),
                        status_line(&status, &location)
                    ),
                    Err(e) => tracing::warn!("status refresh failed: {e}"),
                }

                ticks += 1;
                if count.is_some_and(|c| ticks >= c) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("watch interrupted");
                break;
            }
        }
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let path = Config::default()
        .save(config_dir().as_deref(), force)
        .context("failed to write config")?;
    println!("wrote {}", path.display());
    Ok(())
}
