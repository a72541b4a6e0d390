mod config;

use clap::{Parser, Subcommand};
use config::{Config, LogFormat};
use hl_core::types::EventKind;
use owo_colors::{OwoColorize, Stream};
use std::net::IpAddr;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hl", about = "Webhook event log")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the webhook receiver and dashboard.
    Serve {
        #[arg(long)]
        host: Option<IpAddr>,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        db_path: Option<String>,
    },
    /// Print the latest stored events.
    Recent {
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long)]
        db_path: Option<String>,
    },
    /// Print the OpenAPI document.
    Openapi,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_logging(config.log_format);

    match cli.command {
        Command::Serve {
            host,
            port,
            db_path,
        } => {
            let config = config.with_overrides(db_path, host, port);
            if let Err(err) = config.ensure_db_dir() {
                tracing::warn!(%err, db_path = %config.db_path, "could not create database directory");
            }
            let state = hl_serve::AppState::new(config.db_path.clone());
            if let Err(err) = hl_serve::serve(state, config.addr()).await {
                tracing::error!(%err, "serve error");
                return ExitCode::FAILURE;
            }
        }
        Command::Recent { limit, db_path } => {
            let config = config.with_overrides(db_path, None, None);
            if let Err(err) = print_recent(&config, limit) {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        }
        Command::Openapi => match hl_serve::openapi::generate_spec() {
            Ok(doc) => println!("{doc}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
    }
    ExitCode::SUCCESS
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hl=info,hl_core=info,hl_serve=info,tower_http=info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init(),
    }
}

fn print_recent(config: &Config, limit: u32) -> Result<(), hl_core::HooklogError> {
    let hooklog = hl_serve::build_hooklog(&hl_serve::AppState::new(config.db_path.clone()))?;
    let records = hooklog.events().latest(Some(limit))?;
    if records.is_empty() {
        println!("no events");
    }
    for record in &records {
        let view = hl_core::display::view(record);
        let badge = format!("{:<12}", view.action.as_str());
        let badge = match view.action {
            EventKind::Push => badge.if_supports_color(Stream::Stdout, |t| t.cyan()).to_string(),
            EventKind::PullRequest => badge
                .if_supports_color(Stream::Stdout, |t| t.green())
                .to_string(),
            EventKind::Merge => badge
                .if_supports_color(Stream::Stdout, |t| t.magenta())
                .to_string(),
        };
        println!("{badge} {}", view.display_message);
    }
    Ok(())
}
