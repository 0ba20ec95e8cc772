//! askql server entry point

use std::sync::Arc;

use askql::{connect_databases, Config, IntentDispatcher, QueryExecutor};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

/// askql: plain-English questions over the University and Sales databases
#[derive(Parser, Debug)]
#[command(name = "askql")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output plans as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default behavior)
    Serve {
        /// Bind address. If not specified, uses config file value.
        #[arg(long)]
        host: Option<String>,
        /// HTTP port. If not specified, uses config file value.
        #[arg(short, long)]
        port: Option<u16>,
        /// Enable JSON logging format
        #[arg(long)]
        json_logs: bool,
    },
    /// Answer a question against the configured databases
    Ask {
        /// The question, e.g. "top 5 sales"
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Show the intent and SQL a question maps to, without running it
    Plan {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let is_serve = matches!(args.command, Some(Command::Serve { .. }) | None);

    if !is_serve {
        // Minimal logging for CLI commands
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = load_config(&args.config)?;

    match args.command {
        Some(Command::Serve {
            host,
            port,
            json_logs,
        }) => run_server(config, host, port, json_logs).await,
        Some(Command::Ask { question }) => {
            let status = cli::run_ask(config, question.join(" ")).await?;
            if status != 0 {
                std::process::exit(status.into());
            }
            Ok(())
        }
        Some(Command::Plan { question }) => cli::run_plan(config, question.join(" "), args.json),
        None => run_server(config, None, None, false).await,
    }
}

fn load_config(path: &Option<String>) -> anyhow::Result<Config> {
    let mut config = if let Some(path) = path {
        Config::from_file(path)?
    } else {
        Config::load()?
    };
    // Validates too; URLs may come from the environment only.
    config.apply_env_overrides()?;
    Ok(config)
}

async fn run_server(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
    json_logs: bool,
) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting askql v{}", env!("CARGO_PKG_VERSION"));

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!(
        bind = %config.server.bind_addr(),
        default_limit = config.query.default_limit,
        cors = config.server.enable_cors,
        "Configuration loaded"
    );

    let databases = connect_databases(&config).await?;
    let executor = QueryExecutor::from_databases(databases)
        .with_dispatcher(IntentDispatcher::with_default_limit(config.query.default_limit));

    askql::serve(Arc::new(executor), &config.server).await?;
    Ok(())
}
