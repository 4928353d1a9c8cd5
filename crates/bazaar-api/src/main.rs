//! Silent Bazaar server, bot runner and maintenance CLI.
//!
//! Binary name: `bazaar`
//!
//! Parses CLI arguments, sets up tracing and configuration, then either
//! serves the HTTP API, runs a bot against a server, or touches the message
//! log directly.

mod cli;
mod http;
mod state;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use bazaar_infra::config::{load_config, resolve_data_dir};
use bazaar_observe::tracing_setup::{init_tracing, shutdown_tracing, TracingOptions};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(TracingOptions {
        default_filter: cli.log_filter().to_string(),
        json: cli.log_json,
        otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let data_dir = resolve_data_dir();
    let config = load_config(&data_dir).await;

    let result = match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState::init(data_dir, config).await?;
            serve(state, &host, port, cli.quiet).await
        }

        Commands::Bot {
            name,
            server,
            port,
            bot_port,
        } => {
            let shutdown = CancellationToken::new();
            let trigger = shutdown.clone();
            tokio::spawn(async move {
                shutdown_signal().await;
                trigger.cancel();
            });

            let run = cli::bot::BotRun {
                name,
                host: server,
                port: port.unwrap_or(config.server.port),
                bot_port,
                config: config.bot,
            };
            cli::bot::run_bot(run, shutdown, cli.quiet).await
        }

        Commands::Messages { command } => {
            let state = AppState::init(data_dir, config).await?;
            cli::messages::handle_messages_command(command, &state, cli.json).await
        }
    };

    shutdown_tracing();
    result
}

async fn serve(state: AppState, host: &str, port: u16, quiet: bool) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, db = %state.data_dir.join("bazaar.db").display(), "bazaar listening");
    if !quiet {
        println!(
            "  {} Silent Bazaar listening on {}",
            console::style("*").green().bold(),
            console::style(format!("http://{addr}")).cyan()
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }

    let router = http::router::build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
