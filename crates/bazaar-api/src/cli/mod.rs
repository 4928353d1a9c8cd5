//! CLI command definitions for the `bazaar` binary.

pub mod bot;
pub mod messages;

use clap::{Parser, Subcommand};

use messages::MessagesCommand;

/// Run the Silent Bazaar server, its bots, and maintenance tasks.
#[derive(Parser)]
#[command(name = "bazaar", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "BAZAAR_LOG_JSON")]
    pub log_json: bool,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,bazaar=debug,bazaar_core=debug,bazaar_infra=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Address to bind (overrides `[server] host`).
        #[arg(long, env = "BAZAAR_HOST")]
        host: Option<String>,

        /// Port to listen on (overrides `[server] port`).
        #[arg(long, env = "BAZAAR_PORT")]
        port: Option<u16>,
    },

    /// Run one bot against a running server until Ctrl+C.
    Bot {
        /// Bot name, used as seller, buyer and sender.
        #[arg(long)]
        name: String,

        /// Server host.
        #[arg(long, default_value = "127.0.0.1")]
        server: String,

        /// Server port (defaults to `[server] port`).
        #[arg(long)]
        port: Option<u16>,

        /// Port this bot advertises when registering.
        #[arg(long)]
        bot_port: Option<String>,
    },

    /// Inspect or clear the message log directly in the database.
    Messages {
        #[command(subcommand)]
        command: MessagesCommand,
    },
}
