//! CLI message-log maintenance subcommands.
//!
//! These act on the database directly and are never reachable over HTTP.

use anyhow::{bail, Result};
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use bazaar_types::message::Message;

use crate::state::AppState;

#[derive(Subcommand)]
pub enum MessagesCommand {
    /// Print stored messages, newest first.
    Dump {
        /// Maximum messages to display (all when omitted).
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Delete every stored message.
    Purge {
        /// Required: purging cannot be undone.
        #[arg(long)]
        force: bool,
    },
}

/// Handle a messages subcommand.
pub async fn handle_messages_command(
    cmd: MessagesCommand,
    state: &AppState,
    json: bool,
) -> Result<()> {
    match cmd {
        MessagesCommand::Dump { limit } => dump(state, limit, json).await,
        MessagesCommand::Purge { force } => purge(state, force, json).await,
    }
}

async fn dump(state: &AppState, limit: Option<u32>, json: bool) -> Result<()> {
    let messages = state.messaging.recent(limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!("  No messages stored.");
        println!();
        return Ok(());
    }

    println!();
    println!("{}", message_table(&messages));
    println!();
    println!("  {} message(s), most recent first", style(messages.len()).cyan());
    println!();
    Ok(())
}

fn message_table(messages: &[Message]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(Color::Cyan),
            Cell::new("Time"),
            Cell::new("Sender"),
            Cell::new("Recipient"),
            Cell::new("Type"),
            Cell::new("Content"),
        ]);

    for m in messages {
        table.add_row(vec![
            Cell::new(m.id),
            Cell::new(m.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()),
            Cell::new(&m.sender),
            Cell::new(&m.recipient),
            Cell::new(m.kind),
            Cell::new(truncate(&m.content, 60)),
        ]);
    }
    table
}

async fn purge(state: &AppState, force: bool, json: bool) -> Result<()> {
    if !force {
        bail!("refusing to delete every message without --force");
    }

    let removed = state.messaging.purge().await?;
    if json {
        println!("{}", serde_json::json!({ "removed": removed }));
    } else {
        println!();
        println!(
            "  {} Removed {} message(s)",
            style("*").green().bold(),
            style(removed).cyan()
        );
        println!();
    }
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_types::message::{MessageId, MessageKind, Recipient};
    use chrono::Utc;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }

    #[test]
    fn test_table_has_row_per_message() {
        let messages: Vec<Message> = (1..=2)
            .map(|i| Message {
                id: MessageId(i),
                sender: "bot1".to_string(),
                recipient: Recipient::Broadcast,
                content: format!("m{i}"),
                kind: MessageKind::General,
                timestamp: Utc::now(),
            })
            .collect();
        let rendered = message_table(&messages).to_string();
        assert!(rendered.contains("m1"));
        assert!(rendered.contains("broadcast"));
        assert_eq!(message_table(&messages).row_iter().count(), 2);
    }
}
