//! Last-seen message watermark.

use bazaar_types::message::{Message, MessageId};

/// Highest message id this bot has already processed.
///
/// Only moves forward. Starts empty each session, so a restarted bot
/// processes whatever is currently visible once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageCursor {
    last_seen: Option<MessageId>,
}

impl MessageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_seen(&self) -> Option<MessageId> {
        self.last_seen
    }

    fn is_new(&self, id: MessageId) -> bool {
        self.last_seen.is_none_or(|seen| id > seen)
    }

    /// Keep only messages newer than the watermark, then advance past them.
    ///
    /// Returned newest first.
    pub fn take_new(&mut self, messages: Vec<Message>) -> Vec<Message> {
        let mut fresh: Vec<Message> = messages.into_iter().filter(|m| self.is_new(m.id)).collect();
        fresh.sort_by(|a, b| b.id.cmp(&a.id));
        if let Some(newest) = fresh.first() {
            self.last_seen = Some(newest.id);
        }
        fresh
    }
}
