//! Transcript of one conversation thread.
//!
//! Each submitted message gets an assistant placeholder with a
//! client-generated id. Callbacks from a stream are routed to that
//! placeholder only. [`ChatThread::placeholders`] hands out several
//! placeholders at once so their replies can stream concurrently.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::message::AssembledMessage;
use super::request::ChatRequest;
use crate::error::IrisResult;

/// One entry of the transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum ThreadEntry {
    User {
        id: Uuid,
        text: String,
        created_at: DateTime<Utc>,
    },
    Assistant {
        id: Uuid,
        message: AssembledMessage,
        created_at: DateTime<Utc>,
    },
}

impl ThreadEntry {
    pub fn id(&self) -> Uuid {
        match self {
            ThreadEntry::User { id, .. } | ThreadEntry::Assistant { id, .. } => *id,
        }
    }
}

/// A conversation thread as seen by one user.
#[derive(Debug, Clone)]
pub struct ChatThread {
    pub thread_id: String,
    pub user_identifier: String,
    entries: Vec<ThreadEntry>,
}

impl ChatThread {
    /// Resume an existing thread.
    pub fn new(user_identifier: impl Into<String>, thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            user_identifier: user_identifier.into(),
            entries: Vec::new(),
        }
    }

    /// Start a thread with a freshly generated id.
    pub fn start(user_identifier: impl Into<String>) -> Self {
        Self::new(user_identifier, Uuid::new_v4().to_string())
    }

    /// Record a user message and open an assistant placeholder for the reply.
    ///
    /// Returns the request to stream and the placeholder id. Nothing is
    /// recorded when the request is invalid.
    pub fn submit(&mut self, text: &str) -> IrisResult<(ChatRequest, Uuid)> {
        let request = ChatRequest::new(
            self.user_identifier.clone(),
            text,
            self.thread_id.clone(),
        )?;

        let now = Utc::now();
        self.entries.push(ThreadEntry::User {
            id: Uuid::new_v4(),
            text: text.to_string(),
            created_at: now,
        });

        let placeholder_id = Uuid::new_v4();
        self.entries.push(ThreadEntry::Assistant {
            id: placeholder_id,
            message: AssembledMessage::new(),
            created_at: now,
        });

        Ok((request, placeholder_id))
    }

    /// The placeholder for `id`, usable as the stream handler for its reply.
    pub fn placeholder(&mut self, id: Uuid) -> Option<&mut AssembledMessage> {
        self.entries.iter_mut().find_map(|entry| match entry {
            ThreadEntry::Assistant {
                id: entry_id,
                message,
                ..
            } if *entry_id == id => Some(message),
            _ => None,
        })
    }

    /// Placeholders for several replies at once, in the order of `ids`.
    ///
    /// Each slot is `None` when its id is not an assistant placeholder or
    /// repeats an earlier id.
    pub fn placeholders(&mut self, ids: &[Uuid]) -> Vec<Option<&mut AssembledMessage>> {
        let mut slots: Vec<Option<&mut AssembledMessage>> = ids.iter().map(|_| None).collect();
        for entry in self.entries.iter_mut() {
            if let ThreadEntry::Assistant { id, message, .. } = entry {
                if let Some(pos) = ids.iter().position(|wanted| *wanted == *id) {
                    slots[pos] = Some(message);
                }
            }
        }
        slots
    }

    pub fn message(&self, id: Uuid) -> Option<&AssembledMessage> {
        self.entries.iter().find_map(|entry| match entry {
            ThreadEntry::Assistant {
                id: entry_id,
                message,
                ..
            } if *entry_id == id => Some(message),
            _ => None,
        })
    }

    /// True while any assistant reply is still streaming.
    pub fn is_streaming(&self) -> bool {
        self.entries.iter().any(|entry| {
            matches!(entry, ThreadEntry::Assistant { message, .. } if message.is_streaming())
        })
    }

    pub fn entries(&self) -> &[ThreadEntry] {
        &self.entries
    }
}
