//! Caller-owned analysis session state.
//!
//! A [`Session`] is an explicit value the caller creates per conversation and
//! passes by reference into request-scoped handlers: a linear transcript plus
//! the uploaded tables it refers to, with a creation-time TTL. There is no
//! ambient process-wide state; dropping the session is teardown.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::types::ParsedTable;

/// Who authored a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// One conversation's state: transcript plus named uploaded tables.
#[derive(Debug, Clone)]
pub struct Session {
    created_at: Instant,
    ttl: Duration,
    transcript: Vec<Turn>,
    tables: BTreeMap<String, ParsedTable>,
}

impl Session {
    /// Create a new session that expires `ttl` after creation.
    pub fn new(ttl: Duration) -> Self {
        Self {
            created_at: Instant::now(),
            ttl,
            transcript: Vec::new(),
            tables: BTreeMap::new(),
        }
    }

    /// Whether the session has outlived its TTL. Expiry is measured from
    /// creation; appending turns does not extend it.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }

    /// Time remaining before expiry (zero once expired).
    pub fn expires_in(&self) -> Duration {
        self.ttl.saturating_sub(self.created_at.elapsed())
    }

    /// Append a user turn to the transcript.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.transcript.push(Turn {
            role: Role::User,
            text: text.into(),
        });
    }

    /// Append an assistant turn to the transcript.
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.transcript.push(Turn {
            role: Role::Assistant,
            text: text.into(),
        });
    }

    /// The transcript in insertion order.
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Attach an uploaded table under `name`, replacing any previous table
    /// with that name.
    pub fn insert_table(&mut self, name: impl Into<String>, table: ParsedTable) {
        self.tables.insert(name.into(), table);
    }

    /// Look up an uploaded table by name.
    pub fn table(&self, name: &str) -> Option<&ParsedTable> {
        self.tables.get(name)
    }

    /// Names of the uploaded tables, in sorted order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}
