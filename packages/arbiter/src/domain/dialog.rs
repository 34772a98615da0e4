//! Append-only match transcript.

use time::OffsetDateTime;
use uuid::Uuid;

use super::state::Side;

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    White,
    Black,
    System,
}

impl Speaker {
    pub fn label(self) -> &'static str {
        match self {
            Speaker::White => "White",
            Speaker::Black => "Black",
            Speaker::System => "System",
        }
    }
}

impl From<Side> for Speaker {
    fn from(side: Side) -> Speaker {
        match side {
            Side::White => Speaker::White,
            Side::Black => Speaker::Black,
        }
    }
}

/// One transcript entry: agent commentary or a system notice.
#[derive(Debug, Clone)]
pub struct DialogEntry {
    pub id: Uuid,
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: OffsetDateTime,
}

impl DialogEntry {
    fn new(speaker: Speaker, content: String) -> DialogEntry {
        DialogEntry {
            id: Uuid::new_v4(),
            speaker,
            content,
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}

/// The transcript of a game. Entries are only ever appended; the log is
/// replaced wholesale when a new game starts.
#[derive(Debug, Default)]
pub struct DialogLog {
    entries: Vec<DialogEntry>,
}

impl DialogLog {
    pub fn new() -> DialogLog {
        DialogLog::default()
    }

    /// Append an entry and return a copy of it for broadcasting.
    pub fn append(&mut self, speaker: Speaker, content: impl Into<String>) -> DialogEntry {
        let entry = DialogEntry::new(speaker, content.into());
        self.entries.push(entry.clone());
        entry
    }

    pub fn entries(&self) -> &[DialogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
