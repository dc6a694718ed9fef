#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

/// Rendering category of a chat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    /// A participant-authored line, shown with its author label.
    #[default]
    Normal,
    /// A bare status line from the session itself, shown without an author.
    System,
}

/// A single line in the session chat log.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    /// Author label as recorded, e.g. `"Me"`, `"Dice"`, or a remote name.
    pub author: String,
    /// Message body.
    pub body: String,
    pub kind: MessageKind,
    /// Whether the entry arrived from another participant.
    pub remote: bool,
}

impl ChatEntry {
    /// Author label to display. The local participant's own lines are
    /// recorded as `"Me"` and rendered as `"Tu"`.
    #[must_use]
    pub fn display_author(&self) -> &str {
        if !self.remote && self.author == "Me" { "Tu" } else { &self.author }
    }

    /// Whether this is a bare system line.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.kind == MessageKind::System
    }
}

/// Ordered log of everything shown in the chat panel: participant messages,
/// dice results, and session status lines.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    entries: Vec<ChatEntry>,
}

impl ChatLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a locally produced line.
    pub fn local(&mut self, author: impl Into<String>, body: impl Into<String>) {
        self.entries.push(ChatEntry {
            author: author.into(),
            body: body.into(),
            kind: MessageKind::Normal,
            remote: false,
        });
    }

    /// Append a line received from another participant.
    pub fn remote(&mut self, author: impl Into<String>, body: impl Into<String>) {
        self.entries.push(ChatEntry {
            author: author.into(),
            body: body.into(),
            kind: MessageKind::Normal,
            remote: true,
        });
    }

    /// Append a bare session status line.
    pub fn system(&mut self, body: impl Into<String>) {
        self.entries.push(ChatEntry {
            author: "System".to_owned(),
            body: body.into(),
            kind: MessageKind::System,
            remote: false,
        });
    }

    /// All entries, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, ChatEntry> {
        self.entries.iter()
    }

    /// The most recent entry, if any.
    #[must_use]
    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
