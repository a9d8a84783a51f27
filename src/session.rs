use std::collections::BTreeSet;

use tutor_api::WireMessage;

/// Author of one transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    /// Locally synthesized failure notice; never sent to the remote service.
    Error,
}

impl Role {
    fn wire_name(self) -> Option<&'static str> {
        match self {
            Self::User => Some("user"),
            Self::Assistant => Some("assistant"),
            Self::Error => None,
        }
    }
}

/// One exchanged message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            role: Role::Error,
            content: content.into(),
        }
    }
}

/// Ordered turn history for the active session.
///
/// Mutation is limited to appends and wholesale clears, so the transport
/// snapshot is always an order-preserving subsequence of what was actually
/// exchanged. There is no delete-by-index and no reorder.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Returns the {user, assistant} turns in order, excluding error turns.
    pub fn transport_messages(&self) -> Vec<WireMessage> {
        self.turns
            .iter()
            .filter_map(|turn| {
                turn.role
                    .wire_name()
                    .map(|role| WireMessage::new(role, turn.content.clone()))
            })
            .collect()
    }
}

/// Parameters that scope a session. Mutated only by explicit selection
/// events; read by request construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub topic: String,
    pub model: String,
    /// Opaque credential attached to chat requests when present. Fetched
    /// once at process start, best-effort.
    pub token: Option<String>,
    pub tutor_tools: BTreeSet<String>,
}

impl SessionContext {
    pub fn new(topic: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            model: model.into(),
            token: None,
            tutor_tools: BTreeSet::new(),
        }
    }
}
