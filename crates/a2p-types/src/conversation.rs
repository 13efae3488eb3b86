//! Conversation log types.
//!
//! The log is append-only and order-significant: extraction attributes
//! statements to the user by role, never to the agent's own speech, and
//! only ever sees turns up to the point it is invoked.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Agent,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Agent => write!(f, "agent"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "agent" => Ok(TurnRole::Agent),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Agent,
            text: text.into(),
        }
    }
}

/// Append-only record of turns between the user and one agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// User-authored turns only, in order.
    pub fn user_turns(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter().filter(|t| t.role == TurnRole::User)
    }

    pub fn has_user_turn(&self) -> bool {
        self.user_turns().next().is_some()
    }

    /// Render the log as alternating `User:` / `Agent:` lines, the form
    /// extraction prompts expect.
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(|t| match t.role {
                TurnRole::User => format!("User: {}", t.text),
                TurnRole::Agent => format!("Agent: {}", t.text),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_role_roundtrip() {
        for role in [TurnRole::User, TurnRole::Agent] {
            let s = role.to_string();
            let parsed: TurnRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn transcript_labels_roles() {
        let mut log = ConversationLog::new();
        log.push(ConversationTurn::user("I love window seats."));
        log.push(ConversationTurn::agent("Noted!"));
        assert_eq!(log.transcript(), "User: I love window seats.\nAgent: Noted!");
    }

    #[test]
    fn user_turns_excludes_agent_speech() {
        let mut log = ConversationLog::new();
        log.push(ConversationTurn::user("hello"));
        log.push(ConversationTurn::agent("hi there"));
        log.push(ConversationTurn::user("bye"));
        let texts: Vec<_> = log.user_turns().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["hello", "bye"]);
        assert!(log.has_user_turn());
    }

    #[test]
    fn empty_log_has_no_user_turn() {
        let log = ConversationLog::new();
        assert!(log.is_empty());
        assert!(!log.has_user_turn());
        assert_eq!(log.transcript(), "");
    }
}
