//! # Conversation State
//!
//! An append-only, ordered sequence of turns, scoped to one interactive
//! session. Turns are retained in submission order with no deduplication, held
//! in memory only, and never persisted across sessions.

/// The author of a [`Turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One message in a conversation. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    /// Synthesized speech for an assistant turn, when available.
    pub audio: Option<Vec<u8>>,
}

/// The ordered turn history of one session.
#[derive(Debug, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn {
            role: Role::User,
            content: content.into(),
            audio: None,
        });
    }

    /// Appends an assistant turn, carrying synthesized audio when present.
    pub fn push_assistant(&mut self, content: impl Into<String>, audio: Option<Vec<u8>>) {
        self.turns.push(Turn {
            role: Role::Assistant,
            content: content.into(),
            audio,
        });
    }

    /// All turns, in submission order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent `window` turns, oldest first. A window of zero yields
    /// an empty slice, which disables history embedding entirely.
    pub fn recent(&self, window: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(window);
        &self.turns[start..]
    }

    /// The most recent turn authored by `role`, if any.
    pub fn last_of(&self, role: Role) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_are_kept_in_submission_order() {
        let mut conversation = Conversation::new();
        conversation.push_user("first question");
        conversation.push_assistant("first answer", None);
        conversation.push_user("second question");
        conversation.push_assistant("second answer", Some(vec![1, 2, 3]));

        let turns = conversation.turns();
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "first question");
        assert_eq!(turns[3].role, Role::Assistant);
        assert_eq!(turns[3].audio.as_deref(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn recent_returns_the_newest_turns_oldest_first() {
        let mut conversation = Conversation::new();
        for i in 0..5 {
            conversation.push_user(format!("question {i}"));
        }

        let window = conversation.recent(2);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].content, "question 3");
        assert_eq!(window[1].content, "question 4");
    }

    #[test]
    fn recent_with_zero_window_is_empty() {
        let mut conversation = Conversation::new();
        conversation.push_user("question");
        assert!(conversation.recent(0).is_empty());
    }

    #[test]
    fn recent_with_oversized_window_returns_everything() {
        let mut conversation = Conversation::new();
        conversation.push_user("only question");
        assert_eq!(conversation.recent(100).len(), 1);
    }

    #[test]
    fn last_of_finds_the_newest_turn_per_role() {
        let mut conversation = Conversation::new();
        conversation.push_user("old question");
        conversation.push_assistant("old answer", None);
        conversation.push_user("new question");

        assert_eq!(
            conversation.last_of(Role::User).map(|t| t.content.as_str()),
            Some("new question")
        );
        assert_eq!(
            conversation
                .last_of(Role::Assistant)
                .map(|t| t.content.as_str()),
            Some("old answer")
        );
    }
}
