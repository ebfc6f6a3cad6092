//! Session-scoped conversation memory.
//!
//! [`ConversationMemory`] is owned by one orchestrator and only appended to
//! after a turn fully completes. Each workflow receives a
//! [`ConversationSnapshot`]: an `Arc`-shared, read-only view that later
//! appends never touch (copy-on-write via [`Arc::make_mut`]).

use super::turn::ConversationTurn;
use std::sync::Arc;

/// Default number of recent turns rendered into planning context.
pub const DEFAULT_RECENT_TURNS: usize = 3;

/// Append-only list of completed turns.
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    turns: Arc<Vec<ConversationTurn>>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: ConversationTurn) {
        Arc::make_mut(&mut self.turns).push(turn);
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            turns: Arc::clone(&self.turns),
        }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns = Arc::new(Vec::new());
    }

    pub fn next_turn_number(&self) -> usize {
        self.turns.len() + 1
    }
}

/// Immutable view of the turns completed before a workflow started.
#[derive(Debug, Clone, Default)]
pub struct ConversationSnapshot {
    turns: Arc<Vec<ConversationTurn>>,
}

impl ConversationSnapshot {
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn next_turn_number(&self) -> usize {
        self.turns.len() + 1
    }

    /// Render the last `recent` turns as planning context for `query`.
    ///
    /// Returns an empty string when there is no history.
    pub fn context_for(&self, query: &str, recent: usize) -> String {
        if self.turns.is_empty() {
            return String::new();
        }

        let start = self.turns.len().saturating_sub(recent);
        let mut out = String::from("Previous conversation context:\n");
        for turn in &self.turns[start..] {
            out.push_str(&format!("Query: {}\n", turn.user_query));
            out.push_str(&format!("Key Findings: {}\n", turn.context_summary));
        }
        out.push_str(&format!("\nCurrent query: {}", query));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::outcome::TurnOutcome;

    fn turn(query: &str, summary: &str) -> ConversationTurn {
        ConversationTurn::new(query, vec![], "response", summary, TurnOutcome::Synthesized)
    }

    #[test]
    fn test_append_and_len() {
        let mut memory = ConversationMemory::new();
        assert!(memory.is_empty());
        assert_eq!(memory.next_turn_number(), 1);
        memory.append(turn("q1", "s1"));
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.next_turn_number(), 2);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_appends() {
        let mut memory = ConversationMemory::new();
        memory.append(turn("q1", "s1"));
        let snapshot = memory.snapshot();
        memory.append(turn("q2", "s2"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(memory.len(), 2);
        assert_eq!(snapshot.turns()[0].user_query, "q1");
    }

    #[test]
    fn test_context_empty_without_history() {
        let memory = ConversationMemory::new();
        assert_eq!(memory.snapshot().context_for("q", 3), "");
    }

    #[test]
    fn test_context_uses_recent_turns_only() {
        let mut memory = ConversationMemory::new();
        for i in 1..=4 {
            memory.append(turn(&format!("q{}", i), &format!("s{}", i)));
        }
        let context = memory.snapshot().context_for("What about April?", 3);

        assert!(context.starts_with("Previous conversation context:\n"));
        assert!(!context.contains("Query: q1\n"));
        assert!(context.contains("Query: q2\nKey Findings: s2\n"));
        assert!(context.contains("Query: q4\nKey Findings: s4\n"));
        assert!(context.ends_with("Current query: What about April?"));
    }

    #[test]
    fn test_clear() {
        let mut memory = ConversationMemory::new();
        memory.append(turn("q1", "s1"));
        let snapshot = memory.snapshot();
        memory.clear();
        assert!(memory.is_empty());
        assert_eq!(snapshot.len(), 1);
    }
}
