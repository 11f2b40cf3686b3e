use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single message in the conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
    pub at: DateTime<Utc>,
}

/// In-memory, append-only conversation log of user/assistant exchanges.
///
/// Entries always come in pairs, user first. When `capacity` is non-zero the
/// oldest whole exchange is dropped once the log is full; an odd capacity is
/// rounded up so eviction never leaves half an exchange at the head. A
/// capacity of zero keeps everything for the process lifetime.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: VecDeque<TranscriptEntry>,
    capacity: usize,
}

impl Transcript {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity + capacity % 2,
        }
    }

    pub fn unbounded() -> Self {
        Self::with_capacity(0)
    }

    /// Append one exchange, evicting the oldest exchanges if needed.
    pub fn push_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        if self.capacity > 0 {
            while self.entries.len() + 2 > self.capacity {
                self.entries.pop_front();
                self.entries.pop_front();
            }
        }
        let at = Utc::now();
        self.entries.push_back(TranscriptEntry {
            role: Role::User,
            content: user.into(),
            at,
        });
        self.entries.push_back(TranscriptEntry {
            role: Role::Assistant,
            content: assistant.into(),
            at,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(t: &Transcript) -> Vec<Role> {
        t.iter().map(|e| e.role).collect()
    }

    #[test]
    fn keeps_insertion_order() {
        let mut t = Transcript::unbounded();
        t.push_exchange("hi", "hello");
        assert_eq!(roles(&t), vec![Role::User, Role::Assistant]);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn bounded_evicts_oldest_exchange() {
        let mut t = Transcript::with_capacity(4);
        for i in 0..5 {
            t.push_exchange(format!("q{i}"), format!("a{i}"));
        }
        let contents: Vec<&str> = t.iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["q3", "a3", "q4", "a4"]);
    }

    #[test]
    fn odd_capacity_never_orphans_an_assistant_entry() {
        let mut t = Transcript::with_capacity(3);
        assert_eq!(t.capacity(), 4);
        for i in 0..3 {
            t.push_exchange(format!("q{i}"), format!("a{i}"));
            assert_eq!(t.iter().next().map(|e| e.role), Some(Role::User));
            assert_eq!(t.len() % 2, 0);
        }
        assert_eq!(roles(&t), vec![Role::User, Role::Assistant, Role::User, Role::Assistant]);
    }

    #[test]
    fn capacity_of_one_holds_a_single_exchange() {
        let mut t = Transcript::with_capacity(1);
        t.push_exchange("first", "one");
        t.push_exchange("second", "two");
        let contents: Vec<&str> = t.iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["second", "two"]);
    }

    #[test]
    fn zero_capacity_is_unbounded() {
        let mut t = Transcript::with_capacity(0);
        for _ in 0..1000 {
            t.push_exchange("x", "y");
        }
        assert_eq!(t.len(), 2000);
    }

    #[test]
    fn role_serializes_lowercase() {
        let mut t = Transcript::unbounded();
        t.push_exchange("hey", "ok");
        let entry = t.iter().nth(1).unwrap();
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "ok");
    }
}
