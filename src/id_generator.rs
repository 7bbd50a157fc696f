use serde::{Deserialize, Serialize};

/// Hands out sequential node ids. Ids are never reused, even after the
/// node they named is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdCounter {
    /// `None` once `u64::MAX` has been handed out or observed.
    next: Option<u64>,
}

impl IdCounter {
    pub fn starting_at(next: u64) -> Self {
        Self { next: Some(next) }
    }

    /// The id `allocate` would return, or `None` when ids are exhausted.
    pub fn peek(&self) -> Option<u64> {
        self.next
    }

    pub fn allocate(&mut self) -> Option<u64> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }

    /// Makes sure `seen` is never handed out again.
    pub fn observe(&mut self, seen: u64) {
        if let Some(next) = self.next {
            self.next = seen.checked_add(1).map(|after| next.max(after));
        }
    }
}

impl Default for IdCounter {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
