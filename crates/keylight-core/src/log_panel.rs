use std::collections::VecDeque;

pub const DEBUG_LOG_CAPACITY: usize = 50;

/// Append-only line log for the on-page debug panel, newest first.
#[derive(Clone, Debug, Default)]
pub struct DebugLog {
    lines: VecDeque<String>,
    revision: u64,
}

impl DebugLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_front(line.into());
        self.lines.truncate(DEBUG_LOG_CAPACITY);
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Bumped on every push so the page can skip redundant DOM updates.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
