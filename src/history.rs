use std::collections::VecDeque;

/// Bounded command history with a recall cursor.
///
/// Once full, adding a line drops the oldest one. The cursor ranges over
/// `0..=len + 1`; `len` is the fresh-line position and anything at or past it
/// selects no entry.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    entries: VecDeque<String>,
    capacity: usize,
    cursor: usize,
}

impl HistoryRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    /// Add a submitted line and move the cursor to the fresh-line position.
    pub fn push(&mut self, line: &str) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_string());
        self.cursor = self.entries.len();
    }

    /// Step towards older entries. Returns the entry now selected, if any.
    pub fn older(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.selected()
    }

    /// Step towards newer entries. The cursor may go one slot past the
    /// fresh-line position, where nothing is selected.
    pub fn newer(&mut self) -> Option<&str> {
        if self.cursor >= self.entries.len() + 1 {
            return None;
        }
        self.cursor += 1;
        self.selected()
    }

    pub fn selected(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
