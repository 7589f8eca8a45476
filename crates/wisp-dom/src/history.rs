//! Session History
//!
//! Entry list with a cursor: push truncates the forward tail,
//! back/forward move the cursor without dropping entries.

/// History entry
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub url: String,
}

/// Session history for one document
#[derive(Debug)]
pub struct History {
    entries: Vec<HistoryEntry>,
    current: usize,
}

impl History {
    pub fn new(initial_url: &str) -> Self {
        Self {
            entries: vec![HistoryEntry {
                url: initial_url.to_string(),
            }],
            current: 0,
        }
    }

    /// Push a new entry, dropping any forward history
    pub fn push(&mut self, url: impl Into<String>) {
        self.entries.truncate(self.current + 1);
        self.entries.push(HistoryEntry { url: url.into() });
        self.current = self.entries.len() - 1;
    }

    /// Replace the current entry
    pub fn replace(&mut self, url: impl Into<String>) {
        self.entries[self.current].url = url.into();
    }

    /// Go back one entry
    pub fn back(&mut self) -> Option<&HistoryEntry> {
        if self.current > 0 {
            self.current -= 1;
            Some(&self.entries[self.current])
        } else {
            None
        }
    }

    /// Go forward one entry
    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        if self.current + 1 < self.entries.len() {
            self.current += 1;
            Some(&self.entries[self.current])
        } else {
            None
        }
    }

    /// Get current entry
    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.current]
    }

    /// Get history length
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extract the path component of a URL ("/" when absent).
///
/// Accepts both absolute URLs ("https://host/a/b") and bare paths
/// ("/a/b"), which is what `navigate` pushes.
pub(crate) fn path_of(url: &str) -> &str {
    if url.starts_with('/') {
        return url;
    }
    let rest = match url.find("://") {
        Some(i) => &url[i + 3..],
        None => return "/",
    };
    match rest.find('/') {
        Some(i) => &rest[i..],
        None => "/",
    }
}
