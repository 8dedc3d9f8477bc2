//! URL frontier for a single crawl
//!
//! The frontier holds:
//! - The set of visited targets
//! - The ordered queue of pending targets (first discovered, first visited)
//!
//! Every URL is normalized against the crawl's base URL before it is stored
//! or compared, so relative and absolute spellings of the same page collide.

use crate::url::normalize_url;
use std::collections::{HashSet, VecDeque};

/// Visited and pending targets of one crawl
#[derive(Debug, Clone)]
pub struct UrlFrontier {
    /// Normalized base URL, used to resolve relative links
    base_url: String,

    visited: HashSet<String>,

    /// Pending targets in insertion order
    pending: VecDeque<String>,

    /// Mirror of `pending` for constant-time membership checks
    queued: HashSet<String>,
}

impl UrlFrontier {
    /// Creates a frontier with `base_url` already marked visited
    pub fn new(base_url: &str) -> Self {
        let base_url = normalize_url(base_url, base_url);
        let mut visited = HashSet::new();
        visited.insert(base_url.clone());

        Self {
            base_url,
            visited,
            pending: VecDeque::new(),
            queued: HashSet::new(),
        }
    }

    /// Resolves `url` against the frontier's base URL
    pub fn normalize(&self, url: &str) -> String {
        normalize_url(url, &self.base_url)
    }

    /// Marks a URL as visited. Marking twice has no further effect.
    pub fn mark_visited(&mut self, url: &str) {
        let normalized = self.normalize(url);
        self.visited.insert(normalized);
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(&self.normalize(url))
    }

    /// Appends `url` to the pending queue unless it is visited or already queued
    ///
    /// # Returns
    ///
    /// * `true` - The URL was added to the queue
    /// * `false` - The URL was already known; nothing changed
    pub fn enqueue_if_new(&mut self, url: &str) -> bool {
        let normalized = self.normalize(url);

        if self.visited.contains(&normalized) || self.queued.contains(&normalized) {
            tracing::trace!("Skipping known URL: {}", normalized);
            return false;
        }

        self.queued.insert(normalized.clone());
        self.pending.push_back(normalized);
        true
    }

    /// Removes and returns the oldest pending URL
    pub fn pop_next(&mut self) -> Option<String> {
        let next = self.pending.pop_front()?;
        self.queued.remove(&next);
        Some(next)
    }

    /// Returns the pending URLs in visit order
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Returns true if no URLs are pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
