//! Candidate types for kana-kanji conversion.
//!
//! This module provides:
//! - `Candidate`: one conversion result, split into display segments
//! - `CandidateList`: engine-ordered results with paging and cursor navigation

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One display segment of a candidate (e.g. "今日" for the reading "きょう").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSegment {
    pub text: String,
    /// Length of the reading this segment covers, in characters
    pub reading_len: usize,
}

/// A single conversion result.
///
/// `corresponding_count` is the number of composing input units the
/// candidate consumes. A candidate with a count smaller than the buffer
/// length converts only a prefix; accepting it leaves the rest composing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    pub reading: String,
    pub corresponding_count: usize,
    pub segments: Vec<CandidateSegment>,
}

impl Candidate {
    /// A candidate made of a single segment.
    pub fn new<T: Into<String>, R: Into<String>>(
        text: T,
        reading: R,
        corresponding_count: usize,
    ) -> Self {
        let text = text.into();
        let reading = reading.into();
        let segments = vec![CandidateSegment {
            text: text.clone(),
            reading_len: reading.chars().count(),
        }];
        Candidate {
            text,
            reading,
            corresponding_count,
            segments,
        }
    }

    /// A candidate assembled from segments; the text is their concatenation.
    pub fn from_segments<R: Into<String>>(
        segments: Vec<CandidateSegment>,
        reading: R,
        corresponding_count: usize,
    ) -> Self {
        let text = segments.iter().map(|s| s.text.as_str()).collect();
        Candidate {
            text,
            reading: reading.into(),
            corresponding_count,
            segments,
        }
    }

    /// Segment texts in display order.
    pub fn segment_texts(&self) -> Vec<&str> {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A paginated list of candidates with cursor navigation.
///
/// The order of `candidates` is the engine's order and is never changed.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateList {
    /// All available candidates
    candidates: Vec<Candidate>,

    /// Number of candidates per page
    page_size: usize,

    /// Current page index (0-based)
    current_page: usize,

    /// Cursor position within the current page (0-based)
    cursor: usize,
}

impl CandidateList {
    /// Create a new empty candidate list.
    pub fn new() -> Self {
        Self::with_page_size(9)
    }

    /// Create a candidate list with specified page size.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            candidates: Vec::new(),
            page_size: page_size.max(1),
            current_page: 0,
            cursor: 0,
        }
    }

    /// Create a candidate list from a vector of candidates.
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        let mut list = Self::new();
        list.candidates = candidates;
        list
    }

    /// Set the page size.
    pub fn set_page_size(&mut self, page_size: usize) {
        let selected = self.selected_index().unwrap_or(0);
        self.page_size = page_size.max(1);
        self.move_to(selected);
    }

    /// Get the page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Set the candidates, resetting pagination state.
    pub fn set_candidates(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        self.reset();
    }

    /// Get all candidates.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Get a candidate by global index.
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    /// Get the total number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Keep at most `max` candidates.
    pub fn truncate(&mut self, max: usize) {
        self.candidates.truncate(max);
        if self.selected_index().is_none() {
            self.reset();
        }
    }

    /// Get the total number of pages.
    pub fn num_pages(&self) -> usize {
        self.candidates.len().div_ceil(self.page_size)
    }

    /// Get the current page index (0-based).
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Get the cursor position within the current page (0-based).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn current_page_len(&self) -> usize {
        let range = self.current_page_range();
        range.end.saturating_sub(range.start)
    }

    fn current_page_range(&self) -> Range<usize> {
        let start = (self.current_page * self.page_size).min(self.candidates.len());
        let end = (start + self.page_size).min(self.candidates.len());
        start..end
    }

    /// Get the candidates for the current page.
    pub fn current_page_candidates(&self) -> &[Candidate] {
        &self.candidates[self.current_page_range()]
    }

    /// Get the currently selected candidate (under cursor).
    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.current_page_candidates().get(self.cursor)
    }

    /// Get the global index of the currently selected candidate.
    pub fn selected_index(&self) -> Option<usize> {
        let global_index = self.current_page * self.page_size + self.cursor;
        (global_index < self.candidates.len()).then_some(global_index)
    }

    fn move_to(&mut self, global_index: usize) {
        if self.candidates.is_empty() {
            self.reset();
            return;
        }
        let index = global_index.min(self.candidates.len() - 1);
        self.current_page = index / self.page_size;
        self.cursor = index % self.page_size;
    }

    /// Advance to the next candidate across pages, wrapping to the first.
    pub fn next_candidate(&mut self) {
        if let Some(index) = self.selected_index() {
            self.move_to((index + 1) % self.candidates.len());
        }
    }

    /// Step back to the previous candidate across pages, wrapping to the last.
    pub fn prev_candidate(&mut self) {
        if let Some(index) = self.selected_index() {
            let len = self.candidates.len();
            self.move_to((index + len - 1) % len);
        }
    }

    /// Move to the previous page.
    /// Returns true if the page changed.
    pub fn page_up(&mut self) -> bool {
        if self.current_page > 0 {
            self.current_page -= 1;
            self.clamp_cursor();
            true
        } else {
            false
        }
    }

    /// Move to the next page.
    /// Returns true if the page changed.
    pub fn page_down(&mut self) -> bool {
        let num_pages = self.num_pages();
        if num_pages > 0 && self.current_page < num_pages - 1 {
            self.current_page += 1;
            self.clamp_cursor();
            true
        } else {
            false
        }
    }

    fn clamp_cursor(&mut self) {
        let page_len = self.current_page_len();
        if page_len > 0 && self.cursor >= page_len {
            self.cursor = page_len - 1;
        }
    }

    /// Select a candidate by index within the current page.
    /// Returns the selected candidate if the index is valid.
    pub fn select_by_index(&mut self, page_index: usize) -> Option<&Candidate> {
        if page_index < self.current_page_len() {
            self.cursor = page_index;
            self.selected_candidate()
        } else {
            None
        }
    }

    /// Clear the candidate list.
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.reset();
    }

    /// Reset pagination state (go to first page, first candidate).
    pub fn reset(&mut self) {
        self.current_page = 0;
        self.cursor = 0;
    }
}

impl Default for CandidateList {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Candidate>> for CandidateList {
    fn from(candidates: Vec<Candidate>) -> Self {
        Self::from_candidates(candidates)
    }
}

impl IntoIterator for CandidateList {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| Candidate::new(format!("候補{}", i), "こうほ", 3))
            .collect()
    }

    #[test]
    fn test_candidate_single_segment() {
        let cand = Candidate::new("今日", "きょう", 3);
        assert_eq!(cand.segment_texts(), vec!["今日"]);
        assert_eq!(cand.segments[0].reading_len, 3);
    }

    #[test]
    fn test_candidate_from_segments() {
        let cand = Candidate::from_segments(
            vec![
                CandidateSegment { text: "今日".into(), reading_len: 3 },
                CandidateSegment { text: "は".into(), reading_len: 1 },
            ],
            "きょうは",
            5,
        );
        assert_eq!(cand.text, "今日は");
        assert_eq!(cand.segment_texts(), vec!["今日", "は"]);
    }

    #[test]
    fn test_paging() {
        let mut list = CandidateList::with_page_size(4);
        list.set_candidates(numbered(10));

        assert_eq!(list.num_pages(), 3);
        assert_eq!(list.current_page_candidates().len(), 4);
        assert!(list.page_down());
        assert!(list.page_down());
        assert_eq!(list.current_page_candidates().len(), 2);
        assert!(!list.page_down());
        assert!(list.page_up());
        assert_eq!(list.current_page(), 1);
    }

    #[test]
    fn test_cursor_clamped_on_short_last_page() {
        let mut list = CandidateList::with_page_size(4);
        list.set_candidates(numbered(5));
        list.next_candidate();
        list.next_candidate();
        assert_eq!(list.cursor(), 2);

        list.page_down();
        assert_eq!(list.cursor(), 0);
        assert_eq!(list.selected_index(), Some(4));
    }

    #[test]
    fn test_next_and_prev_candidate_wrap() {
        let mut list = CandidateList::with_page_size(2);
        list.set_candidates(numbered(3));

        list.next_candidate();
        list.next_candidate();
        assert_eq!(list.selected_index(), Some(2));
        assert_eq!(list.current_page(), 1);

        list.next_candidate();
        assert_eq!(list.selected_index(), Some(0));

        list.prev_candidate();
        assert_eq!(list.selected_index(), Some(2));
    }

    #[test]
    fn test_select_by_index() {
        let mut list = CandidateList::with_page_size(3);
        list.set_candidates(numbered(5));
        assert_eq!(list.select_by_index(1).map(|c| c.text.as_str()), Some("候補1"));
        assert!(list.select_by_index(3).is_none());
    }

    #[test]
    fn test_empty_list_navigation_is_inert() {
        let mut list = CandidateList::new();
        list.next_candidate();
        list.prev_candidate();
        assert!(!list.page_down());
        assert_eq!(list.selected_index(), None);
        assert!(list.current_page_candidates().is_empty());
    }

    #[test]
    fn test_set_page_size_keeps_selection() {
        let mut list = CandidateList::with_page_size(2);
        list.set_candidates(numbered(6));
        list.next_candidate();
        list.next_candidate();
        list.next_candidate();
        assert_eq!(list.selected_index(), Some(3));

        list.set_page_size(4);
        assert_eq!(list.selected_index(), Some(3));
        assert_eq!(list.current_page(), 0);
    }

    #[test]
    fn test_truncate_preserves_order() {
        let mut list = CandidateList::from_candidates(numbered(6));
        list.truncate(2);
        let texts: Vec<_> = list.candidates().iter().map(|c| c.text.clone()).collect();
        assert_eq!(texts, vec!["候補0", "候補1"]);
    }
}
