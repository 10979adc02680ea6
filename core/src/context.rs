//! IME context for platform communication.
//!
//! The `ImeContext` struct is a plain data container. After calling
//! `process_key()` on an [`ImeEngine`](crate::ImeEngine), the platform reads
//! these fields to update the preedit, the candidate window and the
//! auxiliary label, and consumes `commit_text`.

/// IME state as seen by the platform.
///
/// # Fields
///
/// - `preedit_text`: text being composed (displayed with underline)
/// - `preedit_cursor`: cursor position within the preedit (byte offset)
/// - `commit_text`: text to commit to the application (consume and clear)
/// - `candidates`: candidate texts on the current page
/// - `candidate_cursor`: highlighted candidate on the page (0-based)
/// - `auxiliary_text`: hint label, e.g. `[2/9]` while selecting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImeContext {
    pub preedit_text: String,

    /// Byte offset into `preedit_text`
    pub preedit_cursor: usize,

    pub commit_text: String,

    pub candidates: Vec<String>,

    pub candidate_cursor: usize,

    pub auxiliary_text: String,
}

impl ImeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear preedit, candidates and auxiliary text.
    /// Does NOT clear commit_text (platform should consume it first).
    pub fn clear(&mut self) {
        self.preedit_text.clear();
        self.preedit_cursor = 0;
        self.candidates.clear();
        self.candidate_cursor = 0;
        self.auxiliary_text.clear();
    }

    /// Take the commit text, leaving it empty.
    pub fn take_commit(&mut self) -> String {
        std::mem::take(&mut self.commit_text)
    }

    /// Check if there's any visible state (preedit or candidates).
    pub fn has_visible_state(&self) -> bool {
        !self.preedit_text.is_empty() || !self.candidates.is_empty()
    }

    pub fn has_commit(&self) -> bool {
        !self.commit_text.is_empty()
    }
}
