//! IME session state.
//!
//! The `ImeSession` holds what one input context is doing between key
//! events: the composing text, the candidate list on screen, the current mode
//! and, after a direct conversion key (F6..F10), the converted preedit that
//! replaces the hiragana rendering.

use crate::candidate::CandidateList;
use crate::composing::ComposingText;
use crate::context::ImeContext;

/// Page size of the predictive list shown while typing.
pub const PREDICT_PAGE_SIZE: usize = 4;

/// Page size of the conversion list opened with Space.
pub const CONVERSION_PAGE_SIZE: usize = 9;

/// Auxiliary label shown under the predictive list.
pub const PREDICT_HINT: &str = "[Tabキーで選択]";

/// Current input mode of the IME session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Nothing is being composed
    #[default]
    Init,
    /// Keys go into the composing text; predictions are shown
    Composing,
    /// The candidate list has focus
    Selecting,
}

/// Per-context IME state.
#[derive(Debug, Clone, Default)]
pub struct ImeSession {
    composing: ComposingText,
    candidates: CandidateList,
    mode: InputMode,
    /// Preedit set by a direct conversion key, shown instead of hiragana
    converted_preedit: Option<String>,
}

impl ImeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn composing(&self) -> &ComposingText {
        &self.composing
    }

    pub fn composing_mut(&mut self) -> &mut ComposingText {
        &mut self.composing
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    pub fn candidates_mut(&mut self) -> &mut CandidateList {
        &mut self.candidates
    }

    /// Replace the candidate list (page size is taken from `list`).
    pub fn set_candidates(&mut self, list: CandidateList) {
        self.candidates = list;
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn is_active(&self) -> bool {
        self.mode != InputMode::Init
    }

    pub fn converted_preedit(&self) -> Option<&str> {
        self.converted_preedit.as_deref()
    }

    pub fn set_converted_preedit(&mut self, text: Option<String>) {
        self.converted_preedit = text;
    }

    /// Text committed when the user accepts the preedit as is.
    pub fn preedit_commit_text(&self) -> String {
        match &self.converted_preedit {
            Some(text) => text.clone(),
            None => self.composing.reading(),
        }
    }

    /// Clear all session state and return to Init mode.
    pub fn clear(&mut self) {
        self.composing.clear();
        self.candidates.clear();
        self.mode = InputMode::Init;
        self.converted_preedit = None;
    }

    /// Sync session state to an ImeContext for platform communication.
    pub fn sync_to_context(&self, context: &mut ImeContext) {
        context.clear();
        if self.mode == InputMode::Init {
            return;
        }

        match (&self.converted_preedit, self.mode) {
            (Some(text), _) => {
                context.preedit_text = text.clone();
                context.preedit_cursor = text.len();
            }
            (None, InputMode::Selecting) => {
                let text = self
                    .candidates
                    .selected_candidate()
                    .map(|c| c.text.clone())
                    .unwrap_or_else(|| self.composing.to_hiragana());
                context.preedit_cursor = text.len();
                context.preedit_text = text;
            }
            (None, _) => {
                let (before, after) = self.composing.hiragana_around_cursor();
                context.preedit_cursor = before.len();
                context.preedit_text = before + &after;
            }
        }

        context.candidates = self
            .candidates
            .current_page_candidates()
            .iter()
            .map(|c| c.text.clone())
            .collect();

        if self.mode == InputMode::Selecting {
            context.candidate_cursor = self.candidates.cursor();
            if let Some(index) = self.candidates.selected_index() {
                context.auxiliary_text = format!("[{}/{}]", index + 1, self.candidates.len());
            }
        } else if !self.candidates.is_empty() {
            context.auxiliary_text = PREDICT_HINT.to_string();
        }
    }
}
