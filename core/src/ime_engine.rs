//! IME engine with session management and key event processing.
//!
//! The `ImeEngine` wraps a [`ConversionEngine`] with session state and a
//! style configuration, providing a `process_key()` method that drives the
//! composing text, the predictive list shown while typing and the conversion
//! list opened with Space.

use crate::candidate::{Candidate, CandidateList};
use crate::composing::InputStyle;
use crate::config::{StyleConfig, Width};
use crate::context::ImeContext;
use crate::converter::ConversionEngine;
use crate::orchestrator::{self, CandidateRequest};
use crate::session::{ImeSession, InputMode, CONVERSION_PAGE_SIZE, PREDICT_PAGE_SIZE};

/// Key event types that the IME can process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    /// Character input (romaji keys, kana keys, punctuation)
    Char(char),
    Backspace,
    Delete,
    /// Left arrow (cursor left, or previous page while selecting)
    Left,
    /// Right arrow (cursor right, or next page while selecting)
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Tab,
    /// Space key (open conversion, or next candidate)
    Space,
    Enter,
    Escape,
    /// Number key for candidate selection (1-9)
    Number(u8),
    /// Function key F1..F12; F6..F10 convert the preedit directly
    Function(u8),
}

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was handled by the IME
    Handled,
    /// Key was not handled (pass through to application)
    NotHandled,
}

/// Target of a direct conversion key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectConversion {
    Hiragana,
    KatakanaFullwidth,
    KatakanaHalfwidth,
    AlphabetFullwidth,
    AlphabetHalfwidth,
}

impl DirectConversion {
    /// F6..F10, in that order.
    pub fn from_function_key(n: u8) -> Option<Self> {
        match n {
            6 => Some(DirectConversion::Hiragana),
            7 => Some(DirectConversion::KatakanaFullwidth),
            8 => Some(DirectConversion::KatakanaHalfwidth),
            9 => Some(DirectConversion::AlphabetFullwidth),
            10 => Some(DirectConversion::AlphabetHalfwidth),
            _ => None,
        }
    }
}

/// Whether `ch` may start or extend a composition.
fn is_inputable(ch: char) -> bool {
    !ch.is_control() && !ch.is_whitespace()
}

fn digit_char(n: u8) -> Option<char> {
    char::from_digit(u32::from(n), 10)
}

/// IME engine with session management.
pub struct ImeEngine<E: ConversionEngine> {
    engine: E,
    config: StyleConfig,
    session: ImeSession,
    context: ImeContext,
}

impl<E: ConversionEngine> ImeEngine<E> {
    /// Create an IME engine with the default style.
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, StyleConfig::default())
    }

    pub fn with_config(engine: E, config: StyleConfig) -> Self {
        Self {
            engine,
            config,
            session: ImeSession::new(),
            context: ImeContext::new(),
        }
    }

    pub fn context(&self) -> &ImeContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ImeContext {
        &mut self.context
    }

    pub fn session(&self) -> &ImeSession {
        &self.session
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Report the text around the caret; feeds the neural-assist left
    /// context.
    pub fn set_surrounding_text(&mut self, text: Option<&str>, anchor: usize) {
        self.config.set_left_context(text, anchor);
    }

    /// Reset the IME to initial state.
    pub fn reset(&mut self) {
        self.session.clear();
        self.context.clear();
    }

    /// Process a key event and update IME state.
    ///
    /// After calling this, the platform should read `context()` to update the
    /// UI. Returns `KeyResult::NotHandled` when the key should pass through
    /// to the application.
    pub fn process_key(&mut self, key: KeyEvent) -> KeyResult {
        self.context.commit_text.clear();

        let result = match self.session.mode() {
            InputMode::Init => self.process_idle(key),
            InputMode::Composing => self.process_composing(key),
            InputMode::Selecting => self.process_selecting(key),
        };

        if result == KeyResult::Handled {
            self.session.sync_to_context(&mut self.context);
        }
        result
    }

    fn process_idle(&mut self, key: KeyEvent) -> KeyResult {
        match key {
            KeyEvent::Space => {
                self.context.commit_text = self.config.space().to_string();
                KeyResult::Handled
            }
            KeyEvent::Char(ch) if is_inputable(ch) => {
                self.start_composition(ch);
                KeyResult::Handled
            }
            KeyEvent::Number(n) => match digit_char(n) {
                Some(ch) => {
                    self.start_composition(ch);
                    KeyResult::Handled
                }
                None => KeyResult::NotHandled,
            },
            _ => KeyResult::NotHandled,
        }
    }

    fn process_composing(&mut self, key: KeyEvent) -> KeyResult {
        match key {
            KeyEvent::Char(ch) if is_inputable(ch) => {
                self.input_char(ch);
            }
            KeyEvent::Number(n) => {
                if let Some(ch) = digit_char(n) {
                    self.input_char(ch);
                }
            }
            KeyEvent::Backspace => {
                self.session.set_converted_preedit(None);
                self.session.composing_mut().delete_backward(1);
                self.after_edit();
            }
            KeyEvent::Delete => {
                self.session.set_converted_preedit(None);
                self.session.composing_mut().delete_forward(1);
                self.after_edit();
            }
            KeyEvent::Left | KeyEvent::Right => {
                let offset = if key == KeyEvent::Left { -1 } else { 1 };
                self.session.set_converted_preedit(None);
                self.session.composing_mut().move_cursor(offset);
            }
            KeyEvent::Enter => {
                self.commit_preedit();
            }
            KeyEvent::Escape => {
                self.reset();
            }
            KeyEvent::Space => {
                self.show_conversion_list();
            }
            KeyEvent::Tab | KeyEvent::Up | KeyEvent::Down => {
                if !self.session.candidates().is_empty() {
                    self.session.set_converted_preedit(None);
                    self.session.set_mode(InputMode::Selecting);
                }
            }
            KeyEvent::Function(n) => {
                if let Some(target) = DirectConversion::from_function_key(n) {
                    self.convert_directly(target);
                }
            }
            KeyEvent::PageUp | KeyEvent::PageDown | KeyEvent::Char(_) => {}
        }
        KeyResult::Handled
    }

    fn process_selecting(&mut self, key: KeyEvent) -> KeyResult {
        match key {
            KeyEvent::Down | KeyEvent::Space | KeyEvent::Tab => {
                self.session.candidates_mut().next_candidate();
            }
            KeyEvent::Up => {
                self.session.candidates_mut().prev_candidate();
            }
            KeyEvent::Right | KeyEvent::PageDown => {
                self.session.candidates_mut().page_down();
            }
            KeyEvent::Left | KeyEvent::PageUp => {
                self.session.candidates_mut().page_up();
            }
            KeyEvent::Enter => {
                if let Some(candidate) = self.session.candidates().selected_candidate().cloned() {
                    self.accept_candidate(candidate);
                }
            }
            KeyEvent::Number(n) => {
                self.select_on_page(n);
            }
            KeyEvent::Char(ch @ '1'..='9') => {
                let n = ch as u8 - b'0';
                self.select_on_page(n);
            }
            KeyEvent::Backspace => {
                self.session.set_mode(InputMode::Composing);
                self.show_predict_list();
            }
            KeyEvent::Escape => {
                self.reset();
            }
            KeyEvent::Function(n) => {
                if let Some(target) = DirectConversion::from_function_key(n) {
                    self.session.set_mode(InputMode::Composing);
                    self.convert_directly(target);
                }
            }
            KeyEvent::Char(ch) if is_inputable(ch) => {
                let text = self
                    .session
                    .candidates()
                    .selected_candidate()
                    .map(|c| c.text.clone())
                    .unwrap_or_else(|| self.session.preedit_commit_text());
                self.reset();
                self.context.commit_text = text;
                self.start_composition(ch);
            }
            KeyEvent::Char(_) | KeyEvent::Delete => {}
        }
        KeyResult::Handled
    }

    fn start_composition(&mut self, ch: char) {
        self.session.clear();
        self.session.set_mode(InputMode::Composing);
        self.input_char(ch);
    }

    fn input_char(&mut self, ch: char) {
        self.session.set_converted_preedit(None);
        self.session
            .composing_mut()
            .input(ch, InputStyle::Transliterated, &self.config);
        self.after_edit();
    }

    /// Refresh predictions, or leave composition when the text is gone.
    fn after_edit(&mut self) {
        if self.session.composing().is_empty() {
            self.reset();
        } else {
            self.show_predict_list();
        }
    }

    fn request(&self, predictive: bool, n_best: usize) -> CandidateList {
        orchestrator::request_candidates(
            self.session.composing(),
            &self.engine,
            &self.config,
            CandidateRequest::new(Some(predictive), Some(n_best)),
        )
        .unwrap_or_default()
    }

    fn show_predict_list(&mut self) {
        let mut list = self.request(true, PREDICT_PAGE_SIZE);
        list.set_page_size(PREDICT_PAGE_SIZE);
        self.session.set_candidates(list);
    }

    fn show_conversion_list(&mut self) {
        let mut list = self.request(false, CONVERSION_PAGE_SIZE);
        list.set_page_size(CONVERSION_PAGE_SIZE);
        self.session.set_converted_preedit(None);
        if list.is_empty() {
            self.session.set_candidates(list);
            self.session.set_mode(InputMode::Composing);
        } else {
            self.session.set_candidates(list);
            self.session.set_mode(InputMode::Selecting);
        }
    }

    fn select_on_page(&mut self, n: u8) {
        let Some(index) = usize::from(n).checked_sub(1) else {
            return;
        };
        if let Some(candidate) = self.session.candidates_mut().select_by_index(index).cloned() {
            self.accept_candidate(candidate);
        }
    }

    /// Commit `candidate`. When it covers only part of the input, the
    /// covered prefix is completed and conversion continues on the rest.
    fn accept_candidate(&mut self, candidate: Candidate) {
        let remaining = self.session.composing().len();
        tracing::debug!(text = %candidate.text, count = candidate.corresponding_count, "accept candidate");
        if candidate.corresponding_count > 0 && candidate.corresponding_count < remaining {
            self.session
                .composing_mut()
                .prefix_complete(candidate.corresponding_count);
            self.context.commit_text = candidate.text;
            self.show_conversion_list();
        } else {
            self.reset();
            self.context.commit_text = candidate.text;
        }
    }

    fn commit_preedit(&mut self) {
        let text = self.session.preedit_commit_text();
        self.reset();
        self.context.commit_text = text;
    }

    fn convert_directly(&mut self, target: DirectConversion) {
        let composing = self.session.composing();
        let converted = match target {
            DirectConversion::Hiragana => composing.reading(),
            DirectConversion::KatakanaFullwidth => composing.to_katakana(Width::Fullwidth),
            DirectConversion::KatakanaHalfwidth => composing.to_katakana(Width::Halfwidth),
            DirectConversion::AlphabetFullwidth => {
                composing.to_alphabet(Width::Fullwidth, &self.context.preedit_text)
            }
            DirectConversion::AlphabetHalfwidth => {
                composing.to_alphabet(Width::Halfwidth, &self.context.preedit_text)
            }
        };
        self.session.candidates_mut().clear();
        self.session.set_converted_preedit(Some(converted));
    }
}
