//! libkana-core
//!
//! Keystroke normalization and composing-state front end for a Japanese
//! kana-kanji input method. The conversion engine itself is an external
//! collaborator behind the [`ConversionEngine`] trait; this crate decides
//! what gets committed into the composing text and how candidate requests
//! are built and consumed.
//!
//! Public API:
//! - `StyleConfig` - Per-session display conventions and neural-assist options
//! - `normalize` - Map one keystroke to its canonical text
//! - `combine` - Fuse a dakuten/handakuten mark into the preceding kana
//! - `ComposingText` - Cursor-addressed preedit buffer with kana/alphabet renderings
//! - `request_candidates` - Build a conversion request and collect results
//! - `Frontend` - Handle-based facade for input method hosts
//! - `ImeEngine` - Key-event driven session on top of all of the above

pub mod candidate;
pub use candidate::{Candidate, CandidateList, CandidateSegment};

pub mod config;
pub use config::{DiacriticStyle, NeuralAssist, PunctuationStyle, StyleConfig, StyleOptions, Width};

pub mod converter;
pub use converter::{ConversionEngine, ConvertOptions, NeuralMode, DEFAULT_N_BEST};

pub mod kana;
pub mod romaji;

pub mod normalizer;
pub use normalizer::{classify, normalize, CharClass, Normalized};

pub mod diacritic;
pub use diacritic::{combine, Combination, DiacriticMark};

pub mod composing;
pub use composing::{ComposingText, InputStyle, InputUnit};

pub mod orchestrator;
pub use orchestrator::{request_candidates, CandidateRequest};

pub mod registry;
pub use registry::{Handle, Registry};

pub mod frontend;
pub use frontend::{BufferHandle, ConfigHandle, Frontend};

// IME session layer
pub mod context;
pub use context::ImeContext;

pub mod session;
pub use session::{ImeSession, InputMode};

pub mod ime_engine;
pub use ime_engine::{DirectConversion, ImeEngine, KeyEvent, KeyResult};

/// Utility helpers.
pub mod utils {
    /// Convert ASCII characters to full-width equivalents.
    ///
    /// This converts:
    /// - ASCII letters (A-Z, a-z) → Full-width letters (Ａ-Ｚ, ａ-ｚ)
    /// - ASCII digits (0-9) → Full-width digits (０-９)
    /// - ASCII space → Ideographic space (　)
    /// - ASCII punctuation → Full-width punctuation
    ///
    /// Non-ASCII characters are passed through unchanged.
    pub fn to_fullwidth(s: &str) -> String {
        s.chars()
            .map(|ch| match ch {
                ' ' => '\u{3000}',
                // ASCII printable range (0x21-0x7E) -> Full-width (0xFF01-0xFF5E)
                '!'..='~' => char::from_u32(ch as u32 - 0x21 + 0xFF01).unwrap_or(ch),
                _ => ch,
            })
            .collect()
    }

    /// Convert full-width characters back to ASCII (half-width).
    pub fn to_halfwidth(s: &str) -> String {
        s.chars()
            .map(|ch| match ch {
                '\u{3000}' => ' ',
                '\u{FF01}'..='\u{FF5E}' => char::from_u32(ch as u32 - 0xFF01 + 0x21).unwrap_or(ch),
                _ => ch,
            })
            .collect()
    }

}
