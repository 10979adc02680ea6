//! libkana crate root
//!
//! Reference dictionary engine and factory functions on top of
//! `libkana-core`. Hosts that bring their own converter only need the core
//! crate; this crate wires the core front end to an in-memory lexicon.
//!
//! Public API exported here:
//! - `Lexicon` and `WordEntry` from `lexicon`
//! - `DictionaryEngine` from `engine`
//! - `create_ime_engine` / `create_frontend` factories

pub mod engine;
pub mod lexicon;

pub use libkana_core::{
    Candidate, CandidateList, ComposingText, ConversionEngine, ConvertOptions, Frontend,
    ImeContext, ImeEngine, ImeSession, InputMode, InputStyle, KeyEvent, KeyResult, StyleConfig,
    StyleOptions, Width,
};

pub use engine::DictionaryEngine;
pub use lexicon::{Lexicon, WordEntry};

use std::path::Path;

/// Load a lexicon file, or the built-in demo lexicon when no path is given.
pub fn load_lexicon(path: Option<&Path>) -> anyhow::Result<Lexicon> {
    match path {
        Some(path) => Lexicon::load(path),
        None => Ok(Lexicon::load_demo()),
    }
}

/// Create a key-event driven IME over `lexicon`.
///
/// # Example
///
/// ```
/// use libkana::{create_ime_engine, KeyEvent, Lexicon, StyleConfig};
///
/// let mut ime = create_ime_engine(Lexicon::load_demo(), StyleConfig::default());
/// for ch in "neko".chars() {
///     ime.process_key(KeyEvent::Char(ch));
/// }
/// assert_eq!(ime.context().preedit_text, "ねこ");
/// ```
pub fn create_ime_engine(lexicon: Lexicon, config: StyleConfig) -> ImeEngine<DictionaryEngine> {
    ImeEngine::with_config(DictionaryEngine::new(lexicon), config)
}

/// Create a handle-based front end over `lexicon`.
pub fn create_frontend(lexicon: Lexicon) -> Frontend<DictionaryEngine> {
    Frontend::new(DictionaryEngine::new(lexicon))
}
