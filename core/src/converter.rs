// core/src/converter.rs
//
// Contract between the composing front end and the kana-kanji conversion
// engine. The engine itself (statistical, neural or dictionary based) lives
// outside this crate; the front end only builds `ConvertOptions` and consumes
// the ordered `Candidate` list it returns.

use std::path::PathBuf;

use crate::candidate::Candidate;
use crate::composing::ComposingText;
use crate::config::Width;

/// Number of candidates requested when the caller gives no bound.
pub const DEFAULT_N_BEST: usize = 9;

/// Neural-assist parameters forwarded to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuralMode {
    pub weight: Option<PathBuf>,
    pub inference_limit: usize,
    pub accelerator_layers: i32,
    pub profile: Option<String>,
    pub left_context: Option<String>,
}

/// Options for a single conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Maximum number of candidates to return
    pub n_best: usize,
    /// Request Japanese predictive completions
    pub japanese_prediction: bool,
    /// Request Latin-script predictive completions
    pub english_prediction: bool,
    /// Width the engine should use for digits inside candidates
    pub digit_width: Width,
    /// Width the engine should use for symbols inside candidates
    pub symbol_width: Width,
    /// Language-model assist, `None` when disabled
    pub neural: Option<NeuralMode>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            n_best: DEFAULT_N_BEST,
            japanese_prediction: false,
            english_prediction: false,
            digit_width: Width::Fullwidth,
            symbol_width: Width::Fullwidth,
            neural: None,
        }
    }
}

impl ConvertOptions {
    /// Whether any predictive completion was requested.
    pub fn predictive(&self) -> bool {
        self.japanese_prediction || self.english_prediction
    }
}

/// A kana-kanji conversion backend.
///
/// Implementations receive the whole composing text (so they can look at the
/// raw input units as well as the rendered reading) and return candidates in
/// their own ranking order. The caller never reorders them.
pub trait ConversionEngine {
    /// Convert `text` into ranked candidates.
    fn convert(
        &self,
        text: &ComposingText,
        options: &ConvertOptions,
    ) -> anyhow::Result<Vec<Candidate>>;
}

impl<E: ConversionEngine + ?Sized> ConversionEngine for &E {
    fn convert(
        &self,
        text: &ComposingText,
        options: &ConvertOptions,
    ) -> anyhow::Result<Vec<Candidate>> {
        (**self).convert(text, options)
    }
}

impl<E: ConversionEngine + ?Sized> ConversionEngine for std::sync::Arc<E> {
    fn convert(
        &self,
        text: &ComposingText,
        options: &ConvertOptions,
    ) -> anyhow::Result<Vec<Candidate>> {
        (**self).convert(text, options)
    }
}
