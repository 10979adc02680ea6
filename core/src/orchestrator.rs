//! Candidate requests.
//!
//! Builds a conversion request from the composing text, the style
//! configuration and per-call overrides, calls the engine and hands back its
//! results in engine order.

use crate::candidate::CandidateList;
use crate::composing::ComposingText;
use crate::config::StyleConfig;
use crate::converter::{ConversionEngine, ConvertOptions};

/// Per-call overrides on top of the configuration's options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CandidateRequest {
    /// Upper bound on the number of candidates
    pub max_count: Option<usize>,
    /// `Some(true)` turns on Japanese and Latin prediction together
    pub predictive: Option<bool>,
}

impl CandidateRequest {
    pub fn new(predictive: Option<bool>, max_count: Option<usize>) -> Self {
        Self {
            max_count,
            predictive,
        }
    }

    /// Options for one engine call.
    pub fn options(&self, config: &StyleConfig) -> ConvertOptions {
        let mut options = config.convert_options();
        if let Some(max_count) = self.max_count {
            options.n_best = max_count;
        }
        if self.predictive == Some(true) {
            options.japanese_prediction = true;
            options.english_prediction = true;
        }
        options
    }
}

/// Ask `engine` for candidates for `text`.
///
/// Returns `None` for an empty buffer without calling the engine. An engine
/// error is logged and yields an empty list.
pub fn request_candidates<E>(
    text: &ComposingText,
    engine: &E,
    config: &StyleConfig,
    request: CandidateRequest,
) -> Option<CandidateList>
where
    E: ConversionEngine + ?Sized,
{
    if text.is_empty() {
        return None;
    }

    let options = request.options(config);
    let mut candidates = match engine.convert(text, &options) {
        Ok(candidates) => candidates,
        Err(err) => {
            tracing::warn!(error = %err, reading = %text.reading(), "conversion failed");
            Vec::new()
        }
    };
    candidates.truncate(options.n_best);
    tracing::debug!(
        count = candidates.len(),
        n_best = options.n_best,
        predictive = options.predictive(),
        "candidates ready"
    );
    Some(CandidateList::from_candidates(candidates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;
    use crate::composing::InputStyle;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<ConvertOptions>>,
        fail: bool,
    }

    impl ConversionEngine for Recorder {
        fn convert(
            &self,
            text: &ComposingText,
            options: &ConvertOptions,
        ) -> anyhow::Result<Vec<Candidate>> {
            self.calls.borrow_mut().push(options.clone());
            if self.fail {
                anyhow::bail!("engine offline");
            }
            let reading = text.reading();
            Ok((0..20)
                .map(|i| Candidate::new(format!("{}{}", reading, i), reading.clone(), text.len()))
                .collect())
        }
    }

    fn buffer(keys: &str) -> ComposingText {
        let config = StyleConfig::default();
        let mut text = ComposingText::new();
        for ch in keys.chars() {
            text.input(ch, InputStyle::Transliterated, &config);
        }
        text
    }

    #[test]
    fn test_empty_buffer_skips_engine() {
        let engine = Recorder::default();
        let result = request_candidates(
            &ComposingText::new(),
            &engine,
            &StyleConfig::default(),
            CandidateRequest::new(Some(true), Some(3)),
        );
        assert!(result.is_none());
        assert!(engine.calls.borrow().is_empty());
    }

    #[test]
    fn test_order_kept_and_bounded() {
        let engine = Recorder::default();
        let list = request_candidates(
            &buffer("ka"),
            &engine,
            &StyleConfig::default(),
            CandidateRequest::new(None, Some(4)),
        )
        .unwrap();
        let texts: Vec<&str> = list.candidates().iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["か0", "か1", "か2", "か3"]);
        assert_eq!(engine.calls.borrow()[0].n_best, 4);
    }

    #[test]
    fn test_default_bound() {
        let engine = Recorder::default();
        let list = request_candidates(
            &buffer("ka"),
            &engine,
            &StyleConfig::default(),
            CandidateRequest::default(),
        )
        .unwrap();
        assert_eq!(list.len(), crate::converter::DEFAULT_N_BEST);
    }

    #[test]
    fn test_predictive_sets_both_flags() {
        let engine = Recorder::default();
        request_candidates(
            &buffer("ka"),
            &engine,
            &StyleConfig::default(),
            CandidateRequest::new(Some(true), None),
        );
        request_candidates(
            &buffer("ka"),
            &engine,
            &StyleConfig::default(),
            CandidateRequest::new(Some(false), None),
        );
        let calls = engine.calls.borrow();
        assert!(calls[0].japanese_prediction && calls[0].english_prediction);
        assert!(!calls[1].japanese_prediction && !calls[1].english_prediction);
    }

    #[test]
    fn test_engine_error_is_empty_list() {
        let engine = Recorder {
            fail: true,
            ..Default::default()
        };
        let list = request_candidates(
            &buffer("ka"),
            &engine,
            &StyleConfig::default(),
            CandidateRequest::default(),
        )
        .unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_options_carry_style_widths() {
        let mut config = StyleConfig::default();
        config.digit_width = crate::config::Width::Halfwidth;
        let options = CandidateRequest::default().options(&config);
        assert_eq!(options.digit_width, crate::config::Width::Halfwidth);
    }
}
