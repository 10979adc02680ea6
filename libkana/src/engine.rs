//! Dictionary-backed conversion engine.
//!
//! A small reference `ConversionEngine` over a [`Lexicon`]. It does no
//! statistical ranking beyond lexicon frequencies; real deployments plug a
//! full converter in behind the same trait.

use std::collections::HashSet;
use std::sync::Arc;

use libkana_core::{kana, Candidate, CandidateSegment, ComposingText, ConversionEngine, ConvertOptions};

use crate::lexicon::Lexicon;

/// Reference engine backed by an in-memory lexicon.
///
/// The lexicon is wrapped in `Arc` so clones are cheap and can be shared
/// between several IME sessions.
#[derive(Debug, Clone)]
pub struct DictionaryEngine {
    lexicon: Arc<Lexicon>,
}

impl DictionaryEngine {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
        }
    }

    /// Engine over the built-in demo lexicon.
    pub fn demo() -> Self {
        Self::new(Lexicon::load_demo())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Greedy longest-prefix segmentation of `reading`.
    ///
    /// Runs of characters with no lexicon entry are kept as one segment with
    /// their reading as text. Returns `None` unless at least one segment was
    /// found in the lexicon.
    fn segment(&self, reading: &str) -> Option<Vec<CandidateSegment>> {
        let chars: Vec<char> = reading.chars().collect();
        let max_len = self.lexicon.max_reading_len();
        let mut segments = Vec::new();
        let mut unknown = String::new();
        let mut matched = false;
        let mut i = 0;

        while i < chars.len() {
            let longest = max_len.min(chars.len() - i);
            let hit = (1..=longest).rev().find_map(|len| {
                let piece: String = chars[i..i + len].iter().collect();
                self.lexicon
                    .lookup(&piece)
                    .into_iter()
                    .next()
                    .map(|word| (len, word.text))
            });

            match hit {
                Some((len, text)) => {
                    if !unknown.is_empty() {
                        let pending = std::mem::take(&mut unknown);
                        segments.push(CandidateSegment {
                            reading_len: pending.chars().count(),
                            text: pending,
                        });
                    }
                    segments.push(CandidateSegment {
                        text,
                        reading_len: len,
                    });
                    matched = true;
                    i += len;
                }
                None => {
                    unknown.push(chars[i]);
                    i += 1;
                }
            }
        }
        if !unknown.is_empty() {
            segments.push(CandidateSegment {
                reading_len: unknown.chars().count(),
                text: unknown,
            });
        }

        matched.then_some(segments)
    }
}

impl ConversionEngine for DictionaryEngine {
    fn convert(
        &self,
        text: &ComposingText,
        options: &ConvertOptions,
    ) -> anyhow::Result<Vec<Candidate>> {
        if options.neural.is_some() {
            tracing::debug!("neural assist requested; dictionary engine ignores it");
        }

        let reading = text.reading();
        let len = text.len();
        let mut out = Vec::new();

        for word in self.lexicon.lookup(&reading) {
            out.push(Candidate::new(word.text, reading.clone(), len));
        }

        if let Some(segments) = self.segment(&reading) {
            if segments.len() > 1 {
                out.push(Candidate::from_segments(segments, reading.clone(), len));
            }
        }

        if options.japanese_prediction && !reading.is_empty() {
            for (predicted, word) in self.lexicon.predict(&reading) {
                out.push(Candidate::new(word.text, predicted, len));
            }
        }
        if options.english_prediction {
            let raw = text.raw_text();
            if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphabetic()) {
                out.push(Candidate::new(raw.clone(), raw, len));
            }
        }

        // Conversions of a prefix only, longest first.
        let mut seen_prefixes = HashSet::new();
        for count in (1..len).rev() {
            let prefix = text.prefix_reading(count);
            if prefix.is_empty()
                || prefix.len() >= reading.len()
                || !reading.starts_with(&prefix)
                || !seen_prefixes.insert(prefix.clone())
            {
                continue;
            }
            for word in self.lexicon.lookup(&prefix) {
                out.push(Candidate::new(word.text, prefix.clone(), count));
            }
        }

        out.push(Candidate::new(reading.clone(), reading.clone(), len));
        out.push(Candidate::new(kana::to_katakana(&reading), reading.clone(), len));

        let mut seen = HashSet::new();
        out.retain(|c| seen.insert((c.text.clone(), c.corresponding_count)));
        out.truncate(options.n_best);

        tracing::debug!(reading = %reading, count = out.len(), "dictionary conversion");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libkana_core::{InputStyle, StyleConfig};

    fn composing(keys: &str) -> ComposingText {
        let config = StyleConfig::default();
        let mut text = ComposingText::new();
        for ch in keys.chars() {
            text.input(ch, InputStyle::Transliterated, &config);
        }
        text
    }

    fn texts(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_whole_reading_first() {
        let engine = DictionaryEngine::demo();
        let out = engine
            .convert(&composing("kanji"), &ConvertOptions::default())
            .unwrap();
        assert_eq!(&texts(&out)[..3], &["漢字", "感じ", "幹事"]);
        assert!(out[..3].iter().all(|c| c.corresponding_count == 5));
    }

    #[test]
    fn test_segmented_sentence() {
        let engine = DictionaryEngine::demo();
        let out = engine
            .convert(&composing("kyouhaiitenki"), &ConvertOptions::default())
            .unwrap();
        assert_eq!(out[0].text, "今日はいい天気");
        assert_eq!(out[0].segment_texts(), vec!["今日", "は", "いい", "天気"]);
    }

    #[test]
    fn test_prefix_candidates_cover_fewer_units() {
        let engine = DictionaryEngine::demo();
        let text = composing("nekoinu");
        let out = engine.convert(&text, &ConvertOptions::default()).unwrap();
        let neko = out
            .iter()
            .find(|c| c.text == "猫" && c.corresponding_count < text.len())
            .expect("prefix candidate");
        assert_eq!(neko.corresponding_count, 4);
        assert_eq!(neko.reading, "ねこ");
    }

    #[test]
    fn test_fallbacks_and_dedup() {
        let engine = DictionaryEngine::new(Lexicon::new());
        let config = StyleConfig::default();
        let mut digits = ComposingText::new();
        digits.input('1', InputStyle::Direct, &config);
        digits.input('2', InputStyle::Direct, &config);
        // hiragana and katakana fallbacks are identical for digits
        let out = engine.convert(&digits, &ConvertOptions::default()).unwrap();
        assert_eq!(texts(&out), vec!["12"]);

        let out = engine
            .convert(&composing("kana"), &ConvertOptions::default())
            .unwrap();
        assert_eq!(texts(&out), vec!["かな", "カナ"]);
    }

    #[test]
    fn test_prediction_and_n_best() {
        let engine = DictionaryEngine::demo();
        let options = ConvertOptions {
            japanese_prediction: true,
            ..ConvertOptions::default()
        };
        let out = engine.convert(&composing("nihon"), &options).unwrap();
        assert!(texts(&out).contains(&"日本語"));

        let options = ConvertOptions {
            n_best: 2,
            ..ConvertOptions::default()
        };
        let out = engine.convert(&composing("kanji"), &options).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_english_prediction_offers_raw_keys() {
        let engine = DictionaryEngine::demo();
        let options = ConvertOptions {
            english_prediction: true,
            ..ConvertOptions::default()
        };
        let out = engine.convert(&composing("neko"), &options).unwrap();
        assert!(texts(&out).contains(&"neko"));
    }
}
