//! Dakuten/handakuten combination.
//!
//! A voicing mark typed after a kana letter is fused into it (か + ゛ → が).
//! When the buffer is empty, the last unit is already a mark, or the letter has
//! no voiced form, the mark is appended as a standalone glyph in the
//! configured diacritic style. Typing the mark twice therefore gives the fused
//! letter followed by one standalone glyph.

use crate::composing::{ComposingText, InputUnit};
use crate::config::{DiacriticStyle, StyleConfig};
use crate::kana;

/// A voicing mark key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiacriticMark {
    /// ゛ (voiced)
    Dakuten,
    /// ゜ (semi-voiced)
    Handakuten,
}

impl DiacriticMark {
    /// Standalone glyph for this mark in `style`.
    pub fn glyph(self, style: DiacriticStyle) -> char {
        match (self, style) {
            (DiacriticMark::Dakuten, DiacriticStyle::Fullwidth) => '\u{309B}',
            (DiacriticMark::Dakuten, DiacriticStyle::Halfwidth) => '\u{FF9E}',
            (DiacriticMark::Dakuten, DiacriticStyle::Combining) => '\u{3099}',
            (DiacriticMark::Handakuten, DiacriticStyle::Fullwidth) => '\u{309C}',
            (DiacriticMark::Handakuten, DiacriticStyle::Halfwidth) => '\u{FF9F}',
            (DiacriticMark::Handakuten, DiacriticStyle::Combining) => '\u{309A}',
        }
    }

    /// Marked form of `ch`, if it has one.
    pub fn apply(self, ch: char) -> Option<char> {
        match self {
            DiacriticMark::Dakuten => kana::dakuten(ch),
            DiacriticMark::Handakuten => kana::handakuten(ch),
        }
    }
}

/// What to do with the buffer for a typed mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Combination {
    /// Replace the last unit with this one; nothing is appended
    Fused(InputUnit),
    /// Insert this glyph as a new unit
    Standalone(char),
}

/// Decide how `mark` combines with the tail of `buffer`.
pub fn combine(mark: DiacriticMark, buffer: &ComposingText, config: &StyleConfig) -> Combination {
    let standalone = Combination::Standalone(mark.glyph(config.diacritic_style));

    let Some(last) = buffer.last() else {
        return standalone;
    };
    if kana::is_marked_glyph(last.character) {
        return standalone;
    }
    match mark.apply(last.character) {
        Some(fused) => Combination::Fused(InputUnit::new(fused, last.style)),
        None => standalone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composing::InputStyle;

    fn buffer_with(chars: &str, style: InputStyle) -> ComposingText {
        let mut buffer = ComposingText::new();
        for ch in chars.chars() {
            buffer.insert_at_cursor(InputUnit::new(ch, style));
        }
        buffer
    }

    #[test]
    fn test_fuses_into_last_unit() {
        let config = StyleConfig::default();
        let buffer = buffer_with("か", InputStyle::Transliterated);
        assert_eq!(
            combine(DiacriticMark::Dakuten, &buffer, &config),
            Combination::Fused(InputUnit::new('が', InputStyle::Transliterated))
        );

        let buffer = buffer_with("ホ", InputStyle::Direct);
        assert_eq!(
            combine(DiacriticMark::Handakuten, &buffer, &config),
            Combination::Fused(InputUnit::new('ポ', InputStyle::Direct))
        );
    }

    #[test]
    fn test_empty_buffer_gives_standalone() {
        let config = StyleConfig::default();
        let buffer = ComposingText::new();
        assert_eq!(
            combine(DiacriticMark::Dakuten, &buffer, &config),
            Combination::Standalone('゛')
        );
    }

    #[test]
    fn test_already_voiced_gives_standalone() {
        let config = StyleConfig::default();
        let buffer = buffer_with("が", InputStyle::Transliterated);
        assert_eq!(
            combine(DiacriticMark::Dakuten, &buffer, &config),
            Combination::Standalone('゛')
        );
    }

    #[test]
    fn test_marked_glyph_tail_gives_standalone() {
        let config = StyleConfig::default();
        for glyph in kana::MARKED_GLYPHS {
            let buffer = buffer_with(&glyph.to_string(), InputStyle::Transliterated);
            assert_eq!(
                combine(DiacriticMark::Handakuten, &buffer, &config),
                Combination::Standalone('゜')
            );
        }
    }

    #[test]
    fn test_no_voiced_form_gives_standalone() {
        let config = StyleConfig::default();
        let buffer = buffer_with("あ", InputStyle::Transliterated);
        assert_eq!(
            combine(DiacriticMark::Dakuten, &buffer, &config),
            Combination::Standalone('゛')
        );
        let buffer = buffer_with("か", InputStyle::Transliterated);
        assert_eq!(
            combine(DiacriticMark::Handakuten, &buffer, &config),
            Combination::Standalone('゜')
        );
    }

    #[test]
    fn test_standalone_glyph_follows_style() {
        let mut config = StyleConfig::default();
        let buffer = ComposingText::new();

        config.diacritic_style = DiacriticStyle::Combining;
        assert_eq!(
            combine(DiacriticMark::Dakuten, &buffer, &config),
            Combination::Standalone('\u{3099}')
        );
        assert_eq!(
            combine(DiacriticMark::Handakuten, &buffer, &config),
            Combination::Standalone('\u{309A}')
        );

        config.diacritic_style = DiacriticStyle::Halfwidth;
        assert_eq!(
            combine(DiacriticMark::Dakuten, &buffer, &config),
            Combination::Standalone('ﾞ')
        );
        assert_eq!(
            combine(DiacriticMark::Handakuten, &buffer, &config),
            Combination::Standalone('ﾟ')
        );

        config.diacritic_style = DiacriticStyle::Fullwidth;
        assert_eq!(
            combine(DiacriticMark::Handakuten, &buffer, &config),
            Combination::Standalone('゜')
        );
    }
}
