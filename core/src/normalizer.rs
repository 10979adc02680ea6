//! Keystroke normalization.
//!
//! `normalize` maps one raw input character to the canonical text committed
//! into the composing buffer. It is pure: the result depends only on the
//! character, the input style and the style configuration. Dakuten and
//! handakuten keys are not resolved here; they come back as
//! [`Normalized::Mark`] so the diacritic combiner can look at the buffer.

use crate::composing::InputStyle;
use crate::config::{StyleConfig, Width};
use crate::diacritic::DiacriticMark;
use crate::kana;

/// Distance between ASCII 0x21..=0x7E and the fullwidth forms block.
pub const FULLWIDTH_OFFSET: u32 = 0xFEE0;

/// ASCII symbols that follow the symbol width setting, plus the yen sign.
pub const WIDTH_MAPPED_SYMBOLS: &[char] = &[
    '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', '/', ':', ';', '<', '=', '>', '?',
    '@', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~', '¥',
];

/// Category of a (possibly folded) input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Digit,
    Symbol,
    Period,
    Comma,
    Hyphen,
    Dakuten,
    Handakuten,
    Other,
}

/// Outcome of normalizing one keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// Text to insert at the cursor
    Text(String),
    /// A diacritic mark to be fused with (or appended after) the last unit
    Mark(DiacriticMark),
}

impl Normalized {
    fn from_char(ch: char) -> Self {
        Normalized::Text(ch.to_string())
    }

    /// The committed text, or `None` for a diacritic mark.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Normalized::Text(text) => Some(text),
            Normalized::Mark(_) => None,
        }
    }
}

fn halfwidth_symbol(ch: char) -> Option<char> {
    match ch {
        '￥' => Some('¥'),
        '\u{FF01}'..='\u{FF5E}' => {
            let narrow = char::from_u32(ch as u32 - FULLWIDTH_OFFSET)?;
            WIDTH_MAPPED_SYMBOLS.contains(&narrow).then_some(narrow)
        }
        _ => None,
    }
}

/// Classify a character. Symbols match in either width.
pub fn classify(ch: char) -> CharClass {
    match ch {
        '0'..='9' => CharClass::Digit,
        '.' => CharClass::Period,
        ',' => CharClass::Comma,
        '-' => CharClass::Hyphen,
        '゛' | 'ﾞ' => CharClass::Dakuten,
        '゜' | 'ﾟ' => CharClass::Handakuten,
        c if WIDTH_MAPPED_SYMBOLS.contains(&c) || halfwidth_symbol(c).is_some() => {
            CharClass::Symbol
        }
        _ => CharClass::Other,
    }
}

/// Map a width-mapped symbol (in either width) to `width`.
pub fn symbol_to_width(ch: char, width: Width) -> char {
    match width {
        Width::Fullwidth => match ch {
            '¥' => '￥',
            '!'..='~' => char::from_u32(ch as u32 + FULLWIDTH_OFFSET).unwrap_or(ch),
            _ => ch,
        },
        Width::Halfwidth => halfwidth_symbol(ch).unwrap_or(ch),
    }
}

/// Normalize one keystroke.
///
/// Direct input is committed verbatim. Transliterated input folds katakana
/// to hiragana, then applies the per-category rule from `config`.
pub fn normalize(ch: char, style: InputStyle, config: &StyleConfig) -> Normalized {
    if style == InputStyle::Direct {
        return Normalized::from_char(ch);
    }

    let ch = kana::katakana_to_hiragana(ch);
    let class = classify(ch);
    let result = match class {
        CharClass::Digit => match config.digit_width {
            Width::Fullwidth => {
                Normalized::from_char(char::from_u32(ch as u32 + FULLWIDTH_OFFSET).unwrap_or(ch))
            }
            Width::Halfwidth => Normalized::from_char(ch),
        },
        CharClass::Symbol => Normalized::from_char(symbol_to_width(ch, config.symbol_width)),
        CharClass::Period => Normalized::from_char(config.period_style.period()),
        CharClass::Comma => Normalized::from_char(config.comma_style.comma()),
        CharClass::Hyphen => Normalized::from_char('ー'),
        CharClass::Dakuten => Normalized::Mark(DiacriticMark::Dakuten),
        CharClass::Handakuten => Normalized::Mark(DiacriticMark::Handakuten),
        CharClass::Other => Normalized::from_char(ch),
    };
    tracing::trace!(input = %ch, ?class, ?result, "normalized keystroke");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PunctuationStyle;

    fn text(ch: char, config: &StyleConfig) -> String {
        normalize(ch, InputStyle::Transliterated, config)
            .as_text()
            .map(str::to_string)
            .unwrap_or_default()
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify('7'), CharClass::Digit);
        assert_eq!(classify('!'), CharClass::Symbol);
        assert_eq!(classify('！'), CharClass::Symbol);
        assert_eq!(classify('¥'), CharClass::Symbol);
        assert_eq!(classify('￥'), CharClass::Symbol);
        assert_eq!(classify('.'), CharClass::Period);
        assert_eq!(classify(','), CharClass::Comma);
        assert_eq!(classify('-'), CharClass::Hyphen);
        assert_eq!(classify('゛'), CharClass::Dakuten);
        assert_eq!(classify('ﾟ'), CharClass::Handakuten);
        assert_eq!(classify('a'), CharClass::Other);
        // Fullwidth letters are not symbols
        assert_eq!(classify('Ａ'), CharClass::Other);
    }

    #[test]
    fn test_digit_width() {
        let mut config = StyleConfig::default();
        for d in '0'..='9' {
            let expected = char::from_u32(d as u32 + 0xFEE0).unwrap();
            assert_eq!(text(d, &config), expected.to_string());
        }
        config.digit_width = Width::Halfwidth;
        for d in '0'..='9' {
            assert_eq!(text(d, &config), d.to_string());
        }
    }

    #[test]
    fn test_symbol_width_both_directions() {
        let mut config = StyleConfig::default();
        assert_eq!(text('?', &config), "？");
        assert_eq!(text('\\', &config), "＼");
        assert_eq!(text('¥', &config), "￥");
        assert_eq!(text('？', &config), "？");

        config.symbol_width = Width::Halfwidth;
        assert_eq!(text('？', &config), "?");
        assert_eq!(text('￥', &config), "¥");
        assert_eq!(text('~', &config), "~");
    }

    #[test]
    fn test_punctuation_styles() {
        let mut config = StyleConfig::default();
        assert_eq!(text('.', &config), "。");
        assert_eq!(text(',', &config), "、");

        config.period_style = PunctuationStyle::FullwidthLatin;
        config.comma_style = PunctuationStyle::HalfwidthLatin;
        assert_eq!(text('.', &config), "．");
        assert_eq!(text(',', &config), "､");

        // Halfwidth Latin gives the ideographic comma for the period key too.
        config.period_style = PunctuationStyle::HalfwidthLatin;
        assert_eq!(text('.', &config), "､");
    }

    #[test]
    fn test_hyphen_is_long_vowel_for_every_style() {
        let mut config = StyleConfig::default();
        assert_eq!(text('-', &config), "ー");
        config.symbol_width = Width::Halfwidth;
        config.period_style = PunctuationStyle::HalfwidthLatin;
        config.comma_style = PunctuationStyle::HalfwidthLatin;
        assert_eq!(text('-', &config), "ー");
    }

    #[test]
    fn test_katakana_folds_only_when_transliterated() {
        let config = StyleConfig::default();
        assert_eq!(text('カ', &config), "か");
        assert_eq!(text('ヴ', &config), "ゔ");
        assert_eq!(
            normalize('カ', InputStyle::Direct, &config),
            Normalized::Text("カ".to_string())
        );
    }

    #[test]
    fn test_direct_mode_is_verbatim() {
        let config = StyleConfig::default();
        for ch in ['1', '?', '.', ',', '-', '゛', 'x'] {
            assert_eq!(
                normalize(ch, InputStyle::Direct, &config),
                Normalized::Text(ch.to_string())
            );
        }
    }

    #[test]
    fn test_diacritic_keys_become_marks() {
        let config = StyleConfig::default();
        assert_eq!(
            normalize('゛', InputStyle::Transliterated, &config),
            Normalized::Mark(DiacriticMark::Dakuten)
        );
        assert_eq!(
            normalize('ﾟ', InputStyle::Transliterated, &config),
            Normalized::Mark(DiacriticMark::Handakuten)
        );
    }

    #[test]
    fn test_other_passes_through() {
        let config = StyleConfig::default();
        assert_eq!(text('k', &config), "k");
        assert_eq!(text('あ', &config), "あ");
        assert_eq!(text('漢', &config), "漢");
    }

    #[test]
    fn test_deterministic() {
        let config = StyleConfig::default();
        for ch in ['1', '!', '.', ',', '-', 'ア', '゛', 'z'] {
            let first = normalize(ch, InputStyle::Transliterated, &config);
            let second = normalize(ch, InputStyle::Transliterated, &config);
            assert_eq!(first, second);
        }
    }
}
