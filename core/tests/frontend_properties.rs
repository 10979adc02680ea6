// End-to-end checks of the handle-based front end: normalization, diacritic
// fusion, cursor movement and candidate requests, driven only through the
// public API of `libkana-core`.

use std::cell::RefCell;

use libkana_core::{
    normalize, Candidate, ComposingText, ConversionEngine, ConvertOptions, DiacriticStyle,
    Frontend, InputStyle, Normalized, StyleConfig, StyleOptions, Width,
};

/// Engine that records every request and echoes the reading back.
#[derive(Default)]
struct Recorder {
    requests: RefCell<Vec<ConvertOptions>>,
}

impl ConversionEngine for Recorder {
    fn convert(
        &self,
        text: &ComposingText,
        options: &ConvertOptions,
    ) -> anyhow::Result<Vec<Candidate>> {
        self.requests.borrow_mut().push(options.clone());
        Ok(vec![Candidate::new(text.reading(), text.reading(), text.len())])
    }
}

fn text_of(ch: char, style: InputStyle, config: &StyleConfig) -> String {
    match normalize(ch, style, config) {
        Normalized::Text(text) => text,
        Normalized::Mark(mark) => panic!("unexpected mark {:?} for {:?}", mark, ch),
    }
}

#[test]
fn normalize_is_deterministic_and_pure() {
    let config = StyleConfig::default();
    for ch in ['a', '1', '!', 'ア', '-', '.', ',', ' ', '゛', '¥'] {
        for style in [InputStyle::Transliterated, InputStyle::Direct] {
            assert_eq!(normalize(ch, style, &config), normalize(ch, style, &config));
        }
    }
}

#[test]
fn digit_width_follows_config() {
    let full = StyleConfig {
        digit_width: Width::Fullwidth,
        ..StyleConfig::default()
    };
    let half = StyleConfig {
        digit_width: Width::Halfwidth,
        ..StyleConfig::default()
    };
    for ch in '0'..='9' {
        let expected = char::from_u32(ch as u32 + 0xFEE0).unwrap().to_string();
        assert_eq!(text_of(ch, InputStyle::Transliterated, &full), expected);
        assert_eq!(text_of(ch, InputStyle::Transliterated, &half), ch.to_string());
    }
}

#[test]
fn hyphen_is_always_long_vowel_mark() {
    for options in [
        StyleOptions::default(),
        StyleOptions {
            symbol_fullwidth: 0,
            period_style_index: 3,
            comma_style_index: 2,
            ..StyleOptions::default()
        },
    ] {
        let config = StyleConfig::from(options);
        assert_eq!(text_of('-', InputStyle::Transliterated, &config), "ー");
    }
}

#[test]
fn katakana_folds_only_in_transliterated_mode() {
    let config = StyleConfig::default();
    assert_eq!(text_of('カ', InputStyle::Transliterated, &config), "か");
    assert_eq!(text_of('ヴ', InputStyle::Transliterated, &config), "ゔ");
    assert_eq!(text_of('カ', InputStyle::Direct, &config), "カ");
}

#[test]
fn dakuten_fuses_once_then_stands_alone() {
    let mut frontend = Frontend::new(Recorder::default());
    let buffer = frontend.create_buffer();
    for key in ["か", "゛"] {
        frontend.input_text(buffer, None, Some(key), false);
    }
    assert_eq!(frontend.hiragana(buffer).unwrap(), "が");
    assert_eq!(frontend.buffer(buffer).unwrap().len(), 1);

    frontend.input_text(buffer, None, Some("゛"), false);
    assert_eq!(frontend.hiragana(buffer).unwrap(), "が\u{309B}");
}

#[test]
fn standalone_mark_glyph_follows_style() {
    let cases = [
        (DiacriticStyle::Fullwidth, '\u{309B}'),
        (DiacriticStyle::Halfwidth, '\u{FF9E}'),
        (DiacriticStyle::Combining, '\u{3099}'),
    ];
    for (style, glyph) in cases {
        let config = StyleConfig {
            diacritic_style: style,
            ..StyleConfig::default()
        };
        let mut text = ComposingText::new();
        text.input('x', InputStyle::Direct, &config);
        text.input('゛', InputStyle::Transliterated, &config);
        assert_eq!(text.units().last().map(|u| u.character), Some(glyph));
    }
}

#[test]
fn cursor_movement_is_clamped() {
    let mut frontend = Frontend::new(Recorder::default());
    let buffer = frontend.create_buffer();
    for key in ["a", "i", "u", "e", "o"] {
        frontend.input_text(buffer, None, Some(key), false);
    }
    assert_eq!(frontend.move_cursor(buffer, -3), -3);
    assert_eq!(frontend.buffer(buffer).unwrap().cursor(), 2);
    assert_eq!(frontend.move_cursor(buffer, -100), -2);
    assert_eq!(frontend.buffer(buffer).unwrap().cursor(), 0);
    assert_eq!(frontend.move_cursor(buffer, 100), 5);
}

#[test]
fn empty_buffer_has_no_candidates() {
    let mut frontend = Frontend::new(Recorder::default());
    let buffer = frontend.create_buffer();
    let config = frontend.create_config(StyleOptions::default());
    assert!(frontend.candidates(buffer, None, None, None).is_none());
    assert!(frontend.candidates(buffer, Some(config), Some(true), Some(3)).is_none());
    assert!(frontend.engine().requests.borrow().is_empty());
}

#[test]
fn predictive_request_enables_both_predictions() {
    let mut frontend = Frontend::new(Recorder::default());
    let buffer = frontend.create_buffer();
    let config = frontend.create_config(StyleOptions::default());
    frontend.input_text(buffer, Some(config), Some("k"), false);
    frontend.input_text(buffer, Some(config), Some("a"), false);

    let list = frontend
        .candidates(buffer, Some(config), Some(true), None)
        .unwrap();
    assert_eq!(list.get(0).map(|c| c.text.as_str()), Some("か"));

    let requests = frontend.engine().requests.borrow();
    let last = requests.last().unwrap();
    assert!(last.japanese_prediction);
    assert!(last.english_prediction);
}

#[test]
fn destroyed_handles_are_inert() {
    let mut frontend = Frontend::new(Recorder::default());
    let buffer = frontend.create_buffer();
    let config = frontend.create_config(StyleOptions::default());
    assert!(frontend.destroy_config(config));
    assert!(frontend.destroy_buffer(buffer));

    frontend.input_text(buffer, None, Some("a"), false);
    assert_eq!(frontend.hiragana(buffer), None);
    assert_eq!(frontend.delete_backward(buffer, 1), 0);
    assert_eq!(frontend.move_cursor(buffer, 1), 0);

    let fresh = frontend.create_buffer();
    frontend.input_text(fresh, Some(config), Some("a"), false);
    assert_eq!(frontend.hiragana(fresh).as_deref(), Some(""));
}
