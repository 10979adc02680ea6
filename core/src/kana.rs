// core/src/kana.rs
//
// Kana character tables: katakana/hiragana folding, halfwidth katakana, and
// the dakuten/handakuten forms used when a diacritic mark is typed after a
// kana letter.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Offset between the hiragana and katakana blocks.
pub const KANA_BLOCK_OFFSET: u32 = 0x60;

/// Standalone and combining diacritic glyphs. A unit holding one of these is
/// never fused with a further mark.
pub const MARKED_GLYPHS: [char; 6] = [
    '\u{309B}', // ゛
    '\u{309C}', // ゜
    '\u{3099}', // combining dakuten
    '\u{309A}', // combining handakuten
    '\u{FF9E}', // ﾞ
    '\u{FF9F}', // ﾟ
];

/// Katakana letters ァ..ヶ, the range that has a hiragana counterpart.
pub fn is_foldable_katakana(ch: char) -> bool {
    ('\u{30A1}'..='\u{30F6}').contains(&ch)
}

/// Hiragana letters ぁ..ゖ plus the iteration marks ゝ ゞ.
pub fn is_hiragana_letter(ch: char) -> bool {
    ('\u{3041}'..='\u{3096}').contains(&ch) || ch == 'ゝ' || ch == 'ゞ'
}

/// Fold a katakana letter to hiragana; anything else is returned unchanged.
pub fn katakana_to_hiragana(ch: char) -> char {
    if is_foldable_katakana(ch) {
        char::from_u32(ch as u32 - KANA_BLOCK_OFFSET).unwrap_or(ch)
    } else {
        ch
    }
}

/// Raise a hiragana letter to katakana; anything else is returned unchanged.
pub fn hiragana_to_katakana(ch: char) -> char {
    if is_hiragana_letter(ch) {
        char::from_u32(ch as u32 + KANA_BLOCK_OFFSET).unwrap_or(ch)
    } else {
        ch
    }
}

/// Whether `ch` is one of the diacritic glyphs in [`MARKED_GLYPHS`].
pub fn is_marked_glyph(ch: char) -> bool {
    MARKED_GLYPHS.contains(&ch)
}

/// Convert hiragana in `s` to fullwidth katakana.
pub fn to_katakana(s: &str) -> String {
    s.chars().map(hiragana_to_katakana).collect()
}

/// Convert `s` to halfwidth katakana.
///
/// Hiragana is raised to katakana first; voiced letters decompose into a
/// base letter plus ﾞ or ﾟ, Japanese punctuation and fullwidth ASCII narrow
/// to their halfwidth forms.
pub fn to_halfwidth_katakana(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        let ch = hiragana_to_katakana(ch);
        match HALFWIDTH_KATAKANA.get(&ch) {
            Some(narrow) => out.push_str(narrow),
            None => out.push_str(&crate::utils::to_halfwidth(ch.encode_utf8(&mut [0; 4]))),
        }
    }
    out
}

#[rustfmt::skip]
const DAKUTEN_PAIRS: &[(char, char)] = &[
    ('か', 'が'), ('き', 'ぎ'), ('く', 'ぐ'), ('け', 'げ'), ('こ', 'ご'),
    ('さ', 'ざ'), ('し', 'じ'), ('す', 'ず'), ('せ', 'ぜ'), ('そ', 'ぞ'),
    ('た', 'だ'), ('ち', 'ぢ'), ('つ', 'づ'), ('て', 'で'), ('と', 'ど'),
    ('は', 'ば'), ('ひ', 'び'), ('ふ', 'ぶ'), ('へ', 'べ'), ('ほ', 'ぼ'),
    ('う', 'ゔ'), ('ゝ', 'ゞ'),
    ('カ', 'ガ'), ('キ', 'ギ'), ('ク', 'グ'), ('ケ', 'ゲ'), ('コ', 'ゴ'),
    ('サ', 'ザ'), ('シ', 'ジ'), ('ス', 'ズ'), ('セ', 'ゼ'), ('ソ', 'ゾ'),
    ('タ', 'ダ'), ('チ', 'ヂ'), ('ツ', 'ヅ'), ('テ', 'デ'), ('ト', 'ド'),
    ('ハ', 'バ'), ('ヒ', 'ビ'), ('フ', 'ブ'), ('ヘ', 'ベ'), ('ホ', 'ボ'),
    ('ウ', 'ヴ'), ('ワ', 'ヷ'), ('ヲ', 'ヺ'), ('ヽ', 'ヾ'),
];

#[rustfmt::skip]
const HANDAKUTEN_PAIRS: &[(char, char)] = &[
    ('は', 'ぱ'), ('ひ', 'ぴ'), ('ふ', 'ぷ'), ('へ', 'ぺ'), ('ほ', 'ぽ'),
    ('ハ', 'パ'), ('ヒ', 'ピ'), ('フ', 'プ'), ('ヘ', 'ペ'), ('ホ', 'ポ'),
];

static DAKUTEN: Lazy<HashMap<char, char>> = Lazy::new(|| DAKUTEN_PAIRS.iter().copied().collect());

static HANDAKUTEN: Lazy<HashMap<char, char>> =
    Lazy::new(|| HANDAKUTEN_PAIRS.iter().copied().collect());

/// Voiced form of `ch` (か → が), if it has one.
pub fn dakuten(ch: char) -> Option<char> {
    DAKUTEN.get(&ch).copied()
}

/// Semi-voiced form of `ch` (は → ぱ), if it has one.
pub fn handakuten(ch: char) -> Option<char> {
    HANDAKUTEN.get(&ch).copied()
}

#[rustfmt::skip]
const HALFWIDTH_PAIRS: &[(char, &str)] = &[
    // Plain letters
    ('ァ', "ｧ"), ('ア', "ｱ"), ('ィ', "ｨ"), ('イ', "ｲ"), ('ゥ', "ｩ"),
    ('ウ', "ｳ"), ('ェ', "ｪ"), ('エ', "ｴ"), ('ォ', "ｫ"), ('オ', "ｵ"),
    ('カ', "ｶ"), ('キ', "ｷ"), ('ク', "ｸ"), ('ケ', "ｹ"), ('コ', "ｺ"),
    ('サ', "ｻ"), ('シ', "ｼ"), ('ス', "ｽ"), ('セ', "ｾ"), ('ソ', "ｿ"),
    ('タ', "ﾀ"), ('チ', "ﾁ"), ('ッ', "ｯ"), ('ツ', "ﾂ"), ('テ', "ﾃ"), ('ト', "ﾄ"),
    ('ナ', "ﾅ"), ('ニ', "ﾆ"), ('ヌ', "ﾇ"), ('ネ', "ﾈ"), ('ノ', "ﾉ"),
    ('ハ', "ﾊ"), ('ヒ', "ﾋ"), ('フ', "ﾌ"), ('ヘ', "ﾍ"), ('ホ', "ﾎ"),
    ('マ', "ﾏ"), ('ミ', "ﾐ"), ('ム', "ﾑ"), ('メ', "ﾒ"), ('モ', "ﾓ"),
    ('ャ', "ｬ"), ('ヤ', "ﾔ"), ('ュ', "ｭ"), ('ユ', "ﾕ"), ('ョ', "ｮ"), ('ヨ', "ﾖ"),
    ('ラ', "ﾗ"), ('リ', "ﾘ"), ('ル', "ﾙ"), ('レ', "ﾚ"), ('ロ', "ﾛ"),
    ('ヮ', "ﾜ"), ('ワ', "ﾜ"), ('ヰ', "ｲ"), ('ヱ', "ｴ"), ('ヲ', "ｦ"),
    ('ン', "ﾝ"), ('ヵ', "ｶ"), ('ヶ', "ｹ"),
    // Voiced letters decompose
    ('ガ', "ｶﾞ"), ('ギ', "ｷﾞ"), ('グ', "ｸﾞ"), ('ゲ', "ｹﾞ"), ('ゴ', "ｺﾞ"),
    ('ザ', "ｻﾞ"), ('ジ', "ｼﾞ"), ('ズ', "ｽﾞ"), ('ゼ', "ｾﾞ"), ('ゾ', "ｿﾞ"),
    ('ダ', "ﾀﾞ"), ('ヂ', "ﾁﾞ"), ('ヅ', "ﾂﾞ"), ('デ', "ﾃﾞ"), ('ド', "ﾄﾞ"),
    ('バ', "ﾊﾞ"), ('ビ', "ﾋﾞ"), ('ブ', "ﾌﾞ"), ('ベ', "ﾍﾞ"), ('ボ', "ﾎﾞ"),
    ('パ', "ﾊﾟ"), ('ピ', "ﾋﾟ"), ('プ', "ﾌﾟ"), ('ペ', "ﾍﾟ"), ('ポ', "ﾎﾟ"),
    ('ヴ', "ｳﾞ"), ('ヷ', "ﾜﾞ"), ('ヺ', "ｦﾞ"),
    // Marks and punctuation
    ('ー', "ｰ"), ('。', "｡"), ('、', "､"), ('「', "｢"), ('」', "｣"), ('・', "･"),
    ('゛', "ﾞ"), ('゜', "ﾟ"), ('\u{3099}', "ﾞ"), ('\u{309A}', "ﾟ"),
];

static HALFWIDTH_KATAKANA: Lazy<HashMap<char, &'static str>> =
    Lazy::new(|| HALFWIDTH_PAIRS.iter().copied().collect());
