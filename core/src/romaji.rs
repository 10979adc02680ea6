//! Romaji to hiragana transliteration.
//!
//! Transliterated input units are stored as the raw keys the user typed
//! ("k", "a", ...). Rendering runs them through this table with longest-match
//! lookup plus the two contextual rules every romaji IME has:
//!
//! - a doubled consonant becomes a small っ (`kk` → `っk`)
//! - `n` before a consonant becomes ん (`nk` → `んk`), while `nn` and `n'`
//!   always give ん
//!
//! Input that cannot complete any entry is copied through unchanged. An
//! incomplete tail (e.g. `ky`) is returned separately as `pending`.

use phf::phf_map;

/// Longest key in [`ROMAJI_TABLE`].
const MAX_KEY_LEN: usize = 4;

static ROMAJI_TABLE: phf::Map<&'static str, &'static str> = phf_map! {
    "a" => "あ", "i" => "い", "u" => "う", "e" => "え", "o" => "お",

    "ka" => "か", "ki" => "き", "ku" => "く", "ke" => "け", "ko" => "こ",
    "ca" => "か", "cu" => "く", "co" => "こ", "qu" => "く",
    "kya" => "きゃ", "kyi" => "きぃ", "kyu" => "きゅ", "kye" => "きぇ", "kyo" => "きょ",
    "qa" => "くぁ", "qi" => "くぃ", "qe" => "くぇ", "qo" => "くぉ",
    "kwa" => "くぁ",

    "ga" => "が", "gi" => "ぎ", "gu" => "ぐ", "ge" => "げ", "go" => "ご",
    "gya" => "ぎゃ", "gyi" => "ぎぃ", "gyu" => "ぎゅ", "gye" => "ぎぇ", "gyo" => "ぎょ",
    "gwa" => "ぐぁ",

    "sa" => "さ", "si" => "し", "shi" => "し", "su" => "す", "se" => "せ", "so" => "そ",
    "ci" => "し", "ce" => "せ",
    "sya" => "しゃ", "syi" => "しぃ", "syu" => "しゅ", "sye" => "しぇ", "syo" => "しょ",
    "sha" => "しゃ", "shu" => "しゅ", "she" => "しぇ", "sho" => "しょ",

    "za" => "ざ", "zi" => "じ", "zu" => "ず", "ze" => "ぜ", "zo" => "ぞ",
    "ji" => "じ",
    "zya" => "じゃ", "zyi" => "じぃ", "zyu" => "じゅ", "zye" => "じぇ", "zyo" => "じょ",
    "ja" => "じゃ", "ju" => "じゅ", "je" => "じぇ", "jo" => "じょ",
    "jya" => "じゃ", "jyi" => "じぃ", "jyu" => "じゅ", "jye" => "じぇ", "jyo" => "じょ",

    "ta" => "た", "ti" => "ち", "chi" => "ち", "tu" => "つ", "tsu" => "つ", "te" => "て", "to" => "と",
    "tya" => "ちゃ", "tyi" => "ちぃ", "tyu" => "ちゅ", "tye" => "ちぇ", "tyo" => "ちょ",
    "cha" => "ちゃ", "chu" => "ちゅ", "che" => "ちぇ", "cho" => "ちょ",
    "cya" => "ちゃ", "cyi" => "ちぃ", "cyu" => "ちゅ", "cye" => "ちぇ", "cyo" => "ちょ",
    "tsa" => "つぁ", "tsi" => "つぃ", "tse" => "つぇ", "tso" => "つぉ",
    "tha" => "てゃ", "thi" => "てぃ", "thu" => "てゅ", "the" => "てぇ", "tho" => "てょ",
    "twu" => "とぅ",

    "da" => "だ", "di" => "ぢ", "du" => "づ", "de" => "で", "do" => "ど",
    "dya" => "ぢゃ", "dyi" => "ぢぃ", "dyu" => "ぢゅ", "dye" => "ぢぇ", "dyo" => "ぢょ",
    "dha" => "でゃ", "dhi" => "でぃ", "dhu" => "でゅ", "dhe" => "でぇ", "dho" => "でょ",
    "dwu" => "どぅ",

    "na" => "な", "ni" => "に", "nu" => "ぬ", "ne" => "ね", "no" => "の",
    "nya" => "にゃ", "nyi" => "にぃ", "nyu" => "にゅ", "nye" => "にぇ", "nyo" => "にょ",
    "nn" => "ん", "n'" => "ん", "xn" => "ん",

    "ha" => "は", "hi" => "ひ", "hu" => "ふ", "fu" => "ふ", "he" => "へ", "ho" => "ほ",
    "hya" => "ひゃ", "hyi" => "ひぃ", "hyu" => "ひゅ", "hye" => "ひぇ", "hyo" => "ひょ",
    "fa" => "ふぁ", "fi" => "ふぃ", "fe" => "ふぇ", "fo" => "ふぉ",
    "fya" => "ふゃ", "fyu" => "ふゅ", "fyo" => "ふょ",

    "ba" => "ば", "bi" => "び", "bu" => "ぶ", "be" => "べ", "bo" => "ぼ",
    "bya" => "びゃ", "byi" => "びぃ", "byu" => "びゅ", "bye" => "びぇ", "byo" => "びょ",

    "pa" => "ぱ", "pi" => "ぴ", "pu" => "ぷ", "pe" => "ぺ", "po" => "ぽ",
    "pya" => "ぴゃ", "pyi" => "ぴぃ", "pyu" => "ぴゅ", "pye" => "ぴぇ", "pyo" => "ぴょ",

    "va" => "ゔぁ", "vi" => "ゔぃ", "vu" => "ゔ", "ve" => "ゔぇ", "vo" => "ゔぉ",
    "vya" => "ゔゃ", "vyu" => "ゔゅ", "vyo" => "ゔょ",

    "ma" => "ま", "mi" => "み", "mu" => "む", "me" => "め", "mo" => "も",
    "mya" => "みゃ", "myi" => "みぃ", "myu" => "みゅ", "mye" => "みぇ", "myo" => "みょ",

    "ya" => "や", "yu" => "ゆ", "ye" => "いぇ", "yo" => "よ",

    "ra" => "ら", "ri" => "り", "ru" => "る", "re" => "れ", "ro" => "ろ",
    "rya" => "りゃ", "ryi" => "りぃ", "ryu" => "りゅ", "rye" => "りぇ", "ryo" => "りょ",

    "wa" => "わ", "wi" => "うぃ", "we" => "うぇ", "wo" => "を", "wha" => "うぁ", "who" => "うぉ",

    "xa" => "ぁ", "xi" => "ぃ", "xu" => "ぅ", "xe" => "ぇ", "xo" => "ぉ",
    "la" => "ぁ", "li" => "ぃ", "lu" => "ぅ", "le" => "ぇ", "lo" => "ぉ",
    "xya" => "ゃ", "xyu" => "ゅ", "xyo" => "ょ",
    "lya" => "ゃ", "lyu" => "ゅ", "lyo" => "ょ",
    "xtu" => "っ", "ltu" => "っ", "xtsu" => "っ", "ltsu" => "っ",
    "xwa" => "ゎ", "lwa" => "ゎ", "xka" => "ゕ", "xke" => "ゖ",
};

/// Result of transliterating a romaji run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transliteration {
    /// Finished kana (with untranslatable characters copied through)
    pub output: String,
    /// Incomplete tail that may still become kana
    pub pending: String,
}

impl Transliteration {
    /// Output followed by the pending tail, as shown while composing.
    pub fn display(&self) -> String {
        format!("{}{}", self.output, self.pending)
    }

    /// Output with the pending tail resolved as far as possible: a lone
    /// trailing `n` becomes ん, anything else is kept as typed.
    pub fn finish(&self) -> String {
        if self.pending.eq_ignore_ascii_case("n") {
            format!("{}ん", self.output)
        } else {
            self.display()
        }
    }
}

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'i' | 'u' | 'e' | 'o')
}

fn is_consonant(ch: char) -> bool {
    ch.is_ascii_alphabetic() && !is_vowel(ch)
}

fn is_key_prefix(rest: &str) -> bool {
    ROMAJI_TABLE
        .keys()
        .any(|key| key.len() > rest.len() && key.starts_with(rest))
}

/// Transliterate a run of romaji keys into hiragana.
///
/// Matching is case-insensitive; characters outside the table (kana typed
/// directly, the long-vowel mark, punctuation) are copied through.
pub fn transliterate(input: &str) -> Transliteration {
    let original: Vec<char> = input.chars().collect();
    let lower: Vec<char> = original.iter().map(|c| c.to_ascii_lowercase()).collect();
    let mut output = String::new();
    let mut i = 0;

    'outer: while i < lower.len() {
        let longest = MAX_KEY_LEN.min(lower.len() - i);
        for len in (1..=longest).rev() {
            let key: String = lower[i..i + len].iter().collect();
            if let Some(kana) = ROMAJI_TABLE.get(key.as_str()) {
                output.push_str(kana);
                i += len;
                continue 'outer;
            }
        }

        let ch = lower[i];
        let next = lower.get(i + 1).copied();

        if ch != 'n' && is_consonant(ch) && next == Some(ch) {
            output.push('っ');
            i += 1;
            continue;
        }

        if ch == 'n' {
            if let Some(next) = next {
                if !is_vowel(next) && next != 'y' && next != 'n' && next != '\'' {
                    output.push('ん');
                    i += 1;
                    continue;
                }
            }
        }

        let rest: String = lower[i..].iter().collect();
        if is_key_prefix(&rest) {
            return Transliteration {
                output,
                pending: original[i..].iter().collect(),
            };
        }

        output.push(original[i]);
        i += 1;
    }

    Transliteration {
        output,
        pending: String::new(),
    }
}
