//! Composing text: the editable, cursor-addressed preedit buffer.
//!
//! The buffer stores committed input units rather than rendered kana. Units
//! typed in transliterated (romaji) mode hold the raw key and are converted to
//! kana at render time, so deleting or moving the cursor works on keystrokes
//! the same way the host expects. Units typed in direct mode are rendered
//! verbatim.

use crate::config::{StyleConfig, Width};
use crate::diacritic::{self, Combination};
use crate::kana;
use crate::normalizer::{self, Normalized};
use crate::romaji;
use crate::utils;

/// Literal cursor marker used by [`ComposingText::to_hiragana_with_cursor`].
pub const CURSOR_MARKER: char = '|';

/// How an input unit was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputStyle {
    /// Literal character entry; never transliterated or combined
    Direct,
    /// Romaji key, converted to kana when rendered
    #[default]
    Transliterated,
}

impl InputStyle {
    pub fn from_direct_flag(direct: bool) -> Self {
        if direct {
            InputStyle::Direct
        } else {
            InputStyle::Transliterated
        }
    }
}

/// One committed element of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputUnit {
    pub character: char,
    pub style: InputStyle,
}

impl InputUnit {
    pub fn new(character: char, style: InputStyle) -> Self {
        Self { character, style }
    }
}

/// Ordered input units plus a cursor (`0 <= cursor <= len`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposingText {
    units: Vec<InputUnit>,
    cursor: usize,
}

impl ComposingText {
    /// Create an empty buffer with the cursor at 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn units(&self) -> &[InputUnit] {
        &self.units
    }

    pub fn last(&self) -> Option<&InputUnit> {
        self.units.last()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Cursor position in units.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Remove every unit and reset the cursor.
    pub fn clear(&mut self) {
        self.units.clear();
        self.cursor = 0;
    }

    /// Insert `unit` at the cursor and advance past it.
    pub fn insert_at_cursor(&mut self, unit: InputUnit) {
        self.units.insert(self.cursor, unit);
        self.cursor += 1;
    }

    /// Process one keystroke: normalize it, resolve diacritic marks against
    /// the buffer tail, and insert the result at the cursor.
    pub fn input(&mut self, ch: char, style: InputStyle, config: &StyleConfig) {
        match normalizer::normalize(ch, style, config) {
            Normalized::Text(text) => {
                for ch in text.chars() {
                    self.insert_at_cursor(InputUnit::new(ch, style));
                }
            }
            Normalized::Mark(mark) => {
                let combination = diacritic::combine(mark, self, config);
                self.apply_combination(combination);
            }
        }
    }

    /// Apply the combiner's decision to the buffer.
    pub fn apply_combination(&mut self, combination: Combination) {
        match combination {
            Combination::Fused(unit) => {
                if let Some(last) = self.units.last_mut() {
                    tracing::debug!(from = %last.character, to = %unit.character, "fused diacritic");
                    *last = unit;
                } else {
                    self.insert_at_cursor(unit);
                }
            }
            Combination::Standalone(glyph) => {
                self.insert_at_cursor(InputUnit::new(glyph, InputStyle::Transliterated));
            }
        }
    }

    /// Delete up to `count` units before the cursor. Returns how many were
    /// removed.
    pub fn delete_backward(&mut self, count: usize) -> usize {
        let n = count.min(self.cursor);
        self.units.drain(self.cursor - n..self.cursor);
        self.cursor -= n;
        tracing::debug!(removed = n, cursor = self.cursor, "delete backward");
        n
    }

    /// Delete up to `count` units after the cursor. Returns how many were
    /// removed.
    pub fn delete_forward(&mut self, count: usize) -> usize {
        let n = count.min(self.units.len() - self.cursor);
        self.units.drain(self.cursor..self.cursor + n);
        tracing::debug!(removed = n, cursor = self.cursor, "delete forward");
        n
    }

    /// Move the cursor by `offset`, clamped to `[0, len]`. Returns the
    /// movement actually applied.
    pub fn move_cursor(&mut self, offset: isize) -> isize {
        let current = self.cursor as isize;
        let target = current.saturating_add(offset).clamp(0, self.units.len() as isize);
        self.cursor = target as usize;
        target - current
    }

    /// Finalize the first `count` units: they are removed from the buffer and
    /// returned, the cursor shifts left with them.
    pub fn prefix_complete(&mut self, count: usize) -> Vec<InputUnit> {
        let n = count.min(self.units.len());
        let completed: Vec<InputUnit> = self.units.drain(..n).collect();
        self.cursor = self.cursor.saturating_sub(n);
        tracing::debug!(completed = n, remaining = self.units.len(), "prefix complete");
        completed
    }

    /// Hiragana as shown while composing; an unfinished romaji tail stays
    /// visible as typed.
    pub fn to_hiragana(&self) -> String {
        render(&self.units, false)
    }

    /// [`to_hiragana`](Self::to_hiragana) with [`CURSOR_MARKER`] inserted at
    /// [`hiragana_cursor`](Self::hiragana_cursor).
    pub fn to_hiragana_with_cursor(&self) -> String {
        let (before, after) = self.hiragana_around_cursor();
        format!("{}{}{}", before, CURSOR_MARKER, after)
    }

    /// `to_hiragana()` split at the cursor.
    pub fn hiragana_around_cursor(&self) -> (String, String) {
        let mut before = self.to_hiragana();
        let after = before.split_off(self.hiragana_cursor());
        (before, after)
    }

    /// Byte offset of the cursor in `to_hiragana()`.
    ///
    /// A cursor inside a romaji group (between `k` and `a` of か) has no
    /// position of its own in the rendering; it snaps back to the start of
    /// the kana the group produced.
    pub fn hiragana_cursor(&self) -> usize {
        let full = self.to_hiragana();
        (0..=self.cursor)
            .rev()
            .find_map(|split| {
                let (before, after) = self.units.split_at(split);
                let before = render(before, false);
                let joined = full.strip_prefix(before.as_str())? == render(after, false);
                joined.then_some(before.len())
            })
            .unwrap_or(0)
    }

    /// Reading handed to a conversion engine: hiragana with a trailing lone
    /// `n` resolved to ん.
    pub fn reading(&self) -> String {
        render(&self.units, true)
    }

    /// Reading of the first `count` units (clamped), rendered on their own.
    pub fn prefix_reading(&self, count: usize) -> String {
        render(&self.units[..count.min(self.units.len())], true)
    }

    /// The units as typed, without transliteration.
    pub fn raw_text(&self) -> String {
        self.units.iter().map(|u| u.character).collect()
    }

    /// Katakana rendering of the reading.
    pub fn to_katakana(&self, width: Width) -> String {
        let reading = self.reading();
        match width {
            Width::Fullwidth => kana::to_katakana(&reading),
            Width::Halfwidth => kana::to_halfwidth_katakana(&reading),
        }
    }

    /// The raw keys as Latin text, case-cycled against what is currently
    /// displayed: lowercase → Capitalized → UPPERCASE → lowercase. Anything
    /// else restarts at lowercase.
    pub fn to_alphabet(&self, width: Width, current: &str) -> String {
        let raw = self.raw_text();
        let lower = apply_width(&raw.to_lowercase(), width);
        let capitalized = apply_width(&capitalize(&raw), width);
        let upper = apply_width(&raw.to_uppercase(), width);

        if current == lower {
            capitalized
        } else if current == capitalized && capitalized != upper {
            upper
        } else {
            lower
        }
    }
}

fn apply_width(s: &str, width: Width) -> String {
    match width {
        Width::Fullwidth => utils::to_fullwidth(s),
        Width::Halfwidth => utils::to_halfwidth(s),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

fn render(units: &[InputUnit], finish: bool) -> String {
    let mut out = String::new();
    let mut run = String::new();

    let flush = |run: &mut String, out: &mut String, finish: bool| {
        if run.is_empty() {
            return;
        }
        let t = romaji::transliterate(run);
        out.push_str(&if finish { t.finish() } else { t.display() });
        run.clear();
    };

    for unit in units {
        match unit.style {
            InputStyle::Transliterated => run.push(unit.character),
            InputStyle::Direct => {
                flush(&mut run, &mut out, finish);
                out.push(unit.character);
            }
        }
    }
    flush(&mut run, &mut out, finish);
    out
}
