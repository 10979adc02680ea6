//! Reading → word lexicon for the reference dictionary engine.
//!
//! A plain in-memory map from a hiragana reading to the words written with
//! it. Files are JSON or TOML objects keyed by reading:
//!
//! ```json
//! { "かな": [{ "text": "仮名", "freq": 10 }, { "text": "カナ", "freq": 3 }] }
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A single word entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub text: String,
    /// Higher means more frequent.
    #[serde(default)]
    pub freq: u64,
}

impl WordEntry {
    pub fn new<T: Into<String>>(text: T, freq: u64) -> Self {
        Self {
            text: text.into(),
            freq,
        }
    }
}

/// In-memory lexicon mapping a reading to its words.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lexicon {
    map: HashMap<String, Vec<WordEntry>>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a word for a reading.
    ///
    /// If the word already exists for the reading its frequency is increased
    /// by `freq`, otherwise it is added.
    pub fn insert<K: Into<String>, T: Into<String>>(&mut self, reading: K, word: T, freq: u64) {
        let word = word.into();
        let bucket = self.map.entry(reading.into()).or_default();
        if let Some(e) = bucket.iter_mut().find(|e| e.text == word) {
            e.freq = e.freq.saturating_add(freq);
        } else {
            bucket.push(WordEntry::new(word, freq));
        }
    }

    /// Words for `reading`, most frequent first.
    pub fn lookup(&self, reading: &str) -> Vec<WordEntry> {
        let mut entries = self.map.get(reading).cloned().unwrap_or_default();
        entries.sort_by(|a, b| b.freq.cmp(&a.freq));
        entries
    }

    pub fn contains(&self, reading: &str) -> bool {
        self.map.get(reading).is_some_and(|v| !v.is_empty())
    }

    /// Entries whose reading is strictly longer than `prefix` and starts
    /// with it, most frequent first. Ties are broken by reading.
    pub fn predict(&self, prefix: &str) -> Vec<(String, WordEntry)> {
        let mut out: Vec<(String, WordEntry)> = self
            .map
            .iter()
            .filter(|(reading, _)| reading.len() > prefix.len() && reading.starts_with(prefix))
            .flat_map(|(reading, words)| words.iter().map(move |w| (reading.clone(), w.clone())))
            .collect();
        out.sort_by(|a, b| b.1.freq.cmp(&a.1.freq).then_with(|| a.0.cmp(&b.0)));
        out
    }

    /// Length in characters of the longest reading.
    pub fn max_reading_len(&self) -> usize {
        self.map.keys().map(|k| k.chars().count()).max().unwrap_or(0)
    }

    /// Remove a word for a reading. Returns true if removed.
    pub fn remove_word(&mut self, reading: &str, word: &str) -> bool {
        if let Some(bucket) = self.map.get_mut(reading) {
            let before = bucket.len();
            bucket.retain(|e| e.text != word);
            return bucket.len() != before;
        }
        false
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a lexicon file; the format is picked from the extension
    /// (`.json` or `.toml`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read lexicon {}", path.display()))?;
        let lexicon = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => bail!("unsupported lexicon format: {}", path.display()),
        }
        .with_context(|| format!("parse lexicon {}", path.display()))?;
        tracing::info!(path = %path.display(), readings = lexicon.len(), "loaded lexicon");
        Ok(lexicon)
    }

    /// Save as pretty JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("write lexicon {}", path.display()))?;
        Ok(())
    }

    /// Small built-in lexicon for demos and smoke tests.
    pub fn load_demo() -> Self {
        let mut lx = Self::new();
        for (reading, word, freq) in DEMO_ENTRIES {
            lx.insert(*reading, *word, *freq);
        }
        lx
    }
}

#[rustfmt::skip]
const DEMO_ENTRIES: &[(&str, &str, u64)] = &[
    ("きょう", "今日", 30), ("きょう", "京", 8), ("きょう", "強", 5),
    ("は", "は", 40), ("は", "葉", 6), ("は", "歯", 5),
    ("いい", "いい", 20), ("いい", "良い", 12),
    ("てんき", "天気", 25), ("てんき", "転機", 4),
    ("にほん", "日本", 30), ("にほん", "二本", 5),
    ("にほんご", "日本語", 20),
    ("かな", "仮名", 10), ("かな", "かな", 6),
    ("かんじ", "漢字", 20), ("かんじ", "感じ", 18), ("かんじ", "幹事", 4),
    ("へんかん", "変換", 15),
    ("にゅうりょく", "入力", 15),
    ("ひらがな", "平仮名", 10),
    ("かたかな", "片仮名", 10),
    ("わたし", "私", 30),
    ("がっこう", "学校", 20),
    ("こうこう", "高校", 15), ("こうこう", "孝行", 5),
    ("とうきょう", "東京", 25),
    ("きょうと", "京都", 20),
    ("ねこ", "猫", 15),
    ("いぬ", "犬", 15),
    ("です", "です", 30),
    ("の", "の", 40),
];
