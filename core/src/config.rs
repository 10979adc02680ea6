//! Style configuration for keystroke normalization and conversion requests.
//!
//! A `StyleConfig` is created once per input session. It records the display
//! conventions the user picked (digit/symbol/space width, punctuation style,
//! how standalone diacritics are rendered) and the optional neural-assist
//! parameters forwarded to the conversion engine.
//!
//! Only `neural.left_context` changes after construction; it is overwritten
//! from the surrounding text reported by the host (see
//! [`StyleConfig::set_left_context`]). Mutation needs `&mut StyleConfig`, so a
//! configuration can never change underneath an in-flight candidate request.
//!
//! # Example
//!
//! ```rust
//! use libkana_core::{PunctuationStyle, StyleConfig, Width};
//!
//! let config = StyleConfig::from_toml_str(
//!     "digit_width = \"halfwidth\"\nperiod_style = \"fullwidth_latin\"\n",
//! ).unwrap();
//! assert_eq!(config.digit_width, Width::Halfwidth);
//! assert_eq!(config.period_style, PunctuationStyle::FullwidthLatin);
//! // Unspecified fields keep their defaults.
//! assert_eq!(config.symbol_width, Width::Fullwidth);
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::converter::{ConvertOptions, NeuralMode, DEFAULT_N_BEST};

/// Display width of digits, symbols and spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Width {
    #[default]
    Fullwidth,
    Halfwidth,
}

impl Width {
    /// Settings store widths as an integer flag where `1` means fullwidth.
    pub fn from_fullwidth_flag(flag: i32) -> Self {
        if flag == 1 {
            Width::Fullwidth
        } else {
            Width::Halfwidth
        }
    }
}

/// Glyph family used for the period and comma keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunctuationStyle {
    /// 。 and 、
    #[default]
    FullwidthJapanese,
    /// ｡ and ､
    HalfwidthJapanese,
    /// ． and ，
    FullwidthLatin,
    /// ､ for both keys
    HalfwidthLatin,
}

impl PunctuationStyle {
    /// Map a settings index to a style. Unknown indices fall back to
    /// `FullwidthJapanese`.
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => PunctuationStyle::HalfwidthJapanese,
            2 => PunctuationStyle::FullwidthLatin,
            3 => PunctuationStyle::HalfwidthLatin,
            _ => PunctuationStyle::FullwidthJapanese,
        }
    }

    /// Glyph committed for the period key.
    ///
    /// `HalfwidthLatin` commits the halfwidth ideographic comma here too.
    pub fn period(self) -> char {
        match self {
            PunctuationStyle::FullwidthJapanese => '。',
            PunctuationStyle::HalfwidthJapanese => '｡',
            PunctuationStyle::FullwidthLatin => '．',
            PunctuationStyle::HalfwidthLatin => '､',
        }
    }

    /// Glyph committed for the comma key.
    ///
    /// Both halfwidth styles share the halfwidth ideographic comma.
    pub fn comma(self) -> char {
        match self {
            PunctuationStyle::FullwidthJapanese => '、',
            PunctuationStyle::HalfwidthJapanese => '､',
            PunctuationStyle::FullwidthLatin => '，',
            PunctuationStyle::HalfwidthLatin => '､',
        }
    }
}

/// How a dakuten/handakuten that cannot be fused is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiacriticStyle {
    /// Spacing modifier letters ゛ ゜
    #[default]
    Fullwidth,
    /// Halfwidth forms ﾞ ﾟ
    Halfwidth,
    /// Zero-width combining marks U+3099 U+309A
    Combining,
}

impl DiacriticStyle {
    /// Map a settings index to a style. Unknown indices fall back to
    /// `Fullwidth`.
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => DiacriticStyle::Halfwidth,
            2 => DiacriticStyle::Combining,
            _ => DiacriticStyle::Fullwidth,
        }
    }
}

/// Optional language-model assisted conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeuralAssist {
    pub enabled: bool,
    /// Upper bound on model evaluations per conversion request
    pub inference_limit: usize,
    /// Model weight file handed to the engine (engine default when absent)
    pub weight: Option<PathBuf>,
    /// Number of layers offloaded to an accelerator
    pub accelerator_layers: i32,
    /// Free-form user profile text given to the model as a prompt
    pub profile_text: Option<String>,
    /// Text left of the caret, refreshed from the host's surrounding text
    #[serde(skip)]
    pub left_context: Option<String>,
}

impl Default for NeuralAssist {
    fn default() -> Self {
        Self {
            enabled: false,
            inference_limit: 1,
            weight: None,
            accelerator_layers: 0,
            profile_text: None,
            left_context: None,
        }
    }
}

/// Per-session display conventions plus neural-assist options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub digit_width: Width,
    pub symbol_width: Width,
    pub space_width: Width,
    pub period_style: PunctuationStyle,
    pub comma_style: PunctuationStyle,
    pub diacritic_style: DiacriticStyle,
    pub neural: NeuralAssist,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            digit_width: Width::Fullwidth,
            symbol_width: Width::Fullwidth,
            space_width: Width::Fullwidth,
            period_style: PunctuationStyle::FullwidthJapanese,
            comma_style: PunctuationStyle::FullwidthJapanese,
            diacritic_style: DiacriticStyle::Fullwidth,
            neural: NeuralAssist::default(),
        }
    }
}

impl StyleConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read style config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("parse style config {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded style config");
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content)
            .with_context(|| format!("write style config {}", path.display()))?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Whether neural assist is on.
    pub fn neural_enabled(&self) -> bool {
        self.neural.enabled
    }

    /// Replace the left context with the part of `surrounding` before
    /// `anchor` (a character offset, clamped to the text length).
    ///
    /// Does nothing when neural assist is off. `None` clears the context.
    pub fn set_left_context(&mut self, surrounding: Option<&str>, anchor: usize) {
        if !self.neural.enabled {
            return;
        }
        self.neural.left_context = surrounding.map(|text| text.chars().take(anchor).collect());
        tracing::trace!(left_context = ?self.neural.left_context, "left context updated");
    }

    /// Glyph for a space typed outside of composition.
    pub fn space(&self) -> char {
        match self.space_width {
            Width::Fullwidth => '\u{3000}',
            Width::Halfwidth => ' ',
        }
    }

    /// Conversion options derived from this configuration.
    pub fn convert_options(&self) -> ConvertOptions {
        let neural = self.neural.enabled.then(|| NeuralMode {
            weight: self.neural.weight.clone(),
            inference_limit: self.neural.inference_limit,
            accelerator_layers: self.neural.accelerator_layers,
            profile: self.neural.profile_text.clone(),
            left_context: self.neural.left_context.clone(),
        });
        ConvertOptions {
            n_best: DEFAULT_N_BEST,
            japanese_prediction: false,
            english_prediction: false,
            digit_width: self.digit_width,
            symbol_width: self.symbol_width,
            neural,
        }
    }
}

/// Index-based options as stored by the settings application.
///
/// Width flags use `1` for fullwidth; style indices follow the order of the
/// enum variants. Out-of-range values fall back to the defaults documented on
/// each `from_*` constructor. The all-zero `Default` therefore maps to
/// halfwidth digits, symbols and space, unlike `StyleConfig::default()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    pub number_fullwidth: i32,
    pub symbol_fullwidth: i32,
    pub space_fullwidth: i32,
    pub period_style_index: i32,
    pub comma_style_index: i32,
    pub diacritic_style_index: i32,
    pub neural_enabled: bool,
    pub neural_inference_limit: usize,
    pub accelerator_layers: i32,
    pub profile_text: Option<String>,
}

impl From<StyleOptions> for StyleConfig {
    fn from(options: StyleOptions) -> Self {
        Self {
            digit_width: Width::from_fullwidth_flag(options.number_fullwidth),
            symbol_width: Width::from_fullwidth_flag(options.symbol_fullwidth),
            space_width: Width::from_fullwidth_flag(options.space_fullwidth),
            period_style: PunctuationStyle::from_index(options.period_style_index),
            comma_style: PunctuationStyle::from_index(options.comma_style_index),
            diacritic_style: DiacriticStyle::from_index(options.diacritic_style_index),
            neural: NeuralAssist {
                enabled: options.neural_enabled,
                inference_limit: options.neural_inference_limit.max(1),
                weight: None,
                accelerator_layers: options.accelerator_layers,
                profile_text: options.profile_text,
                left_context: None,
            },
        }
    }
}
