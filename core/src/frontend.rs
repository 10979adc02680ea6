//! Handle-based front end for input method hosts.
//!
//! `Frontend` owns the style configurations and composing buffers a host
//! creates and exposes every operation through handles. Nothing here returns
//! an error: an invalid handle or unusable input gives a neutral value
//! (`None`, `0`, or no change) and a log line.

use unicode_normalization::UnicodeNormalization;

use crate::candidate::CandidateList;
use crate::composing::{ComposingText, InputStyle, InputUnit};
use crate::config::{StyleConfig, StyleOptions, Width};
use crate::converter::ConversionEngine;
use crate::orchestrator::{self, CandidateRequest};
use crate::registry::{Handle, Registry};

pub type ConfigHandle = Handle<StyleConfig>;
pub type BufferHandle = Handle<ComposingText>;

/// Configuration and buffer registries plus the conversion engine.
pub struct Frontend<E> {
    engine: E,
    configs: Registry<StyleConfig>,
    buffers: Registry<ComposingText>,
}

impl<E: ConversionEngine> Frontend<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            configs: Registry::new(),
            buffers: Registry::new(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    // ========== Configuration ==========

    /// Create a configuration from settings-style options.
    pub fn create_config(&mut self, options: StyleOptions) -> ConfigHandle {
        self.add_config(StyleConfig::from(options))
    }

    /// Register an already built configuration.
    ///
    /// With neural assist on, the engine is warmed with a one-character
    /// composition so the first real request does not pay the load cost.
    pub fn add_config(&mut self, config: StyleConfig) -> ConfigHandle {
        if config.neural_enabled() {
            self.warm_up(&config);
        }
        self.configs.insert(config)
    }

    fn warm_up(&self, config: &StyleConfig) {
        let mut probe = ComposingText::new();
        probe.insert_at_cursor(InputUnit::new('a', InputStyle::Direct));
        match self.engine.convert(&probe, &config.convert_options()) {
            Ok(_) => tracing::info!("conversion engine warmed up"),
            Err(err) => tracing::warn!(error = %err, "engine warm-up failed"),
        }
    }

    pub fn config(&self, handle: ConfigHandle) -> Option<&StyleConfig> {
        self.configs.get(handle)
    }

    /// Drop a configuration. Returns whether the handle was live.
    pub fn destroy_config(&mut self, handle: ConfigHandle) -> bool {
        self.configs.remove(handle).is_some()
    }

    /// Refresh the neural-assist left context from the host's surrounding
    /// text. No-op for an invalid handle or when neural assist is off.
    pub fn set_left_context(&mut self, handle: ConfigHandle, surrounding: Option<&str>, anchor: usize) {
        match self.configs.get_mut(handle) {
            Some(config) => config.set_left_context(surrounding, anchor),
            None => tracing::warn!(?handle, "set_left_context: invalid config handle"),
        }
    }

    // ========== Buffers ==========

    /// Create an empty composing buffer.
    pub fn create_buffer(&mut self) -> BufferHandle {
        self.buffers.insert(ComposingText::new())
    }

    pub fn destroy_buffer(&mut self, handle: BufferHandle) -> bool {
        self.buffers.remove(handle).is_some()
    }

    pub fn buffer(&self, handle: BufferHandle) -> Option<&ComposingText> {
        self.buffers.get(handle)
    }

    /// Resolve an optional configuration handle. `None` means the default
    /// style; a stale handle resolves to nothing.
    fn resolve_config(&self, handle: Option<ConfigHandle>) -> Option<StyleConfig> {
        match handle {
            None => Some(StyleConfig::default()),
            Some(handle) => {
                let config = self.configs.get(handle).cloned();
                if config.is_none() {
                    tracing::warn!(?handle, "invalid config handle");
                }
                config
            }
        }
    }

    /// Feed one keystroke. Only the first scalar of `text` is used; absent
    /// or empty text is ignored. Transliterated keys are NFC-composed first,
    /// direct keys are taken as is.
    pub fn input_text(
        &mut self,
        buffer: BufferHandle,
        config: Option<ConfigHandle>,
        text: Option<&str>,
        direct: bool,
    ) {
        let first = |t: &str| {
            if direct {
                t.chars().next()
            } else {
                t.nfc().next()
            }
        };
        let Some(ch) = text.and_then(first) else {
            tracing::trace!("input_text: no character");
            return;
        };
        let Some(config) = self.resolve_config(config) else {
            return;
        };
        match self.buffers.get_mut(buffer) {
            Some(composing) => composing.input(ch, InputStyle::from_direct_flag(direct), &config),
            None => tracing::warn!(?buffer, "input_text: invalid buffer handle"),
        }
    }

    pub fn delete_backward(&mut self, buffer: BufferHandle, count: usize) -> usize {
        self.buffers
            .get_mut(buffer)
            .map_or(0, |composing| composing.delete_backward(count))
    }

    pub fn delete_forward(&mut self, buffer: BufferHandle, count: usize) -> usize {
        self.buffers
            .get_mut(buffer)
            .map_or(0, |composing| composing.delete_forward(count))
    }

    /// Move the cursor; returns the clamped movement (0 for an invalid
    /// handle).
    pub fn move_cursor(&mut self, buffer: BufferHandle, offset: isize) -> isize {
        self.buffers
            .get_mut(buffer)
            .map_or(0, |composing| composing.move_cursor(offset))
    }

    pub fn complete_prefix(&mut self, buffer: BufferHandle, count: usize) {
        if let Some(composing) = self.buffers.get_mut(buffer) {
            composing.prefix_complete(count);
        }
    }

    // ========== Rendering ==========

    pub fn hiragana(&self, buffer: BufferHandle) -> Option<String> {
        self.buffers.get(buffer).map(ComposingText::to_hiragana)
    }

    pub fn hiragana_with_cursor(&self, buffer: BufferHandle) -> Option<String> {
        self.buffers
            .get(buffer)
            .map(ComposingText::to_hiragana_with_cursor)
    }

    pub fn katakana(&self, buffer: BufferHandle, width: Width) -> Option<String> {
        self.buffers.get(buffer).map(|c| c.to_katakana(width))
    }

    /// Alphabet rendering case-cycled against `current`; `None` when the
    /// handle is invalid or no current display string was given.
    pub fn alphabet(&self, buffer: BufferHandle, width: Width, current: Option<&str>) -> Option<String> {
        let current = current?;
        self.buffers
            .get(buffer)
            .map(|c| c.to_alphabet(width, current))
    }

    // ========== Candidates ==========

    /// Request candidates for a buffer. `None` for an invalid handle or an
    /// empty buffer.
    pub fn candidates(
        &self,
        buffer: BufferHandle,
        config: Option<ConfigHandle>,
        predictive: Option<bool>,
        n_best: Option<usize>,
    ) -> Option<CandidateList> {
        let composing = self.buffers.get(buffer)?;
        let config = self.resolve_config(config)?;
        orchestrator::request_candidates(
            composing,
            &self.engine,
            &config,
            CandidateRequest::new(predictive, n_best),
        )
    }
}
