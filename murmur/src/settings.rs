// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-facing configuration.

/// How the typewriter plays new text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypewriterSettings {
    /// Reveal rate. Zero, negative and NaN values are ignored when applied.
    pub characters_per_second: f64,
    /// Start playing as soon as new text is set.
    pub auto_play: bool,
}

impl Default for TypewriterSettings {
    fn default() -> Self {
        Self {
            characters_per_second: 30.0,
            auto_play: true,
        }
    }
}

/// How text is broken into lines.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WrapSettings {
    /// Available width. `None`, zero, negative and NaN all mean "don't wrap".
    pub max_width: Option<f32>,
}

impl WrapSettings {
    /// The width to hand to the wrapper; non-positive means no wrapping.
    pub(crate) fn effective_width(&self) -> f32 {
        match self.max_width {
            Some(width) if width > 0.0 => width,
            _ => 0.0,
        }
    }
}
