// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The effects behind the built-in tags.

#[cfg(feature = "libm")]
#[allow(unused_imports)]
use core_maths::CoreFloat;

use peniko::Color;
use peniko::color::{Srgb, parse_color};

use crate::{Attributes, GlyphRenderInfo, TextEffect};

/// `<bold>`: flags glyphs as bold.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bold;

impl TextEffect for Bold {
    fn initialize(&mut self, info: &mut GlyphRenderInfo) {
        info.bold = true;
    }
}

/// `<italic>`: flags glyphs as italic.
#[derive(Debug, Clone, Copy, Default)]
pub struct Italic;

impl TextEffect for Italic {
    fn initialize(&mut self, info: &mut GlyphRenderInfo) {
        info.italic = true;
    }
}

/// `<color=red>` or `<color value="#ff8800">`: overrides the glyph color.
///
/// Accepts anything CSS accepts as a color. A color that doesn't parse leaves the glyphs alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorEffect {
    color: Option<Color>,
}

impl ColorEffect {
    /// Build the effect from tag attributes.
    pub fn from_attributes(attributes: &Attributes) -> Self {
        let source = attributes
            .value()
            .or_else(|| attributes.get("value"))
            .or_else(|| attributes.get("color"));
        let color = source.and_then(|source| match parse_color(source.trim()) {
            Ok(color) => Some(color.to_alpha_color::<Srgb>()),
            Err(_) => {
                log::debug!("ignoring unparseable color {source:?}");
                None
            }
        });
        Self { color }
    }

    /// The parsed color, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }
}

impl TextEffect for ColorEffect {
    fn initialize(&mut self, info: &mut GlyphRenderInfo) {
        if let Some(color) = self.color {
            info.color = Some(color);
        }
    }
}

/// `<wave>`: bobs glyphs up and down along a sine wave.
#[derive(Debug, Clone, Copy)]
pub struct Wave {
    /// Peak offset in pixels.
    pub amplitude: f32,
    /// Angular speed in radians per second.
    pub frequency: f32,
    /// Phase step between neighbouring glyphs, in radians.
    pub phase: f32,
}

impl Default for Wave {
    fn default() -> Self {
        Self {
            amplitude: 4.0,
            frequency: 8.0,
            phase: 0.5,
        }
    }
}

impl Wave {
    /// Build the effect from tag attributes, falling back to the defaults.
    pub fn from_attributes(attributes: &Attributes) -> Self {
        let default = Self::default();
        Self {
            amplitude: attributes
                .get_f32("amplitude")
                .or_else(|| attributes.get_f32(""))
                .unwrap_or(default.amplitude),
            frequency: attributes
                .get_f32("frequency")
                .unwrap_or(default.frequency),
            phase: attributes.get_f32("phase").unwrap_or(default.phase),
        }
    }
}

impl TextEffect for Wave {
    fn update(&mut self, time: f64, info: &mut GlyphRenderInfo) {
        let angle =
            time * f64::from(self.frequency) + info.glyph_index() as f64 * f64::from(self.phase);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Offsets are f32 like the rest of the render info; sin is in [-1, 1]."
        )]
        let wave = angle.sin() as f32;
        info.offset_y += self.amplitude * wave;
    }
}

/// `<pause=0.5/>`: holds the typewriter before the next glyph appears.
#[derive(Debug, Clone, Copy)]
pub struct Pause {
    /// Hold time in seconds.
    pub seconds: f64,
}

impl Default for Pause {
    fn default() -> Self {
        Self { seconds: 0.5 }
    }
}

impl Pause {
    /// Build the effect from tag attributes, falling back to the default hold.
    pub fn from_attributes(attributes: &Attributes) -> Self {
        let seconds = attributes
            .get_f32("")
            .or_else(|| attributes.get_f32("seconds"))
            .map_or(Self::default().seconds, f64::from);
        Self {
            seconds: seconds.max(0.0),
        }
    }
}

impl TextEffect for Pause {
    fn reveal_delay(&mut self, _info: &GlyphRenderInfo) -> f64 {
        self.seconds
    }
}
