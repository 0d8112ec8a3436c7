// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text effects and the glyph ranges they apply to.

mod attributes;
mod builtin;

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt::Debug;
use core::ops::Range;

use crate::GlyphRenderInfo;

pub use attributes::Attributes;
pub use builtin::{Bold, ColorEffect, Italic, Pause, Wave};

/// A pluggable effect attached to a range of glyphs.
///
/// Every hook has a no-op default so an effect only implements what it needs. The
/// [`Typewriter`](crate::Typewriter) calls them in a fixed order:
///
/// 1. [`initialize`](Self::initialize) once for every glyph in range when the text is built.
/// 2. [`reveal_delay`](Self::reveal_delay) right before a glyph in range is revealed.
/// 3. [`on_character_appear`](Self::on_character_appear) when a glyph in range is revealed.
/// 4. [`prepare_for_new_effect`](Self::prepare_for_new_effect) in the first frame update after
///    a glyph was revealed (and is not dropped by the wrapper).
/// 5. [`update`](Self::update) every frame for every revealed, drawable glyph in range.
pub trait TextEffect: Debug {
    /// Called once per glyph in range when the text is built.
    fn initialize(&mut self, info: &mut GlyphRenderInfo) {
        let _ = info;
    }

    /// Called once the first time a glyph in range shows up on screen.
    fn prepare_for_new_effect(&mut self, info: &mut GlyphRenderInfo) {
        let _ = info;
    }

    /// Called when a glyph in range is revealed by the typewriter.
    fn on_character_appear(&mut self, info: &mut GlyphRenderInfo) {
        let _ = info;
    }

    /// Called every frame for every revealed, drawable glyph in range.
    ///
    /// `time` is the typewriter clock in seconds.
    fn update(&mut self, time: f64, info: &mut GlyphRenderInfo) {
        let _ = (time, info);
    }

    /// Seconds to hold the typewriter before the glyph is revealed.
    ///
    /// Asked at most once per glyph and playback.
    fn reveal_delay(&mut self, info: &GlyphRenderInfo) -> f64 {
        let _ = info;
        0.0
    }
}

/// An effect activated by a tag in the source text.
#[derive(Debug)]
pub struct TextEffectInstance {
    pub(crate) tag_name: String,
    pub(crate) attributes: Attributes,
    pub(crate) glyph_start_index: usize,
    pub(crate) affected_glyph_count: usize,
    pub(crate) effect: Box<dyn TextEffect>,
}

impl TextEffectInstance {
    pub(crate) fn new(
        tag_name: String,
        attributes: Attributes,
        glyph_start_index: usize,
        effect: Box<dyn TextEffect>,
    ) -> Self {
        Self {
            tag_name,
            attributes,
            glyph_start_index,
            affected_glyph_count: 0,
            effect,
        }
    }

    /// The tag name, lower-cased.
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// The attributes the tag was written with.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Global index of the first affected glyph.
    pub fn glyph_start_index(&self) -> usize {
        self.glyph_start_index
    }

    /// Number of affected glyphs.
    pub fn affected_glyph_count(&self) -> usize {
        self.affected_glyph_count
    }

    /// The half-open range of global glyph indices this effect applies to.
    pub fn glyph_range(&self) -> Range<usize> {
        self.glyph_start_index..self.glyph_start_index + self.affected_glyph_count
    }

    /// Whether the glyph at `index` is in range.
    pub fn contains(&self, index: usize) -> bool {
        self.glyph_range().contains(&index)
    }

    /// The effect implementation.
    pub fn effect(&self) -> &dyn TextEffect {
        &*self.effect
    }

    /// The effect implementation, mutably.
    pub fn effect_mut(&mut self) -> &mut dyn TextEffect {
        &mut *self.effect
    }
}
