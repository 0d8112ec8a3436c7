// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The output of a parse.

use alloc::vec::Vec;

use crate::{Diagnostic, Glyph, TextEffectInstance};

/// Glyphs and effect instances for one piece of source text.
///
/// Filled in by the [`Parser`](crate::Parser), then only read. Nothing is ever removed except by
/// [`reset`](Self::reset); new text gets a fresh parse rather than an incremental update.
#[derive(Debug, Default)]
pub struct TextBuilder {
    glyphs: Vec<Glyph>,
    effects: Vec<TextEffectInstance>,
    diagnostics: Vec<Diagnostic>,
    source_lines: usize,
}

impl TextBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything, keeping allocations.
    pub fn reset(&mut self) {
        self.glyphs.clear();
        self.effects.clear();
        self.diagnostics.clear();
        self.source_lines = 0;
    }

    /// The glyphs, ordered by [`Glyph::global_index`].
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// The effect instances, in the order their opening tags appeared.
    pub fn effects(&self) -> &[TextEffectInstance] {
        &self.effects
    }

    /// The effect instances, mutably.
    pub fn effects_mut(&mut self) -> &mut [TextEffectInstance] {
        &mut self.effects
    }

    /// Markup problems found while parsing.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of `\n`-delimited lines in the source text. Zero before anything was parsed.
    pub fn source_line_count(&self) -> usize {
        self.source_lines
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns `true` if there are no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub(crate) fn push_glyph(&mut self, character: char, line: usize, column: usize) -> usize {
        let global_index = self.glyphs.len();
        self.glyphs.push(Glyph {
            character,
            source_line_index: line,
            source_column_index: column,
            global_index,
        });
        global_index
    }

    pub(crate) fn push_effect(&mut self, effect: TextEffectInstance) -> usize {
        self.effects.push(effect);
        self.effects.len() - 1
    }

    pub(crate) fn effect_mut(&mut self, index: usize) -> &mut TextEffectInstance {
        &mut self.effects[index]
    }

    pub(crate) fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Seal the parse: record the line count and clamp ranges that reach past the last glyph.
    pub(crate) fn finish(&mut self, source_lines: usize) {
        self.source_lines = source_lines;
        let len = self.glyphs.len();
        for effect in &mut self.effects {
            let available = len.saturating_sub(effect.glyph_start_index);
            effect.affected_glyph_count = effect.affected_glyph_count.min(available);
        }
    }
}
