// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking.

use alloc::string::String;
use alloc::vec::Vec;

use crate::{GlyphRenderInfo, TextBuilder};

/// Measures the rendered width of a string.
///
/// Must be deterministic: wrapping the same text at the same width twice has to produce the
/// same lines.
pub trait MeasureText {
    /// The width of `text` in the same unit as the wrap width.
    fn measure(&mut self, text: &str) -> f32;
}

impl<F: FnMut(&str) -> f32> MeasureText for F {
    fn measure(&mut self, text: &str) -> f32 {
        self(text)
    }
}

/// Every character is `advance` wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    /// Width of a single character.
    pub advance: f32,
}

impl MonospaceMeasure {
    /// Create a measure where every character is `advance` wide.
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl MeasureText for MonospaceMeasure {
    fn measure(&mut self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }
}

/// Assigns glyphs to render lines.
///
/// Source lines always start a new render line. Within a source line, glyphs are added until
/// the measured width exceeds the limit, then the line is broken after its last whitespace, or
/// right before the overflowing glyph when there is no whitespace to break at.
///
/// Whitespace at a soft break is trimmed: it stays in the glyph sequence (effects keep covering
/// it) but is flagged [`ignore_for_render`](GlyphRenderInfo::ignore_for_render) and takes up no
/// column. The whole run, on either side of the break, is parked at the end of the line before
/// the break.
#[derive(Debug, Default)]
pub struct LineWrapper {
    /// Glyph indices of the line currently being built.
    line: Vec<usize>,
    /// The characters of `line`, for measuring.
    text: String,
    line_index: usize,
    /// A soft break left nothing over; the next placed glyph opens a new line.
    pending_break: bool,
    /// Column trimmed whitespace at the current break is parked at.
    break_column: usize,
    line_count: usize,
}

impl LineWrapper {
    /// Create a wrapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of render lines produced by the last pass.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Recompute `wrapped_line_index`, `wrapped_column_index` and `ignore_for_render` for every
    /// info.
    ///
    /// A non-positive or NaN `max_width` disables wrapping; each source line then becomes one
    /// render line. Blank source lines, trailing ones included, become empty render lines.
    /// Nothing but those three fields is touched.
    ///
    /// # Panics
    ///
    /// If `text` and `infos` have different lengths.
    pub fn wrap(
        &mut self,
        text: &TextBuilder,
        infos: &mut [GlyphRenderInfo],
        max_width: f32,
        measure: &mut impl MeasureText,
    ) {
        let glyphs = text.glyphs();
        assert_eq!(
            glyphs.len(),
            infos.len(),
            "every glyph needs exactly one render info"
        );
        let limit = if max_width > 0.0 { Some(max_width) } else { None };

        for info in infos.iter_mut() {
            info.park(0, 0);
        }
        self.line.clear();
        self.text.clear();
        self.line_index = 0;
        self.pending_break = false;
        self.break_column = 0;

        let mut source_line = 0;
        let mut soft_broken = false;
        for glyph in glyphs {
            if glyph.source_line_index != source_line {
                self.commit(infos);
                self.pending_break = false;
                self.line_index += glyph.source_line_index - source_line;
                source_line = glyph.source_line_index;
                soft_broken = false;
            }

            let index = glyph.global_index;
            if soft_broken && self.line.is_empty() && infos[index].is_whitespace {
                infos[index].park(self.line_index, self.break_column);
                continue;
            }
            if self.pending_break {
                self.pending_break = false;
                self.line_index += 1;
            }
            self.line.push(index);
            self.text.push(glyph.character);

            let Some(limit) = limit else {
                continue;
            };
            while self.line.len() > 1 && measure.measure(&self.text) > limit {
                self.break_line(infos);
                soft_broken = true;
            }
        }
        self.commit(infos);

        self.line_count = if glyphs.is_empty() {
            0
        } else {
            let trailing = text
                .source_line_count()
                .saturating_sub(source_line + 1);
            self.line_index + 1 + trailing
        };
        log::debug!(
            "wrapped {} glyphs into {} lines at width {max_width}",
            glyphs.len(),
            self.line_count
        );
    }

    /// Break the overflowing line, keeping the glyphs after the break for the next line.
    ///
    /// When nothing is left over, the next render line is only opened once a glyph lands on it.
    fn break_line(&mut self, infos: &mut [GlyphRenderInfo]) {
        let remainder = match self.line.iter().rposition(|&g| infos[g].is_whitespace) {
            Some(space) => {
                let mut keep = space;
                while keep > 0 && infos[self.line[keep - 1]].is_whitespace {
                    keep -= 1;
                }
                for &g in &self.line[keep..=space] {
                    infos[g].park(self.line_index, keep);
                }
                self.break_column = keep;
                let remainder = self.line.split_off(space + 1);
                self.line.truncate(keep);
                remainder
            }
            None => self.line.split_off(self.line.len() - 1),
        };

        if self.line.is_empty() {
            // Only whitespace before the break; no line to finish.
            self.line = remainder;
        } else {
            self.commit(infos);
            if remainder.is_empty() {
                self.pending_break = true;
            } else {
                self.line_index += 1;
            }
            self.line = remainder;
        }
        self.text.clear();
        self.text
            .extend(self.line.iter().map(|&g| infos[g].character));
    }

    /// Place every glyph of the current line and start an empty one.
    fn commit(&mut self, infos: &mut [GlyphRenderInfo]) {
        for (column, &g) in self.line.iter().enumerate() {
            infos[g].place(self.line_index, column);
        }
        self.line.clear();
        self.text.clear();
    }
}
