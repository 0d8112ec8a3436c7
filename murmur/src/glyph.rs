// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

/// One non-newline character of the source text.
///
/// All indices are assigned by the parser and never change afterwards. Effects are defined
/// against [`Glyph::global_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// The character itself.
    pub character: char,
    /// Index of the `\n`-delimited source line, starting at 0.
    pub source_line_index: usize,
    /// Index of the character within its source line.
    pub source_column_index: usize,
    /// Index of the glyph within the whole glyph sequence.
    pub global_index: usize,
}

/// Mutable per-glyph render and reveal state.
///
/// There is exactly one of these for every [`Glyph`], at the same position. They are kept in an
/// arena owned by [`DialogueText`](crate::DialogueText) and recycled when the text changes, so
/// reveal state survives re-wrapping.
#[derive(Debug, Clone)]
pub struct GlyphRenderInfo {
    pub(crate) glyph_index: usize,
    pub(crate) character: char,
    pub(crate) is_visible: bool,
    pub(crate) is_whitespace: bool,
    pub(crate) is_newly_revealed: bool,
    pub(crate) ignore_for_render: bool,
    pub(crate) wrapped_line_index: usize,
    pub(crate) wrapped_column_index: usize,

    /// Horizontal offset written by effects, reset to zero at the start of every frame.
    pub offset_x: f32,
    /// Vertical offset written by effects, reset to zero at the start of every frame.
    pub offset_y: f32,
    /// Color override set by an effect.
    pub color: Option<Color>,
    /// Set by the `bold` effect.
    pub bold: bool,
    /// Set by the `italic` effect.
    pub italic: bool,
}

impl Default for GlyphRenderInfo {
    fn default() -> Self {
        Self {
            glyph_index: 0,
            character: ' ',
            is_visible: false,
            is_whitespace: true,
            is_newly_revealed: false,
            ignore_for_render: true,
            wrapped_line_index: 0,
            wrapped_column_index: 0,
            offset_x: 0.0,
            offset_y: 0.0,
            color: None,
            bold: false,
            italic: false,
        }
    }
}

impl GlyphRenderInfo {
    /// Point this info at `glyph` and clear everything left over from previous text.
    pub(crate) fn recycle(&mut self, glyph: &Glyph) {
        *self = Self {
            glyph_index: glyph.global_index,
            character: glyph.character,
            is_whitespace: glyph.character.is_whitespace(),
            ..Self::default()
        };
    }

    /// The [`Glyph::global_index`] of the glyph this info belongs to.
    pub fn glyph_index(&self) -> usize {
        self.glyph_index
    }

    /// The character of the glyph this info belongs to.
    pub fn character(&self) -> char {
        self.character
    }

    /// Whether the glyph has been revealed.
    ///
    /// This latches: only a reset of the typewriter turns it off again.
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// Whether the glyph is a whitespace character.
    pub fn is_whitespace(&self) -> bool {
        self.is_whitespace
    }

    /// True for the frame in which the glyph was first revealed, until its effects have been
    /// prepared.
    pub fn is_newly_revealed(&self) -> bool {
        self.is_newly_revealed
    }

    /// Whether the last wrap pass dropped this glyph from the line layout.
    ///
    /// Trimmed whitespace around soft line breaks is kept in the glyph sequence (effects still
    /// cover it) but takes up no room on screen.
    pub fn ignore_for_render(&self) -> bool {
        self.ignore_for_render
    }

    /// The render line assigned by the last wrap pass.
    pub fn wrapped_line_index(&self) -> usize {
        self.wrapped_line_index
    }

    /// The column within the render line assigned by the last wrap pass.
    pub fn wrapped_column_index(&self) -> usize {
        self.wrapped_column_index
    }

    /// Visible and not dropped by the wrapper.
    pub fn is_drawable(&self) -> bool {
        self.is_visible && !self.ignore_for_render
    }

    pub(crate) fn place(&mut self, line: usize, column: usize) {
        self.ignore_for_render = false;
        self.wrapped_line_index = line;
        self.wrapped_column_index = column;
    }

    pub(crate) fn park(&mut self, line: usize, column: usize) {
        self.ignore_for_render = true;
        self.wrapped_line_index = line;
        self.wrapped_column_index = column;
    }
}

#[cfg(test)]
mod tests {
    use super::{Glyph, GlyphRenderInfo};

    #[test]
    fn recycle_clears_previous_state() {
        let mut info = GlyphRenderInfo {
            is_visible: true,
            bold: true,
            offset_y: 3.0,
            ..GlyphRenderInfo::default()
        };
        info.recycle(&Glyph {
            character: 'x',
            source_line_index: 2,
            source_column_index: 1,
            global_index: 7,
        });

        assert_eq!(info.glyph_index(), 7);
        assert_eq!(info.character(), 'x');
        assert!(!info.is_visible());
        assert!(!info.is_whitespace());
        assert!(!info.bold);
        assert_eq!(info.offset_y, 0.0);
        assert!(info.ignore_for_render());
    }
}
