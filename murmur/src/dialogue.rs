// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The full pipeline behind one dialogue box.

use alloc::string::String;
use alloc::vec::Vec;

use crate::{
    CharacterRevealed, Diagnostic, EffectRegistry, Glyph, GlyphRenderInfo, LineWrapper,
    MeasureText, Parser, PlaybackState, TextBuilder, TextEffectInstance, Typewriter,
    TypewriterSettings, WrapSettings,
};

/// Parsed, wrapped and revealed dialogue text.
///
/// Owns everything derived from the current source text: the glyphs and effects, one
/// [`GlyphRenderInfo`] per glyph, the line layout and the typewriter. Setting new text rebuilds
/// the glyphs and rewinds the typewriter; changing the width only re-wraps, so whatever has been
/// revealed stays revealed.
#[derive(Debug, Default)]
pub struct DialogueText {
    source: String,
    has_text: bool,
    builder: TextBuilder,
    infos: Vec<GlyphRenderInfo>,
    wrapper: LineWrapper,
    typewriter: Typewriter,
    typewriter_settings: TypewriterSettings,
    wrap_settings: WrapSettings,
}

impl DialogueText {
    /// Create an empty dialogue with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty dialogue with the given settings.
    pub fn with_settings(mut typewriter: TypewriterSettings, wrap: WrapSettings) -> Self {
        let player = Typewriter::new(typewriter.characters_per_second);
        typewriter.characters_per_second = player.characters_per_second();
        Self {
            typewriter: player,
            typewriter_settings: typewriter,
            wrap_settings: wrap,
            ..Self::default()
        }
    }

    /// Replace the source text.
    ///
    /// Parses `text` against `registry`, recycles the render infos, initializes every effect,
    /// wraps at the configured width and rewinds the typewriter (starting it again when
    /// [`TypewriterSettings::auto_play`] is set).
    pub fn set_text(
        &mut self,
        registry: &EffectRegistry,
        text: &str,
        measure: &mut impl MeasureText,
    ) {
        self.source.clear();
        self.source.push_str(text);
        self.has_text = true;
        Parser::new(registry).parse_into(&mut self.builder, text);

        let glyphs = self.builder.glyphs();
        self.infos
            .resize_with(glyphs.len(), GlyphRenderInfo::default);
        for (info, glyph) in self.infos.iter_mut().zip(glyphs) {
            info.recycle(glyph);
        }
        for effect in self.builder.effects_mut() {
            for index in effect.glyph_range() {
                effect.effect.initialize(&mut self.infos[index]);
            }
        }

        self.rewrap(measure);
        if self.typewriter_settings.auto_play {
            self.typewriter.play(&mut self.infos);
        } else {
            self.typewriter.stop(&mut self.infos);
        }
    }

    /// Change the available width, re-wrapping if it actually changed.
    pub fn set_max_width(&mut self, max_width: Option<f32>, measure: &mut impl MeasureText) {
        let previous = self.wrap_settings.effective_width();
        self.wrap_settings.max_width = max_width;
        if self.wrap_settings.effective_width().to_bits() != previous.to_bits() {
            self.rewrap(measure);
        }
    }

    /// Wrap again at the current width, for example after the font changed.
    pub fn rewrap(&mut self, measure: &mut impl MeasureText) {
        self.wrapper.wrap(
            &self.builder,
            &mut self.infos,
            self.wrap_settings.effective_width(),
            measure,
        );
    }

    /// Set the reveal rate. Zero, negative and NaN rates are ignored.
    pub fn set_characters_per_second(&mut self, characters_per_second: f64) {
        self.typewriter.configure_rate(characters_per_second);
        self.typewriter_settings.characters_per_second = self.typewriter.characters_per_second();
    }

    /// Rewind and start revealing.
    pub fn play(&mut self) {
        self.typewriter.play(&mut self.infos);
    }

    /// Hold the current reveal position.
    pub fn pause(&mut self) {
        self.typewriter.pause();
    }

    /// Continue after [`pause`](Self::pause).
    pub fn resume(&mut self) {
        self.typewriter.resume();
    }

    /// Rewind and stop.
    pub fn stop(&mut self) {
        self.typewriter.stop(&mut self.infos);
    }

    /// Show everything immediately.
    pub fn reveal_all(&mut self) {
        self.typewriter.reveal_all(&mut self.infos);
    }

    /// Advance playback by `elapsed` seconds and update effects. Call once per frame.
    pub fn tick(&mut self, elapsed: f64, on_reveal: impl FnMut(CharacterRevealed)) {
        self.typewriter.tick(
            elapsed,
            &mut self.infos,
            self.builder.effects_mut(),
            on_reveal,
        );
    }

    /// The source text as last set.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The glyphs of the current text.
    pub fn glyphs(&self) -> &[Glyph] {
        self.builder.glyphs()
    }

    /// The glyph at `index`.
    ///
    /// # Panics
    ///
    /// If no text has been set yet, or `index` is out of range.
    pub fn glyph(&self, index: usize) -> &Glyph {
        assert!(self.has_text, "glyph requested before any text was set");
        &self.builder.glyphs()[index]
    }

    /// The effect instances of the current text.
    pub fn effects(&self) -> &[TextEffectInstance] {
        self.builder.effects()
    }

    /// One render info per glyph.
    pub fn render_infos(&self) -> &[GlyphRenderInfo] {
        &self.infos
    }

    /// Markup problems found in the current text.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.builder.diagnostics()
    }

    /// Number of render lines.
    pub fn line_count(&self) -> usize {
        self.wrapper.line_count()
    }

    /// The typewriter's playback state.
    pub fn state(&self) -> PlaybackState {
        self.typewriter.state()
    }

    /// Whether every glyph has been revealed.
    pub fn is_finished(&self) -> bool {
        self.typewriter.is_finished()
    }

    /// The typewriter.
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    /// The current typewriter settings.
    pub fn typewriter_settings(&self) -> TypewriterSettings {
        self.typewriter_settings
    }

    /// The current wrap settings.
    pub fn wrap_settings(&self) -> WrapSettings {
        self.wrap_settings
    }

    /// The revealed, drawable characters of every render line.
    pub fn visible_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.resize_with(self.line_count(), String::new);
        for info in self.infos.iter().filter(|info| info.is_drawable()) {
            lines[info.wrapped_line_index].push(info.character);
        }
        lines
    }
}
