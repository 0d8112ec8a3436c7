// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typewriter playback.

use crate::{GlyphRenderInfo, TextEffectInstance};

/// Slack for accumulated floating point error when comparing reveal times.
const TIMING_EPSILON: f64 = 1e-9;

/// Playback state of a [`Typewriter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not revealing anything. The initial state, and the state after playback finishes.
    #[default]
    Stopped,
    /// Revealing glyphs as time passes.
    Playing,
    /// Holding the current reveal position. Effects keep updating.
    Paused,
}

/// Fired once for every glyph the typewriter reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterRevealed {
    /// Global index of the revealed glyph.
    pub index: usize,
    /// The revealed character.
    pub character: char,
}

/// Reveals glyphs at a fixed rate and drives the effect hooks.
///
/// The typewriter doesn't own any glyph data; every call takes the render-info arena and the
/// effect list it should act on.
///
/// Glyphs dropped by the wrapper (see [`GlyphRenderInfo::ignore_for_render`]) are revealed on
/// the same schedule as every other glyph: each one still takes a full character delay.
#[derive(Debug, Clone)]
pub struct Typewriter {
    state: PlaybackState,
    delay: f64,
    accumulator: f64,
    cursor: Option<usize>,
    /// The glyph whose reveal delay has already been applied.
    held: Option<usize>,
    time: f64,
    finished: bool,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(30.0)
    }
}

impl Typewriter {
    /// Create a stopped typewriter revealing `characters_per_second` glyphs per second.
    ///
    /// An invalid rate falls back to 30 characters per second.
    pub fn new(characters_per_second: f64) -> Self {
        let mut typewriter = Self {
            state: PlaybackState::Stopped,
            delay: 1.0 / 30.0,
            accumulator: 0.0,
            cursor: None,
            held: None,
            time: 0.0,
            finished: false,
        };
        typewriter.configure_rate(characters_per_second);
        typewriter.accumulator = typewriter.delay;
        typewriter
    }

    /// Set the reveal rate.
    ///
    /// Zero, negative and NaN rates are ignored and the previous rate is kept.
    pub fn configure_rate(&mut self, characters_per_second: f64) {
        if characters_per_second > 0.0 {
            self.delay = 1.0 / characters_per_second;
        } else {
            log::warn!("ignoring invalid reveal rate {characters_per_second}");
        }
    }

    /// The current reveal rate.
    pub fn characters_per_second(&self) -> f64 {
        1.0 / self.delay
    }

    /// Seconds between two reveals.
    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// The playback state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index of the most recently revealed glyph, `None` if nothing is revealed.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Seconds ticked since the typewriter was created. This is the time effects see.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Whether every glyph has been revealed, by playback or by [`reveal_all`](Self::reveal_all).
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Hide everything and rewind to before the first glyph.
    ///
    /// The playback state is left alone.
    pub fn reset(&mut self, infos: &mut [GlyphRenderInfo]) {
        self.cursor = None;
        self.held = None;
        self.finished = false;
        self.accumulator = self.delay;
        for info in infos {
            info.is_visible = false;
            info.is_newly_revealed = false;
        }
    }

    /// Rewind and start revealing.
    pub fn play(&mut self, infos: &mut [GlyphRenderInfo]) {
        self.reset(infos);
        self.state = PlaybackState::Playing;
    }

    /// Rewind and stop.
    pub fn stop(&mut self, infos: &mut [GlyphRenderInfo]) {
        self.reset(infos);
        self.state = PlaybackState::Stopped;
    }

    /// Hold the reveal position. Only has an effect while playing.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Continue revealing after [`pause`](Self::pause).
    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
    }

    /// Reveal every glyph at once and stop playing.
    ///
    /// No [`CharacterRevealed`] events and no `on_character_appear` hooks fire. Glyphs that were
    /// still hidden count as newly revealed, so their effects are prepared on the next update.
    pub fn reveal_all(&mut self, infos: &mut [GlyphRenderInfo]) {
        for info in infos.iter_mut() {
            if !info.is_visible {
                info.is_visible = true;
                info.is_newly_revealed = true;
            }
        }
        self.cursor = infos.len().checked_sub(1);
        self.finish();
    }

    /// Advance by `elapsed` seconds, then run the per-frame effect update.
    ///
    /// `on_reveal` is called for every glyph revealed during this tick, in order.
    pub fn tick(
        &mut self,
        elapsed: f64,
        infos: &mut [GlyphRenderInfo],
        effects: &mut [TextEffectInstance],
        on_reveal: impl FnMut(CharacterRevealed),
    ) {
        let elapsed = if elapsed > 0.0 { elapsed } else { 0.0 };
        self.time += elapsed;
        if self.state == PlaybackState::Playing {
            self.advance(elapsed, infos, effects, on_reveal);
        }
        self.update(infos, effects);
    }

    /// Move the reveal cursor forward by as many glyphs as `elapsed` covers.
    fn advance(
        &mut self,
        elapsed: f64,
        infos: &mut [GlyphRenderInfo],
        effects: &mut [TextEffectInstance],
        mut on_reveal: impl FnMut(CharacterRevealed),
    ) {
        self.accumulator -= elapsed;
        while self.accumulator <= TIMING_EPSILON {
            let next = self.cursor.map_or(0, |cursor| cursor + 1);
            if next >= infos.len() {
                self.finish();
                return;
            }

            if self.held != Some(next) {
                self.held = Some(next);
                let hold: f64 = effects
                    .iter_mut()
                    .filter(|effect| effect.contains(next))
                    .map(|effect| effect.effect.reveal_delay(&infos[next]))
                    .filter(|hold| *hold > 0.0)
                    .sum();
                if hold > 0.0 {
                    self.accumulator += hold;
                    continue;
                }
            }

            self.accumulator += self.delay;
            self.cursor = Some(next);
            reveal(next, infos, effects, &mut on_reveal);
            if next + 1 == infos.len() {
                self.finish();
                return;
            }
        }
    }

    /// The per-frame effect pass.
    ///
    /// Offsets are cleared, newly revealed glyphs get their effects prepared, then every effect
    /// updates the drawable glyphs in its range. Effects run in parse order, glyphs in index
    /// order.
    fn update(&mut self, infos: &mut [GlyphRenderInfo], effects: &mut [TextEffectInstance]) {
        if self.cursor.is_none() {
            return;
        }

        for info in infos.iter_mut() {
            info.offset_x = 0.0;
            info.offset_y = 0.0;
        }

        for (index, info) in infos.iter_mut().enumerate() {
            if !info.is_newly_revealed || info.ignore_for_render {
                continue;
            }
            for effect in effects.iter_mut().filter(|effect| effect.contains(index)) {
                effect.effect.prepare_for_new_effect(info);
            }
            info.is_newly_revealed = false;
        }

        for effect in effects.iter_mut() {
            for index in effect.glyph_range() {
                let info = &mut infos[index];
                if info.is_drawable() {
                    effect.effect.update(self.time, info);
                }
            }
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        self.state = PlaybackState::Stopped;
    }
}

fn reveal(
    index: usize,
    infos: &mut [GlyphRenderInfo],
    effects: &mut [TextEffectInstance],
    on_reveal: &mut impl FnMut(CharacterRevealed),
) {
    let info = &mut infos[index];
    info.is_visible = true;
    info.is_newly_revealed = true;
    log::trace!("revealed glyph {index} {:?}", info.character);
    on_reveal(CharacterRevealed {
        index,
        character: info.character,
    });
    for effect in effects.iter_mut().filter(|effect| effect.contains(index)) {
        effect.effect.on_character_appear(info);
    }
}
