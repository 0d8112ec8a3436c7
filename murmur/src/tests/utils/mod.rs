// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod recorder;

pub(crate) use recorder::{Hook, HookLog, recording_registry};

use crate::{DialogueText, EffectRegistry, MonospaceMeasure, TypewriterSettings, WrapSettings};

/// Width of every character in tests.
pub(crate) const ADVANCE: f32 = 10.0;

pub(crate) fn measure() -> MonospaceMeasure {
    MonospaceMeasure::new(ADVANCE)
}

/// A dialogue that doesn't start playing on its own.
pub(crate) fn dialogue(
    registry: &EffectRegistry,
    text: &str,
    characters_per_second: f64,
) -> DialogueText {
    let mut dialogue = DialogueText::with_settings(
        TypewriterSettings {
            characters_per_second,
            auto_play: false,
        },
        WrapSettings::default(),
    );
    dialogue.set_text(registry, text, &mut measure());
    dialogue
}

/// Indices of the glyphs currently visible.
pub(crate) fn visible(dialogue: &DialogueText) -> Vec<usize> {
    dialogue
        .render_infos()
        .iter()
        .filter(|info| info.is_visible())
        .map(|info| info.glyph_index())
        .collect()
}
