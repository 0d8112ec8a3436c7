// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An effect that writes down every hook call it receives.

use std::sync::{Arc, Mutex};

use crate::{EffectRegistry, GlyphRenderInfo, TextEffect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Hook {
    Initialize(usize),
    Prepare(usize),
    Appear(usize),
    Update(usize),
}

/// Shared, ordered log of `(tag, hook)` calls.
#[derive(Clone, Debug, Default)]
pub(crate) struct HookLog(Arc<Mutex<Vec<(&'static str, Hook)>>>);

impl HookLog {
    fn push(&self, tag: &'static str, hook: Hook) {
        self.0.lock().unwrap().push((tag, hook));
    }

    pub(crate) fn events(&self) -> Vec<(&'static str, Hook)> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    /// Calls received by `tag` that satisfy `filter`.
    pub(crate) fn count(&self, tag: &str, filter: impl Fn(Hook) -> bool) -> usize {
        self.events()
            .into_iter()
            .filter(|(t, hook)| *t == tag && filter(*hook))
            .count()
    }
}

#[derive(Debug)]
struct Recorder {
    tag: &'static str,
    log: HookLog,
    hold: f64,
}

impl TextEffect for Recorder {
    fn initialize(&mut self, info: &mut GlyphRenderInfo) {
        self.log.push(self.tag, Hook::Initialize(info.glyph_index()));
    }

    fn prepare_for_new_effect(&mut self, info: &mut GlyphRenderInfo) {
        self.log.push(self.tag, Hook::Prepare(info.glyph_index()));
    }

    fn on_character_appear(&mut self, info: &mut GlyphRenderInfo) {
        self.log.push(self.tag, Hook::Appear(info.glyph_index()));
    }

    fn update(&mut self, _time: f64, info: &mut GlyphRenderInfo) {
        info.offset_x += 1.0;
        self.log.push(self.tag, Hook::Update(info.glyph_index()));
    }

    fn reveal_delay(&mut self, _info: &GlyphRenderInfo) -> f64 {
        self.hold
    }
}

/// A registry where every tag in `tags` records into `log`.
///
/// A `hold` attribute on the tag becomes the effect's reveal delay.
pub(crate) fn recording_registry(log: &HookLog, tags: &[&'static str]) -> EffectRegistry {
    let mut registry = EffectRegistry::new();
    for &tag in tags {
        let log = log.clone();
        registry.register(tag, move |attrs| {
            Box::new(Recorder {
                tag,
                log: log.clone(),
                hold: attrs.get_f32("hold").map_or(0.0, f64::from),
            })
        });
    }
    registry
}
