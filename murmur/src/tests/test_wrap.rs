// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{EffectRegistry, GlyphRenderInfo, LineWrapper, MeasureText, TextBuilder, parse};

use super::utils::{ADVANCE, measure};

struct Wrapped {
    builder: TextBuilder,
    infos: Vec<GlyphRenderInfo>,
    wrapper: LineWrapper,
}

impl Wrapped {
    fn new(text: &str) -> Self {
        let builder = parse(&EffectRegistry::with_builtins(), text);
        let infos = builder
            .glyphs()
            .iter()
            .map(|glyph| {
                let mut info = GlyphRenderInfo::default();
                info.recycle(glyph);
                info
            })
            .collect();
        Self {
            builder,
            infos,
            wrapper: LineWrapper::new(),
        }
    }

    fn wrap(mut self, max_width: f32) -> Self {
        self.rewrap(max_width);
        self
    }

    fn rewrap(&mut self, max_width: f32) {
        self.wrapper.wrap(
            &self.builder,
            &mut self.infos,
            max_width,
            &mut measure(),
        );
    }

    /// The placed characters of every render line.
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![String::new(); self.wrapper.line_count()];
        for info in self.infos.iter().filter(|info| !info.ignore_for_render()) {
            let line = &mut lines[info.wrapped_line_index()];
            assert_eq!(
                line.chars().count(),
                info.wrapped_column_index(),
                "columns are assigned left to right without gaps"
            );
            line.push(info.character());
        }
        lines
    }

    fn position(&self, index: usize) -> (usize, usize, bool) {
        let info = &self.infos[index];
        (
            info.wrapped_line_index(),
            info.wrapped_column_index(),
            info.ignore_for_render(),
        )
    }

    fn positions(&self) -> Vec<(usize, usize, bool)> {
        (0..self.infos.len()).map(|i| self.position(i)).collect()
    }
}

#[test]
fn exact_fit_does_not_break() {
    let wrapped = Wrapped::new("abcdef").wrap(6.0 * ADVANCE);

    assert_eq!(wrapped.lines(), ["abcdef"]);
    assert_eq!(wrapped.wrapper.line_count(), 1);
}

#[test]
fn breaks_at_last_whitespace() {
    let wrapped = Wrapped::new("hello world").wrap(60.0);

    assert_eq!(wrapped.lines(), ["hello", "world"]);
    assert_eq!(wrapped.position(5), (0, 5, true));
    assert_eq!(wrapped.position(6), (1, 0, false));
}

#[test]
fn breaks_before_overflowing_glyph_without_whitespace() {
    let wrapped = Wrapped::new("abcdefgh").wrap(30.0);

    assert_eq!(wrapped.lines(), ["abc", "def", "gh"]);
    assert_eq!(wrapped.wrapper.line_count(), 3);
}

#[test]
fn whitespace_run_at_break_is_trimmed() {
    let wrapped = Wrapped::new("ab   cd").wrap(40.0);

    assert_eq!(wrapped.lines(), ["ab", "cd"]);
    for index in 2..5 {
        assert_eq!(wrapped.position(index), (0, 2, true));
    }
}

#[test]
fn leading_whitespace_after_soft_break_is_trimmed() {
    let wrapped = Wrapped::new("abc  def").wrap(30.0);

    assert_eq!(wrapped.lines(), ["abc", "def"]);
    assert_eq!(wrapped.position(3), (0, 3, true));
    assert_eq!(wrapped.position(4), (0, 3, true));
    assert_eq!(wrapped.position(5), (1, 0, false));
}

#[test]
fn overflowing_space_does_not_open_a_line() {
    let wrapped = Wrapped::new("abc ").wrap(30.0);

    assert_eq!(wrapped.lines(), ["abc"]);
    assert_eq!(wrapped.wrapper.line_count(), 1);
    assert_eq!(wrapped.position(3), (0, 3, true));
}

#[test]
fn source_break_after_overflowing_space_adds_no_blank_line() {
    let wrapped = Wrapped::new("abc \ndef").wrap(30.0);

    assert_eq!(wrapped.lines(), ["abc", "def"]);
    assert_eq!(wrapped.position(4), (1, 0, false));

    let wrapped = Wrapped::new("abc  \n\ndef").wrap(30.0);
    assert_eq!(wrapped.lines(), ["abc", "", "def"]);
}

#[test]
fn oversized_glyph_gets_its_own_line() {
    let wrapped = Wrapped::new("ab").wrap(5.0);

    assert_eq!(wrapped.lines(), ["a", "b"]);
}

#[test]
fn source_lines_start_new_render_lines() {
    let wrapped = Wrapped::new("ab\ncd").wrap(0.0);

    assert_eq!(wrapped.lines(), ["ab", "cd"]);
    assert_eq!(wrapped.position(2), (1, 0, false));
}

#[test]
fn blank_source_lines_are_kept() {
    let wrapped = Wrapped::new("a\n\nb").wrap(100.0);

    assert_eq!(wrapped.wrapper.line_count(), 3);
    assert_eq!(wrapped.lines(), ["a", "", "b"]);
}

#[test]
fn trailing_blank_source_lines_are_kept() {
    let wrapped = Wrapped::new("ab\n\n").wrap(0.0);

    assert_eq!(wrapped.builder.source_line_count(), 3);
    assert_eq!(wrapped.wrapper.line_count(), 3);
    assert_eq!(wrapped.lines(), ["ab", "", ""]);

    let wrapped = Wrapped::new("abc def\n").wrap(30.0);
    assert_eq!(wrapped.lines(), ["abc", "def", ""]);
}

#[test]
fn soft_breaks_shift_following_source_lines() {
    let wrapped = Wrapped::new("aaa bbb\nccc").wrap(50.0);

    assert_eq!(wrapped.lines(), ["aaa", "bbb", "ccc"]);
}

#[test]
fn non_positive_width_disables_wrapping() {
    let text = "a rather long line that would otherwise wrap";
    for width in [0.0, -10.0, f32::NAN] {
        let wrapped = Wrapped::new(text).wrap(width);
        assert_eq!(wrapped.lines(), [text]);
    }
}

#[test]
fn empty_text_has_no_lines() {
    let wrapped = Wrapped::new("").wrap(50.0);

    assert_eq!(wrapped.wrapper.line_count(), 0);
    assert!(wrapped.lines().is_empty());
}

#[test]
fn placed_lines_fit_the_width() {
    let text = "The quick brown fox jumps over the lazy dog, then naps  for a while.";
    for columns in 1..30 {
        let width = columns as f32 * ADVANCE;
        let wrapped = Wrapped::new(text).wrap(width);
        for line in wrapped.lines() {
            assert!(
                line.chars().count() <= 1 || measure().measure(&line) <= width,
                "{line:?} overflows {width}"
            );
            assert_eq!(line.trim(), line, "whitespace is trimmed at soft breaks");
        }
        let placed: usize = wrapped.lines().iter().map(|l| l.chars().count()).sum();
        let parked = wrapped
            .infos
            .iter()
            .filter(|info| info.ignore_for_render())
            .count();
        assert_eq!(placed + parked, text.chars().count());
    }
}

#[test]
fn wrapping_is_idempotent() {
    let mut wrapped = Wrapped::new("one two three\nfour  five six seven").wrap(70.0);
    let first = wrapped.positions();
    let lines = wrapped.wrapper.line_count();

    wrapped.rewrap(70.0);
    assert_eq!(wrapped.positions(), first);
    assert_eq!(wrapped.wrapper.line_count(), lines);

    wrapped.rewrap(0.0);
    wrapped.rewrap(70.0);
    assert_eq!(wrapped.positions(), first);
}

#[test]
fn wrapping_touches_only_layout() {
    let mut wrapped = Wrapped::new("<bold>hello</bold> <color=red>world</color>");
    let ranges: Vec<_> = wrapped
        .builder
        .effects()
        .iter()
        .map(|effect| effect.glyph_range())
        .collect();
    wrapped.infos[3].is_visible = true;
    wrapped.infos[3].offset_x = 2.0;

    wrapped.rewrap(40.0);

    let after: Vec<_> = wrapped
        .builder
        .effects()
        .iter()
        .map(|effect| effect.glyph_range())
        .collect();
    assert_eq!(ranges, after);
    assert!(wrapped.infos[3].is_visible());
    assert_eq!(wrapped.infos[3].offset_x, 2.0);
}

#[test]
fn custom_measure_is_used() {
    let mut wrapped = Wrapped::new("iiii mm");
    // Narrow `i`, wide `m`.
    let mut narrow_i = |s: &str| {
        s.chars()
            .map(|c| if c == 'm' { 20.0 } else { 5.0 })
            .sum::<f32>()
    };
    wrapped.wrapper.wrap(
        &wrapped.builder,
        &mut wrapped.infos,
        40.0,
        &mut narrow_i,
    );

    assert_eq!(wrapped.lines(), ["iiii", "mm"]);
}

#[test]
#[should_panic(expected = "every glyph needs exactly one render info")]
fn mismatched_infos_panic() {
    let mut wrapped = Wrapped::new("abc");
    wrapped.infos.pop();
    wrapped.rewrap(10.0);
}
