// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dialogue markup parsing.
//!
//! The grammar is deliberately small:
//!
//! ```text
//! <name attr="value" attr2=value2>text</name>
//! <name attr="value"/>
//! <name="value">text</name>
//! ```
//!
//! Tag names are matched against an [`EffectRegistry`] without regard to case. Anything that
//! doesn't form a known, well-formed tag is kept as literal text: markup errors never stop a
//! parse. They are reported as [`Diagnostic`]s on the [`TextBuilder`] instead.

use alloc::string::String;
use core::fmt;

use smallvec::SmallVec;

use crate::{Attributes, EffectRegistry, TextBuilder, TextEffectInstance};

/// Kinds of markup problems reported while parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiagnosticKind {
    /// A `<` without a closing `>` (or with another `<` before it).
    UnterminatedTag,
    /// A tag with no name, such as `<>` or `< b>`.
    EmptyTagName,
    /// A tag whose name has no registered effect.
    UnknownTag,
    /// A closing tag that doesn't match any open tag.
    UnmatchedClosingTag,
    /// An opening tag that was never closed; it runs to the end of the text.
    UnclosedTag,
}

/// A markup problem that was recovered from by treating the tag as literal text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    span: (usize, usize),
}

impl Diagnostic {
    const fn new(kind: DiagnosticKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: (start, end),
        }
    }

    /// Returns the diagnostic kind.
    pub const fn kind(self) -> DiagnosticKind {
        self.kind
    }

    /// Returns the byte offset into the source of the offending `<`.
    pub const fn byte_offset(self) -> usize {
        self.span.0
    }

    /// Returns the byte span (start, end) of the offending tag.
    pub const fn byte_span(self) -> (usize, usize) {
        self.span
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            DiagnosticKind::UnterminatedTag => "unterminated tag",
            DiagnosticKind::EmptyTagName => "tag without a name",
            DiagnosticKind::UnknownTag => "unknown tag",
            DiagnosticKind::UnmatchedClosingTag => "closing tag without a matching open tag",
            DiagnosticKind::UnclosedTag => "tag is never closed",
        };
        write!(f, "{msg} at byte {}", self.span.0)
    }
}

/// Parse `text` with `registry` into a new [`TextBuilder`].
pub fn parse(registry: &EffectRegistry, text: &str) -> TextBuilder {
    let mut builder = TextBuilder::new();
    Parser::new(registry).parse_into(&mut builder, text);
    builder
}

/// Single pass markup parser.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    registry: &'a EffectRegistry,
}

#[derive(Debug)]
struct OpenTag {
    name: String,
    effect: usize,
    offset: usize,
}

/// Tags still waiting for their closing tag, innermost last.
type OpenTags = SmallVec<[OpenTag; 4]>;

struct Cursor {
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser resolving tags against `registry`.
    pub fn new(registry: &'a EffectRegistry) -> Self {
        Self { registry }
    }

    /// Reset `builder` and fill it with the glyphs and effects of `text`.
    pub fn parse_into(&self, builder: &mut TextBuilder, text: &str) {
        builder.reset();
        let mut open = OpenTags::new();
        let mut cursor = Cursor { line: 0, column: 0 };

        let mut pos = 0;
        while let Some(ch) = text[pos..].chars().next() {
            match ch {
                '\n' => {
                    cursor.line += 1;
                    cursor.column = 0;
                    pos += 1;
                }
                '\r' => pos += 1,
                '<' => match self.read_tag(text, pos, builder, &mut open) {
                    Some(end) => pos = end,
                    None => {
                        emit(builder, &open, &mut cursor, ch);
                        pos += 1;
                    }
                },
                _ => {
                    emit(builder, &open, &mut cursor, ch);
                    pos += ch.len_utf8();
                }
            }
        }

        for tag in &open {
            report(
                builder,
                Diagnostic::new(DiagnosticKind::UnclosedTag, tag.offset, text.len()),
            );
        }
        builder.finish(cursor.line + 1);
    }

    /// Try to consume the tag starting at the `<` at `start`.
    ///
    /// Returns the byte offset just past the tag, or `None` if the `<` is literal text.
    fn read_tag(
        &self,
        text: &str,
        start: usize,
        builder: &mut TextBuilder,
        open: &mut OpenTags,
    ) -> Option<usize> {
        let rest = &text[start + 1..];
        let Some(close) = rest.find(['>', '<']).filter(|&i| rest.as_bytes()[i] == b'>') else {
            report(
                builder,
                Diagnostic::new(DiagnosticKind::UnterminatedTag, start, text.len()),
            );
            return None;
        };
        let inner = &rest[..close];
        let end = start + 1 + close + 1;

        if let Some(name) = inner.strip_prefix('/') {
            let name = name.trim().to_lowercase();
            let Some(depth) = open.iter().rposition(|tag| tag.name == name) else {
                report(
                    builder,
                    Diagnostic::new(DiagnosticKind::UnmatchedClosingTag, start, end),
                );
                return None;
            };
            open.remove(depth);
            return Some(end);
        }

        let (body, self_closing) = match inner.strip_suffix('/') {
            Some(body) => (body, true),
            None => (inner, false),
        };
        let name_end = body
            .find(|c: char| c.is_whitespace() || matches!(c, '=' | '/' | '>'))
            .unwrap_or(body.len());
        if name_end == 0 {
            report(
                builder,
                Diagnostic::new(DiagnosticKind::EmptyTagName, start, end),
            );
            return None;
        }
        let name = body[..name_end].to_lowercase();
        let attributes = parse_attributes(&body[name_end..]);
        let Some(effect) = self.registry.try_create(&name, &attributes) else {
            report(builder, Diagnostic::new(DiagnosticKind::UnknownTag, start, end));
            return None;
        };

        let mut instance = TextEffectInstance::new(name.clone(), attributes, builder.len(), effect);
        if self_closing {
            instance.affected_glyph_count = 1;
            builder.push_effect(instance);
        } else {
            let effect = builder.push_effect(instance);
            open.push(OpenTag {
                name,
                effect,
                offset: start,
            });
        }
        Some(end)
    }
}

fn emit(builder: &mut TextBuilder, open: &OpenTags, cursor: &mut Cursor, ch: char) {
    builder.push_glyph(ch, cursor.line, cursor.column);
    cursor.column += 1;
    for tag in open {
        builder.effect_mut(tag.effect).affected_glyph_count += 1;
    }
}

fn report(builder: &mut TextBuilder, diagnostic: Diagnostic) {
    log::debug!("markup: {diagnostic}");
    builder.push_diagnostic(diagnostic);
}

/// Parse the attribute part of a tag, everything between the name and the closing bracket.
fn parse_attributes(span: &str) -> Attributes {
    let mut attributes = Attributes::new();
    let mut rest = span.trim_start();

    if let Some(tail) = rest.strip_prefix('=') {
        let (value, tail) = read_value(tail.trim_start());
        attributes.set_value(value);
        rest = tail;
    }

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        rest = rest[name_end..].trim_start();
        match rest.strip_prefix('=') {
            Some(tail) => {
                let (value, tail) = read_value(tail.trim_start());
                // Only the leading `=value` form is positional.
                if !name.is_empty() {
                    attributes.insert(name, value);
                }
                rest = tail;
            }
            None => attributes.insert(name, ""),
        }
    }
    attributes
}

/// Split an attribute value off the front of `s`, stripping double quotes.
///
/// An unterminated quote runs to the end of the span.
fn read_value(s: &str) -> (&str, &str) {
    if let Some(quoted) = s.strip_prefix('"') {
        return match quoted.find('"') {
            Some(end) => (&quoted[..end], &quoted[end + 1..]),
            None => (quoted, ""),
        };
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    (&s[..end], &s[end..])
}
