// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich dialogue text.
//!
//! Murmur takes a string annotated with lightweight tags such as
//! `Hi <color=red>Bob</color>!` and turns it into something a game or UI can draw one
//! character at a time:
//!
//! - [`markup`] scans the string, matches `<tag>…</tag>` and `<tag/>` pairs and emits
//!   [`Glyph`]s plus [`TextEffectInstance`]s covering glyph ranges.
//! - [`EffectRegistry`] maps tag names to effect constructors. Unknown tags are kept as
//!   literal text.
//! - [`LineWrapper`] greedily breaks the glyphs into render lines for a given width.
//! - [`Typewriter`] reveals glyphs at a fixed rate and drives the effect hooks every frame.
//!
//! [`DialogueText`] wires all of the above together for a host.
//!
//! ## Features
//!
//! - `std` (enabled by default): Use the standard library for float math and enable the
//!   process-wide [`EffectRegistry::global`].
//! - `libm`: Use `core_maths` for float math in `no_std` builds.
//!
//! ## Example
//!
//! ```
//! use murmur::{DialogueText, EffectRegistry, MonospaceMeasure};
//!
//! let registry = EffectRegistry::with_builtins();
//! let mut measure = MonospaceMeasure::new(10.0);
//! let mut text = DialogueText::new();
//! text.set_characters_per_second(20.0);
//! text.set_text(&registry, "Hi <color=red>Bob</color>!", &mut measure);
//!
//! let mut revealed = Vec::new();
//! text.tick(0.25, |event| revealed.push(event.character));
//! assert_eq!(revealed, ['H', 'i', ' ', 'B', 'o']);
//!
//! // Narrow the box: "Hi" and "Bob!" end up on separate lines.
//! text.set_max_width(Some(50.0), &mut measure);
//! assert_eq!(text.line_count(), 2);
//! assert_eq!(text.visible_lines(), ["Hi", "Bo"]);
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("murmur requires either the `std` or `libm` feature to be enabled");

extern crate alloc;

mod builder;
mod dialogue;
mod error;
mod glyph;
mod registry;
mod reveal;
mod settings;
mod wrap;

pub mod effect;
pub mod markup;

#[cfg(test)]
mod tests;

pub use builder::TextBuilder;
pub use dialogue::DialogueText;
pub use effect::{Attributes, TextEffect, TextEffectInstance};
pub use error::{RegistryError, RegistryErrorKind};
pub use glyph::{Glyph, GlyphRenderInfo};
pub use markup::{Diagnostic, DiagnosticKind, Parser, parse};
pub use registry::{EffectFactory, EffectRegistry};
pub use reveal::{CharacterRevealed, PlaybackState, Typewriter};
pub use settings::{TypewriterSettings, WrapSettings};
pub use wrap::{LineWrapper, MeasureText, MonospaceMeasure};

pub use peniko::Color;
