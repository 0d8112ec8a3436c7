// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping from tag names to effect constructors.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::effect::{Bold, ColorEffect, Italic, Pause, Wave};
use crate::{Attributes, RegistryError, TextEffect};

/// Builds an effect from the attributes written on its tag.
pub type EffectFactory = dyn Fn(&Attributes) -> Box<dyn TextEffect> + Send + Sync;

/// Tag name to effect factory lookup.
///
/// Names are matched case-insensitively. Build one at startup, then share it immutably with
/// every parse.
#[derive(Default)]
pub struct EffectRegistry {
    factories: HashMap<String, Box<EffectFactory>>,
}

impl EffectRegistry {
    /// Create a registry with no tags at all. Every tag parses as literal text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in `bold`, `italic`, `color`, `wave` and `pause` tags.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("bold", |_| Box::new(Bold));
        registry.register("italic", |_| Box::new(Italic));
        registry.register("color", |attrs| Box::new(ColorEffect::from_attributes(attrs)));
        registry.register("wave", |attrs| Box::new(Wave::from_attributes(attrs)));
        registry.register("pause", |attrs| Box::new(Pause::from_attributes(attrs)));
        registry
    }

    /// Register `factory` for `tag_name`.
    ///
    /// A later registration for the same name replaces the earlier one.
    pub fn register<F>(&mut self, tag_name: &str, factory: F)
    where
        F: Fn(&Attributes) -> Box<dyn TextEffect> + Send + Sync + 'static,
    {
        let name = tag_name.to_lowercase();
        if self.factories.insert(name, Box::new(factory)).is_some() {
            log::warn!("replacing effect registered for tag `{tag_name}`");
        }
    }

    /// Register `factory` for `tag_name`, refusing empty and already registered names.
    pub fn try_register<F>(&mut self, tag_name: &str, factory: F) -> Result<(), RegistryError>
    where
        F: Fn(&Attributes) -> Box<dyn TextEffect> + Send + Sync + 'static,
    {
        if tag_name.is_empty() {
            return Err(RegistryError::empty_name());
        }
        let name = tag_name.to_lowercase();
        if self.factories.contains_key(&name) {
            return Err(RegistryError::duplicate_name(name));
        }
        self.factories.insert(name, Box::new(factory));
        Ok(())
    }

    /// Returns `true` if an effect is registered for `tag_name`.
    pub fn contains(&self, tag_name: &str) -> bool {
        self.factory(tag_name).is_some()
    }

    /// Build the effect registered for `tag_name`, or `None` for unknown tags.
    pub fn try_create(&self, tag_name: &str, attributes: &Attributes) -> Option<Box<dyn TextEffect>> {
        self.factory(tag_name).map(|factory| factory(attributes))
    }

    /// Number of registered tags.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if no tags are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    fn factory(&self, tag_name: &str) -> Option<&EffectFactory> {
        match self.factories.get(tag_name) {
            Some(factory) => Some(&**factory),
            None => self
                .factories
                .get(&tag_name.to_lowercase())
                .map(|factory| &**factory),
        }
    }
}

#[cfg(feature = "std")]
static GLOBAL: std::sync::OnceLock<EffectRegistry> = std::sync::OnceLock::new();

#[cfg(feature = "std")]
impl EffectRegistry {
    /// Install `registry` as the process-wide registry.
    ///
    /// Only the first install (or the first call to [`global`](Self::global)) takes effect;
    /// later calls hand the registry back.
    pub fn install_global(registry: Self) -> Result<(), Self> {
        GLOBAL.set(registry)
    }

    /// The process-wide registry, holding the built-ins unless another one was installed first.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::with_builtins)
    }
}

impl fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("EffectRegistry")
            .field("tags", &names)
            .finish()
    }
}
