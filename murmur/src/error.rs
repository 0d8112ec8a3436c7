// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

/// Error returned by [`EffectRegistry::try_register`](crate::EffectRegistry::try_register).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryError {
    kind: RegistryErrorKind,
    name: String,
}

impl RegistryError {
    pub(crate) fn empty_name() -> Self {
        Self {
            kind: RegistryErrorKind::EmptyName,
            name: String::new(),
        }
    }

    pub(crate) fn duplicate_name(name: String) -> Self {
        Self {
            kind: RegistryErrorKind::DuplicateName,
            name,
        }
    }

    /// The machine-readable category for this error.
    pub fn kind(&self) -> RegistryErrorKind {
        self.kind
    }

    /// The (lower-cased) tag name that was rejected.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RegistryErrorKind::EmptyName => write!(f, "effect tag name is empty"),
            RegistryErrorKind::DuplicateName => {
                write!(f, "an effect is already registered for tag `{}`", self.name)
            }
        }
    }
}

impl core::error::Error for RegistryError {}

/// The non-exhaustive category of a [`RegistryError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryErrorKind {
    /// The tag name was empty, so no markup could ever reach it.
    EmptyName,

    /// A factory was already registered under the same (case-insensitive) name.
    DuplicateName,
}
