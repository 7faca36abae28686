// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use smol_str::SmolStr;
use thiserror::Error;

/// The id-space an identifier lives in.
///
/// TCF identifiers are only unique within their own kind (a lemma and a tag may both be
/// called `x_0`), so every index lookup is scoped by one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdKind {
    Token,
    Sentence,
    Lemma,
    Tag,
    NamedEntity,
    /// Token ids that are members of a named-entity mention (token id -> mention).
    NamedEntityMember,
    Reference,
    Parse,
}

impl IdKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Sentence => "sentence",
            Self::Lemma => "lemma",
            Self::Tag => "tag",
            Self::NamedEntity => "named_entity",
            Self::NamedEntityMember => "named_entity_member",
            Self::Reference => "reference",
            Self::Parse => "parse",
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binds an id tag type to its index scope and the prefix used for generated ids.
pub trait IdScope {
    const KIND: IdKind;
    const PREFIX: &'static str;
}

/// An opaque annotation identifier.
///
/// Ids are compared as strings and never interpreted. The only constraint is that they are
/// non-empty and free of whitespace, because TCF stores id lists as whitespace-separated
/// attributes (`tokenIDs="t_3 t_4"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: SmolStr,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdError> {
        let value = value.as_ref();
        validate_id(value)?;
        Ok(Self {
            value: SmolStr::new(value),
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn as_smol_str(&self) -> &SmolStr {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value.into()
    }
}

impl<T: IdScope> Id<T> {
    /// Builds the conventional `<prefix>_<n>` id (`t_0`, `le_12`, ...).
    pub fn generated(n: usize) -> Self {
        let mut buf = itoa::Buffer::new();
        let digits = buf.format(n);
        let mut value = String::with_capacity(T::PREFIX.len() + 1 + digits.len());
        value.push_str(T::PREFIX);
        value.push('_');
        value.push_str(digits);
        Self {
            value: SmolStr::from(value),
            _marker: PhantomData,
        }
    }

    pub fn kind(&self) -> IdKind {
        T::KIND
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("id must not be empty")]
    Empty,
    #[error("id must not contain whitespace")]
    ContainsWhitespace,
}

pub(crate) fn validate_id(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(IdError::ContainsWhitespace);
    }
    Ok(())
}

/// Splits a whitespace-separated id list attribute (`tokenIDs`, `depIDs`, ...).
pub fn parse_id_list<T>(raw: &str) -> Result<Vec<Id<T>>, IdError> {
    raw.split_whitespace().map(Id::new).collect()
}

/// Joins ids back into the attribute form read by [`parse_id_list`].
pub fn join_id_list<T>(ids: &[Id<T>]) -> String {
    let mut out = String::new();
    for (idx, id) in ids.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.push_str(id.as_str());
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenIdTag {}
pub type TokenId = Id<TokenIdTag>;

impl IdScope for TokenIdTag {
    const KIND: IdKind = IdKind::Token;
    const PREFIX: &'static str = "t";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SentenceIdTag {}
pub type SentenceId = Id<SentenceIdTag>;

impl IdScope for SentenceIdTag {
    const KIND: IdKind = IdKind::Sentence;
    const PREFIX: &'static str = "s";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LemmaIdTag {}
pub type LemmaId = Id<LemmaIdTag>;

impl IdScope for LemmaIdTag {
    const KIND: IdKind = IdKind::Lemma;
    const PREFIX: &'static str = "le";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagIdTag {}
pub type TagId = Id<TagIdTag>;

impl IdScope for TagIdTag {
    const KIND: IdKind = IdKind::Tag;
    const PREFIX: &'static str = "pt";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityIdTag {}
pub type EntityId = Id<EntityIdTag>;

impl IdScope for EntityIdTag {
    const KIND: IdKind = IdKind::NamedEntity;
    const PREFIX: &'static str = "ne";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReferenceIdTag {}
pub type ReferenceId = Id<ReferenceIdTag>;

impl IdScope for ReferenceIdTag {
    const KIND: IdKind = IdKind::Reference;
    const PREFIX: &'static str = "rc";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParseIdTag {}
pub type ParseId = Id<ParseIdTag>;

impl IdScope for ParseIdTag {
    const KIND: IdKind = IdKind::Parse;
    const PREFIX: &'static str = "d";
}
