// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Token-level annotation entries: sentences, lemmas, POS tags, word senses, text spans.

use smallvec::SmallVec;

use super::ids::{LemmaId, SentenceId, TagId, TokenId};

/// An annotation entry that points at one or more tokens by id.
pub trait TokenAnnotation {
    fn token_ids(&self) -> &[TokenId];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    id: SentenceId,
    token_ids: Vec<TokenId>,
}

impl Sentence {
    pub fn new(id: SentenceId, token_ids: Vec<TokenId>) -> Self {
        Self { id, token_ids }
    }

    pub fn id(&self) -> &SentenceId {
        &self.id
    }
}

impl TokenAnnotation for Sentence {
    fn token_ids(&self) -> &[TokenId] {
        &self.token_ids
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lemma {
    id: LemmaId,
    token_ids: SmallVec<[TokenId; 1]>,
    value: String,
}

impl Lemma {
    pub fn new(id: LemmaId, token_ids: impl IntoIterator<Item = TokenId>, value: impl Into<String>) -> Self {
        Self {
            id,
            token_ids: token_ids.into_iter().collect(),
            value: value.into(),
        }
    }

    pub fn id(&self) -> &LemmaId {
        &self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl TokenAnnotation for Lemma {
    fn token_ids(&self) -> &[TokenId] {
        &self.token_ids
    }
}

/// A part-of-speech tag. The tagset name lives on the layer, not on the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosTag {
    id: TagId,
    token_ids: SmallVec<[TokenId; 1]>,
    value: String,
}

impl PosTag {
    pub fn new(id: TagId, token_ids: impl IntoIterator<Item = TokenId>, value: impl Into<String>) -> Self {
        Self {
            id,
            token_ids: token_ids.into_iter().collect(),
            value: value.into(),
        }
    }

    pub fn id(&self) -> &TagId {
        &self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl TokenAnnotation for PosTag {
    fn token_ids(&self) -> &[TokenId] {
        &self.token_ids
    }
}

/// Word-sense disambiguation result (`wsd/ws`): lexical unit ids for some tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSense {
    token_ids: SmallVec<[TokenId; 1]>,
    lexical_units: Vec<String>,
}

impl WordSense {
    pub fn new(
        token_ids: impl IntoIterator<Item = TokenId>,
        lexical_units: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            token_ids: token_ids.into_iter().collect(),
            lexical_units: lexical_units.into_iter().collect(),
        }
    }

    pub fn lexical_units(&self) -> &[String] {
        &self.lexical_units
    }
}

impl TokenAnnotation for WordSense {
    fn token_ids(&self) -> &[TokenId] {
        &self.token_ids
    }
}

/// A structural span (`textstructure/textspan`) delimited by its first and last token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    bounds: [TokenId; 2],
    kind: Option<String>,
}

impl TextSpan {
    pub fn new(start: TokenId, end: TokenId, kind: Option<String>) -> Self {
        Self {
            bounds: [start, end],
            kind,
        }
    }

    pub fn start(&self) -> &TokenId {
        &self.bounds[0]
    }

    pub fn end(&self) -> &TokenId {
        &self.bounds[1]
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

impl TokenAnnotation for TextSpan {
    fn token_ids(&self) -> &[TokenId] {
        &self.bounds
    }
}
