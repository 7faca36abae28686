// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;

use super::dependency::DependencyTree;
use super::semantic::{semantic_unit, Unit};
use crate::error::DocumentError;
use crate::model::{
    CharOffsets, Dependency, Document, Handle, IdKind, Lemma, NamedEntity, Parse, PosTag,
    Reference, Sentence, Token, TokenId,
};

/// A token viewed through its document.
///
/// Every accessor is a fresh index lookup scoped to one layer; nothing is cached, so a
/// `TokenRef` taken before an append never reports stale data once re-obtained.
#[derive(Clone, Copy)]
pub struct TokenRef<'a> {
    doc: &'a Document,
    handle: Handle,
    token: &'a Token,
}

impl<'a> TokenRef<'a> {
    pub(crate) fn new(doc: &'a Document, handle: Handle) -> Option<Self> {
        let token = doc.layers().tokens()?.get(handle)?;
        Some(Self { doc, handle, token })
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn token(&self) -> &'a Token {
        self.token
    }

    pub fn id(&self) -> &'a TokenId {
        self.token.id()
    }

    pub fn text(&self) -> &'a str {
        self.token.text()
    }

    /// 0-based position in the token layer.
    pub fn position(&self) -> usize {
        self.handle.index()
    }

    pub fn char_offsets(&self) -> Option<CharOffsets> {
        self.token.offsets()
    }

    pub fn lemma(&self) -> Option<&'a Lemma> {
        self.doc.layers().lemmas()?.first_for_token(self.id().as_str())
    }

    pub fn tag(&self) -> Option<&'a PosTag> {
        self.doc.layers().pos_tags()?.first_for_token(self.id().as_str())
    }

    /// The POS tagset name declared on the layer (e.g. `stts`).
    pub fn tagset(&self) -> Option<&'a str> {
        self.doc.layers().pos_tags()?.header().attribute("tagset")
    }

    /// The named-entity mention containing this token.
    ///
    /// See [`named_entity`](super::named_entity::named_entity) for the resolved span.
    pub fn named_entity(&self) -> Option<&'a NamedEntity> {
        let handle = self
            .doc
            .index()
            .get(IdKind::NamedEntityMember, self.id().as_str())?;
        self.doc.layers().named_entities()?.get(handle)
    }

    pub fn sentence(&self) -> Option<&'a Sentence> {
        self.doc.layers().sentences()?.first_for_token(self.id().as_str())
    }

    /// The reference this token stands in, if any (the innermost one for nested mentions).
    pub fn reference(&self) -> Option<&'a Reference> {
        let (_, reference) = self
            .doc
            .layers()
            .references()?
            .reference_for_token(self.id().as_str())?;
        Some(reference)
    }

    /// Lexical units from the `wsd` layer; empty when the token has none.
    pub fn word_senses(&self) -> &'a [String] {
        self.doc
            .layers()
            .wsd()
            .and_then(|layer| layer.first_for_token(self.id().as_str()))
            .map(|sense| sense.lexical_units())
            .unwrap_or(&[])
    }

    pub fn dependency_node(&self) -> Option<DependencyNode<'a>> {
        let id = self.id().as_str();
        let parse = self.doc.layers().dep_parsing()?.first_for_token(id)?;
        Some(DependencyNode {
            token: *self,
            parse,
            dependency: parse.dependencies_of(id).next(),
        })
    }

    pub fn semantic_unit(&self) -> Result<Unit<'a>, DocumentError> {
        semantic_unit(*self)
    }
}

impl PartialEq for TokenRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.doc, other.doc) && self.handle == other.handle
    }
}

impl Eq for TokenRef<'_> {}

impl Hash for TokenRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
    }
}

/// Document order. Only meaningful between tokens of the same document.
impl PartialOrd for TokenRef<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TokenRef<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.handle.cmp(&other.handle)
    }
}

impl fmt::Debug for TokenRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRef")
            .field("id", &self.id().as_str())
            .field("position", &self.position())
            .field("text", &self.text())
            .finish()
    }
}

impl fmt::Display for TokenRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A token's place in a dependency parse.
#[derive(Debug, Clone, Copy)]
pub struct DependencyNode<'a> {
    token: TokenRef<'a>,
    parse: &'a Parse,
    dependency: Option<&'a Dependency>,
}

impl<'a> DependencyNode<'a> {
    pub fn token(&self) -> TokenRef<'a> {
        self.token
    }

    pub fn parse(&self) -> &'a Parse {
        self.parse
    }

    /// The dependency element naming this token as dependent. `None` for a root that only
    /// ever appears as a governor.
    pub fn dependency(&self) -> Option<&'a Dependency> {
        self.dependency
    }

    pub fn function(&self) -> Option<&'a str> {
        self.dependency?.function()
    }

    pub fn governor(&self) -> Option<TokenRef<'a>> {
        let governor = self.dependency?.governors().first()?;
        self.token.document().token(governor.as_str())
    }

    pub fn tree(&self) -> Result<DependencyTree<'a>, DocumentError> {
        DependencyTree::new(self.token.document(), self.parse)
    }
}
