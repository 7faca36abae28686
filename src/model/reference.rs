// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::annotation::TokenAnnotation;
use super::ids::{ReferenceId, TokenId};

/// One mention inside a coreference entity (`references/entity/reference`).
///
/// `target` points at the antecedent reference. Targets are plain ids and are only resolved
/// when a chain is followed, so a reference may point forward in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    id: ReferenceId,
    token_ids: Vec<TokenId>,
    kind: Option<String>,
    rel: Option<String>,
    target: Option<ReferenceId>,
}

impl Reference {
    pub fn new(id: ReferenceId, token_ids: Vec<TokenId>) -> Self {
        Self {
            id,
            token_ids,
            kind: None,
            rel: None,
            target: None,
        }
    }

    pub fn new_with(
        id: ReferenceId,
        token_ids: Vec<TokenId>,
        kind: Option<String>,
        rel: Option<String>,
        target: Option<ReferenceId>,
    ) -> Self {
        Self {
            id,
            token_ids,
            kind,
            rel,
            target,
        }
    }

    pub fn id(&self) -> &ReferenceId {
        &self.id
    }

    /// The TCF `type` attribute (e.g. `pro.per3`).
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn rel(&self) -> Option<&str> {
        self.rel.as_deref()
    }

    pub fn target(&self) -> Option<&ReferenceId> {
        self.target.as_ref()
    }

    pub fn set_target(&mut self, target: Option<ReferenceId>) {
        self.target = target;
    }
}

impl TokenAnnotation for Reference {
    fn token_ids(&self) -> &[TokenId] {
        &self.token_ids
    }
}

/// A coreference entity as appended by a producer: its mentions plus an optional link to
/// an external knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Coreference {
    extref: Option<String>,
    references: Vec<Reference>,
}

impl Coreference {
    pub fn new(references: Vec<Reference>) -> Self {
        Self {
            extref: None,
            references,
        }
    }

    pub fn with_extref(mut self, extref: impl Into<String>) -> Self {
        self.extref = Some(extref.into());
        self
    }

    pub fn extref(&self) -> Option<&str> {
        self.extref.as_deref()
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Vec<Reference>) {
        (self.extref, self.references)
    }
}
