// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::annotation::TokenAnnotation;
use super::ids::{EntityId, TokenId};

/// A named-entity mention (`namedEntities/entity`).
///
/// Token ids are kept in source-declared order; resolvers sort by token position when they
/// need document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedEntity {
    id: EntityId,
    class: Option<String>,
    token_ids: Vec<TokenId>,
}

impl NamedEntity {
    pub fn new(id: EntityId, class: Option<String>, token_ids: Vec<TokenId>) -> Self {
        Self {
            id,
            class,
            token_ids,
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn set_class<T: Into<String>>(&mut self, class: Option<T>) {
        self.class = class.map(Into::into);
    }
}

impl TokenAnnotation for NamedEntity {
    fn token_ids(&self) -> &[TokenId] {
        &self.token_ids
    }
}
