// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use smol_str::SmolStr;

use super::ids::{validate_id, IdKind};
use crate::error::DocumentError;

/// Position of an entity inside its layer's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(usize);

impl Handle {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Maps `(kind, id)` to the arena handle of the entity carrying that id.
///
/// The index is owned by the [`Document`](super::Document) next to the layers and is
/// updated in the same call that appends to a layer, so a lookup always sees the latest
/// insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierIndex {
    scopes: HashMap<IdKind, HashMap<SmolStr, Handle>>,
}

impl IdentifierIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects ids that could not round-trip through a `tokenIDs` list.
    pub fn register(&mut self, kind: IdKind, id: &str, handle: Handle) -> Result<(), DocumentError> {
        validate_id(id).map_err(|reason| DocumentError::invalid_id(id, reason))?;
        let scope = self.scopes.entry(kind).or_default();
        if scope.contains_key(id) {
            return Err(DocumentError::DuplicateIdentifier {
                kind,
                id: SmolStr::new(id),
            });
        }
        scope.insert(SmolStr::new(id), handle);
        Ok(())
    }

    pub fn resolve(&self, kind: IdKind, id: &str) -> Result<Handle, DocumentError> {
        match self.get(kind, id) {
            Some(handle) => Ok(handle),
            None => {
                validate_id(id).map_err(|reason| DocumentError::invalid_id(id, reason))?;
                Err(DocumentError::unknown(kind, id))
            }
        }
    }

    pub fn get(&self, kind: IdKind, id: &str) -> Option<Handle> {
        self.scopes.get(&kind)?.get(id).copied()
    }

    pub fn contains(&self, kind: IdKind, id: &str) -> bool {
        self.get(kind, id).is_some()
    }

    /// Fails the same way [`register`](Self::register) would, without inserting.
    pub fn ensure_vacant(&self, kind: IdKind, id: &str) -> Result<(), DocumentError> {
        if self.contains(kind, id) {
            return Err(DocumentError::DuplicateIdentifier {
                kind,
                id: SmolStr::new(id),
            });
        }
        Ok(())
    }

    pub fn len(&self, kind: IdKind) -> usize {
        self.scopes.get(&kind).map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.values().all(HashMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, IdentifierIndex};
    use crate::error::DocumentError;
    use crate::model::ids::{IdError, IdKind};

    #[test]
    fn register_then_resolve() {
        let mut index = IdentifierIndex::new();
        index
            .register(IdKind::Token, "t_0", Handle::new(0))
            .expect("register");

        assert_eq!(index.resolve(IdKind::Token, "t_0"), Ok(Handle::new(0)));
        assert_eq!(index.len(IdKind::Token), 1);
    }

    #[test]
    fn duplicate_registration_is_rejected_and_keeps_the_first_mapping() {
        let mut index = IdentifierIndex::new();
        index
            .register(IdKind::Lemma, "le_0", Handle::new(0))
            .expect("register");

        let err = index
            .register(IdKind::Lemma, "le_0", Handle::new(7))
            .unwrap_err();
        assert!(matches!(err, DocumentError::DuplicateIdentifier { kind: IdKind::Lemma, .. }));
        assert_eq!(index.get(IdKind::Lemma, "le_0"), Some(Handle::new(0)));
    }

    #[test]
    fn ids_are_scoped_by_kind() {
        let mut index = IdentifierIndex::new();
        index
            .register(IdKind::Lemma, "x_0", Handle::new(0))
            .expect("lemma");
        index
            .register(IdKind::Tag, "x_0", Handle::new(3))
            .expect("same id, other kind");

        assert_eq!(index.get(IdKind::Tag, "x_0"), Some(Handle::new(3)));
        assert_eq!(
            index.resolve(IdKind::Token, "x_0"),
            Err(DocumentError::UnknownIdentifier {
                kind: IdKind::Token,
                id: "x_0".into(),
            })
        );
    }

    #[test]
    fn malformed_ids_are_rejected_on_both_sides() {
        let mut index = IdentifierIndex::new();

        assert_eq!(
            index.register(IdKind::Token, "t 0", Handle::new(0)),
            Err(DocumentError::InvalidId {
                id: "t 0".to_owned(),
                reason: IdError::ContainsWhitespace,
            })
        );
        assert!(index.is_empty());
        assert_eq!(
            index.resolve(IdKind::Token, ""),
            Err(DocumentError::InvalidId {
                id: String::new(),
                reason: IdError::Empty,
            })
        );
    }
}
