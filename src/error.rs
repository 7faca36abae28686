// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural errors raised by the document model and its derived views.
//!
//! An absent optional annotation (no lemma, no named entity) is never an error; accessors
//! return `None` for that. Everything here means the document itself is inconsistent.

use smol_str::SmolStr;
use thiserror::Error;

use crate::model::ids::{IdError, IdKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("duplicate {kind} identifier: {id}")]
    DuplicateIdentifier { kind: IdKind, id: SmolStr },

    #[error("unknown {kind} identifier: {id}")]
    UnknownIdentifier { kind: IdKind, id: SmolStr },

    #[error("invalid identifier {id:?}: {reason}")]
    InvalidId { id: String, reason: IdError },

    #[error("malformed dependency parse {parse}: {reason}")]
    MalformedParse {
        parse: SmolStr,
        reason: MalformedParseReason,
    },

    #[error("dependency parse {parse} contains a cycle through token {token}")]
    CyclicParse { parse: SmolStr, token: SmolStr },

    #[error("token {token} is not part of dependency parse {parse}")]
    NotInParse { parse: SmolStr, token: SmolStr },

    #[error("reference chain starting at token {token} is cyclic (stopped at {reference})")]
    CyclicReference { token: SmolStr, reference: SmolStr },
}

impl DocumentError {
    pub(crate) fn unknown(kind: IdKind, id: &str) -> Self {
        Self::UnknownIdentifier {
            kind,
            id: SmolStr::new(id),
        }
    }

    pub(crate) fn invalid_id(id: &str, reason: IdError) -> Self {
        Self::InvalidId {
            id: id.to_owned(),
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedParseReason {
    #[error("no root token")]
    NoRoot,
    #[error("multiple root tokens: {}", .roots.join(", "))]
    MultipleRoots { roots: Vec<SmolStr> },
    #[error("token {token} has more than one governor")]
    MultipleGovernors { token: SmolStr },
    #[error("token {token} is not connected to the root")]
    Disconnected { token: SmolStr },
}
