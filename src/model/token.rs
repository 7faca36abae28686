// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::TokenId;

/// Character offsets of a token into the `text` layer (TCF `charOffsets`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharOffsets {
    pub start: usize,
    pub end: usize,
}

/// The atomic unit every other layer points at.
///
/// Tokens never carry their annotations; lemmas, tags and the rest attach to a token by
/// listing its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    id: TokenId,
    text: String,
    offsets: Option<CharOffsets>,
}

impl Token {
    pub fn new(id: TokenId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            offsets: None,
        }
    }

    pub fn with_offsets(mut self, start: usize, end: usize) -> Self {
        self.offsets = Some(CharOffsets { start, end });
        self
    }

    pub fn id(&self) -> &TokenId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn offsets(&self) -> Option<CharOffsets> {
        self.offsets
    }
}
