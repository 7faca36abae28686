// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LANG: &str = "de";
pub const DEFAULT_VERSION: &str = "0.4";

/// Per-document settings.
///
/// Every field has a default so partial JSON (`{"lang": "en"}`) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    /// `lang` attribute written on a new `TextCorpus`.
    pub lang: String,
    /// `version` attribute written on a new `D-Spin` root.
    pub version: String,
    /// Joins token texts when a span is rendered as a string.
    pub token_separator: String,
    /// One indentation step used when a layer is rendered from the model.
    pub indent: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANG.to_owned(),
            version: DEFAULT_VERSION.to_owned(),
            token_separator: " ".to_owned(),
            indent: "  ".to_owned(),
        }
    }
}

impl DocumentConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }
}
