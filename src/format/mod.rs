// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document format parsing/export.

pub mod tcf;

pub use tcf::{
    export_document, parse_document, parse_document_with, TcfExportError, TcfParseError,
};
