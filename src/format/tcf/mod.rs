// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! TCF (D-Spin text corpus format) reading and writing.

mod export;
mod parse;

pub use export::{export_document, TcfExportError};
pub use parse::{parse_document, parse_document_with, TcfParseError};

pub const ROOT_NS: &str = "http://www.dspin.de/data";
pub const METADATA_NS: &str = "http://www.dspin.de/data/metadata";
pub const CORPUS_NS: &str = "http://www.dspin.de/data/textcorpus";

pub(crate) const ROOT_ELEMENT: &str = "D-Spin";
pub(crate) const CORPUS_ELEMENT: &str = "TextCorpus";
