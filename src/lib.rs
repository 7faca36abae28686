// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Standoff: a stand-off annotation model for TCF corpora.
//!
//! A [`Document`] owns independently addressable annotation layers over one token
//! sequence. Layers refer to each other only by id; the [`query`] module resolves those
//! ids into token views, named-entity spans, semantic units and dependency trees.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod pipeline;
pub mod query;

pub use config::DocumentConfig;
pub use error::{DocumentError, MalformedParseReason};
pub use format::tcf::{export_document, parse_document, parse_document_with};
pub use model::{Annotation, Document, LayerKind};
pub use pipeline::{FnStage, Pipeline, PipelineError, Stage, StageError};
pub use query::{semantic_unit, DependencyTree, Span, TokenRef, Unit};
