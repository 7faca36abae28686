// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only views over a document.
//!
//! Every query borrows the document and resolves ids through its index on demand; none of
//! them caches across calls.

pub mod dependency;
pub mod named_entity;
pub mod semantic;
pub mod token;

pub use dependency::DependencyTree;
pub use named_entity::{named_entity, Span, SpanSource};
pub use semantic::{semantic_label, semantic_unit, Unit};
pub use token::{DependencyNode, TokenRef};
