// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: typed ids, annotation entities, layers and the document that owns them.
//!
//! Annotations never hold pointers to each other. Every cross-reference is an id that is
//! resolved through the [`IdentifierIndex`] at lookup time.

pub mod annotation;
pub mod dependency;
pub mod document;
pub mod entity;
pub mod ids;
pub mod index;
pub mod layer;
pub mod reference;
pub mod token;

pub use annotation::{Lemma, PosTag, Sentence, TextSpan, TokenAnnotation, WordSense};
pub use dependency::{Dependency, Parse};
pub use document::{Annotation, Document};
pub(crate) use document::Frame;
pub use entity::NamedEntity;
pub use ids::{
    join_id_list, parse_id_list, EntityId, EntityIdTag, Id, IdError, IdKind, IdScope, LemmaId,
    LemmaIdTag, ParseId, ParseIdTag, ReferenceId, ReferenceIdTag, SentenceId, SentenceIdTag,
    TagId, TagIdTag, TokenId, TokenIdTag,
};
pub use index::{Handle, IdentifierIndex};
pub use layer::{
    AnnotationLayer, CorefEntity, DepParsingLayer, LayerHeader, LayerKind, LayerRef, LayerSlot,
    LayerStore, LemmaLayer, NamedEntityLayer, OpaqueLayer, PosTagLayer, RawLayer,
    ReferenceLayer, SentenceLayer, TextLayer, TextStructureLayer, TokenIndex, TokenLayer,
    UnknownLayerName, UnmodelledChild, WsdLayer,
};
pub use reference::{Coreference, Reference};
pub use token::{CharOffsets, Token};
