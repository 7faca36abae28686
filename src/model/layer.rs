// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;
use smol_str::SmolStr;

use super::annotation::{Lemma, PosTag, Sentence, TextSpan, TokenAnnotation, WordSense};
use super::dependency::Parse;
use super::entity::NamedEntity;
use super::index::Handle;
use super::reference::Reference;
use super::token::Token;

/// The annotation layers this crate understands, in TCF schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    Text,
    Tokens,
    Sentences,
    Lemmas,
    PosTags,
    NamedEntities,
    References,
    DepParsing,
    TextStructure,
    Wsd,
}

impl LayerKind {
    pub const ALL: [LayerKind; 10] = [
        Self::Text,
        Self::Tokens,
        Self::Sentences,
        Self::Lemmas,
        Self::PosTags,
        Self::NamedEntities,
        Self::References,
        Self::DepParsing,
        Self::TextStructure,
        Self::Wsd,
    ];

    /// The local element name inside `TextCorpus`.
    pub fn element_name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Tokens => "tokens",
            Self::Sentences => "sentences",
            Self::Lemmas => "lemmas",
            Self::PosTags => "POStags",
            Self::NamedEntities => "namedEntities",
            Self::References => "references",
            Self::DepParsing => "depparsing",
            Self::TextStructure => "textstructure",
            Self::Wsd => "wsd",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLayerName;

impl fmt::Display for UnknownLayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown layer element name")
    }
}

impl std::error::Error for UnknownLayerName {}

impl FromStr for LayerKind {
    type Err = UnknownLayerName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.element_name() == s)
            .ok_or(UnknownLayerName)
    }
}

/// Verbatim source of a layer read from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLayer {
    /// Everything between the previous sibling (or the `TextCorpus` start tag) and this layer.
    pub leading: String,
    /// The layer element itself, byte-for-byte.
    pub element: String,
}

/// A child element read from a layer that has no counterpart in the model
/// (`emptytoken` inside a `parse`, a `textspan` without `start`, vendor extensions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmodelledChild {
    /// Entry the element sits in (the `n`th parse or coreference entity), or `None` for a
    /// direct child of the layer element.
    pub parent: Option<usize>,
    /// Number of modelled siblings in front of it.
    pub before: usize,
    /// The element, byte-for-byte.
    pub element: String,
}

/// Layer-level attributes plus the bookkeeping the serializer needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayerHeader {
    attributes: Vec<(SmolStr, String)>,
    raw: Option<RawLayer>,
    unmodelled: Vec<UnmodelledChild>,
    dirty: bool,
}

impl LayerHeader {
    pub fn attributes(&self) -> &[(SmolStr, String)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets or clears an attribute, keeping the position of an existing one.
    pub fn set_attribute<T: Into<String>>(&mut self, name: &str, value: Option<T>) {
        let position = self.attributes.iter().position(|(key, _)| key == name);
        match (position, value) {
            (Some(idx), Some(value)) => self.attributes[idx].1 = value.into(),
            (Some(idx), None) => {
                self.attributes.remove(idx);
            }
            (None, Some(value)) => self.attributes.push((SmolStr::new(name), value.into())),
            (None, None) => return,
        }
        self.dirty = true;
    }

    pub fn raw(&self) -> Option<&RawLayer> {
        self.raw.as_ref()
    }

    /// `true` once the layer no longer matches its verbatim source (or never had one).
    pub fn is_dirty(&self) -> bool {
        self.dirty || self.raw.is_none()
    }

    pub(crate) fn touch(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn attach_raw(&mut self, raw: RawLayer) {
        self.raw = Some(raw);
        self.dirty = false;
    }

    pub(crate) fn push_attribute(&mut self, name: SmolStr, value: String) {
        self.attributes.push((name, value));
    }

    /// Child elements kept from the source that rendering has to put back.
    pub fn unmodelled(&self) -> &[UnmodelledChild] {
        &self.unmodelled
    }

    /// Unmodelled children of `parent` that sit in front of modelled sibling `before`.
    pub fn unmodelled_at(
        &self,
        parent: Option<usize>,
        before: usize,
    ) -> impl Iterator<Item = &str> + '_ {
        self.unmodelled
            .iter()
            .filter(move |child| child.parent == parent && child.before == before)
            .map(|child| child.element.as_str())
    }

    /// Unmodelled children of `parent` behind its first `len` modelled siblings.
    pub fn unmodelled_after(
        &self,
        parent: Option<usize>,
        len: usize,
    ) -> impl Iterator<Item = &str> + '_ {
        self.unmodelled
            .iter()
            .filter(move |child| child.parent == parent && child.before >= len)
            .map(|child| child.element.as_str())
    }

    pub(crate) fn keep_unmodelled(&mut self, children: Vec<UnmodelledChild>) {
        self.unmodelled = children;
    }
}

/// Token id -> handles of the entries listing it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenIndex {
    entries: HashMap<SmolStr, SmallVec<[Handle; 1]>>,
}

impl TokenIndex {
    pub fn insert(&mut self, token_id: &SmolStr, handle: Handle) {
        let slot = self.entries.entry(token_id.clone()).or_default();
        if !slot.contains(&handle) {
            slot.push(handle);
        }
    }

    pub fn get(&self, token_id: &str) -> &[Handle] {
        self.entries.get(token_id).map(|handles| handles.as_slice()).unwrap_or(&[])
    }
}

/// An ordered collection of one kind of token annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationLayer<E> {
    header: LayerHeader,
    items: Vec<E>,
    by_token: TokenIndex,
}

impl<E> Default for AnnotationLayer<E> {
    fn default() -> Self {
        Self {
            header: LayerHeader::default(),
            items: Vec::new(),
            by_token: TokenIndex::default(),
        }
    }
}

impl<E: TokenAnnotation> AnnotationLayer<E> {
    pub fn header(&self) -> &LayerHeader {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut LayerHeader {
        &mut self.header
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.items.iter()
    }

    pub fn get(&self, handle: Handle) -> Option<&E> {
        self.items.get(handle.index())
    }

    /// Entries mentioning `token_id`, in insertion order.
    pub fn for_token<'a>(&'a self, token_id: &str) -> impl Iterator<Item = &'a E> + 'a {
        self.by_token
            .get(token_id)
            .iter()
            .filter_map(move |handle| self.items.get(handle.index()))
    }

    pub fn first_for_token(&self, token_id: &str) -> Option<&E> {
        self.for_token(token_id).next()
    }

    pub(crate) fn next_handle(&self) -> Handle {
        Handle::new(self.items.len())
    }

    pub(crate) fn push(&mut self, item: E) -> Handle {
        let handle = self.next_handle();
        for token_id in item.token_ids() {
            self.by_token.insert(token_id.as_smol_str(), handle);
        }
        self.items.push(item);
        self.header.touch();
        handle
    }
}

impl<'a, E> IntoIterator for &'a AnnotationLayer<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

pub type SentenceLayer = AnnotationLayer<Sentence>;
pub type LemmaLayer = AnnotationLayer<Lemma>;
pub type PosTagLayer = AnnotationLayer<PosTag>;
pub type NamedEntityLayer = AnnotationLayer<NamedEntity>;
pub type DepParsingLayer = AnnotationLayer<Parse>;
pub type TextStructureLayer = AnnotationLayer<TextSpan>;
pub type WsdLayer = AnnotationLayer<WordSense>;

/// The token sequence. Position in the vector is the token position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenLayer {
    header: LayerHeader,
    tokens: Vec<Token>,
}

impl TokenLayer {
    pub fn header(&self) -> &LayerHeader {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut LayerHeader {
        &mut self.header
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn get(&self, handle: Handle) -> Option<&Token> {
        self.tokens.get(handle.index())
    }

    pub(crate) fn push(&mut self, token: Token) -> Handle {
        let handle = Handle::new(self.tokens.len());
        self.tokens.push(token);
        self.header.touch();
        handle
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextLayer {
    header: LayerHeader,
    text: String,
}

impl TextLayer {
    pub fn header(&self) -> &LayerHeader {
        &self.header
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
        self.header.touch();
    }
}

/// A coreference entity as stored: handles into [`ReferenceLayer::references`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CorefEntity {
    extref: Option<String>,
    references: Vec<Handle>,
}

impl CorefEntity {
    pub fn extref(&self) -> Option<&str> {
        self.extref.as_deref()
    }

    pub fn references(&self) -> &[Handle] {
        &self.references
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferenceLayer {
    header: LayerHeader,
    entities: Vec<CorefEntity>,
    references: AnnotationLayer<Reference>,
    owners: Vec<usize>,
}

impl ReferenceLayer {
    pub fn header(&self) -> &LayerHeader {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut LayerHeader {
        &mut self.header
    }

    pub fn entities(&self) -> &[CorefEntity] {
        &self.entities
    }

    /// Total number of reference entries across all entities.
    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn references(&self) -> std::slice::Iter<'_, Reference> {
        self.references.iter()
    }

    pub fn get(&self, handle: Handle) -> Option<&Reference> {
        self.references.get(handle)
    }

    pub fn entity_of(&self, handle: Handle) -> Option<&CorefEntity> {
        let owner = *self.owners.get(handle.index())?;
        self.entities.get(owner)
    }

    /// The reference a token stands in.
    ///
    /// A token listed by several references (nested mentions such as "his" inside "his
    /// mother") resolves to the one with the fewest tokens, earliest first on ties.
    pub fn reference_for_token(&self, token_id: &str) -> Option<(Handle, &Reference)> {
        self.references
            .by_token
            .get(token_id)
            .iter()
            .filter_map(|handle| Some((*handle, self.references.get(*handle)?)))
            .min_by_key(|(handle, reference)| (reference.token_ids().len(), handle.index()))
    }

    pub(crate) fn next_handle(&self) -> Handle {
        self.references.next_handle()
    }

    pub(crate) fn push_entity(&mut self, extref: Option<String>, references: Vec<Reference>) -> Handle {
        let owner = self.entities.len();
        let mut handles = Vec::with_capacity(references.len());
        for reference in references {
            handles.push(self.references.push(reference));
            self.owners.push(owner);
        }
        self.entities.push(CorefEntity {
            extref,
            references: handles,
        });
        self.header.touch();
        Handle::new(owner)
    }
}

/// A layer this crate does not model. It is carried through serialization untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueLayer {
    name: SmolStr,
    raw: RawLayer,
}

impl OpaqueLayer {
    pub fn new(name: impl Into<SmolStr>, raw: RawLayer) -> Self {
        Self {
            name: name.into(),
            raw,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw(&self) -> &RawLayer {
        &self.raw
    }
}

/// Serialization order entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerSlot {
    Known(LayerKind),
    Opaque(usize),
}

/// Borrowed view of any known layer.
#[derive(Debug, Clone, Copy)]
pub enum LayerRef<'a> {
    Text(&'a TextLayer),
    Tokens(&'a TokenLayer),
    Sentences(&'a SentenceLayer),
    Lemmas(&'a LemmaLayer),
    PosTags(&'a PosTagLayer),
    NamedEntities(&'a NamedEntityLayer),
    References(&'a ReferenceLayer),
    DepParsing(&'a DepParsingLayer),
    TextStructure(&'a TextStructureLayer),
    Wsd(&'a WsdLayer),
}

impl<'a> LayerRef<'a> {
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Text(_) => LayerKind::Text,
            Self::Tokens(_) => LayerKind::Tokens,
            Self::Sentences(_) => LayerKind::Sentences,
            Self::Lemmas(_) => LayerKind::Lemmas,
            Self::PosTags(_) => LayerKind::PosTags,
            Self::NamedEntities(_) => LayerKind::NamedEntities,
            Self::References(_) => LayerKind::References,
            Self::DepParsing(_) => LayerKind::DepParsing,
            Self::TextStructure(_) => LayerKind::TextStructure,
            Self::Wsd(_) => LayerKind::Wsd,
        }
    }

    pub fn header(&self) -> &'a LayerHeader {
        match *self {
            Self::Text(layer) => layer.header(),
            Self::Tokens(layer) => layer.header(),
            Self::Sentences(layer) => layer.header(),
            Self::Lemmas(layer) => layer.header(),
            Self::PosTags(layer) => layer.header(),
            Self::NamedEntities(layer) => layer.header(),
            Self::References(layer) => layer.header(),
            Self::DepParsing(layer) => layer.header(),
            Self::TextStructure(layer) => layer.header(),
            Self::Wsd(layer) => layer.header(),
        }
    }
}

/// Owns every layer of a document, at most one per [`LayerKind`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayerStore {
    text: Option<TextLayer>,
    tokens: Option<TokenLayer>,
    sentences: Option<SentenceLayer>,
    lemmas: Option<LemmaLayer>,
    pos_tags: Option<PosTagLayer>,
    named_entities: Option<NamedEntityLayer>,
    references: Option<ReferenceLayer>,
    dep_parsing: Option<DepParsingLayer>,
    text_structure: Option<TextStructureLayer>,
    wsd: Option<WsdLayer>,
    opaque: Vec<OpaqueLayer>,
    order: Vec<LayerSlot>,
}

impl LayerStore {
    pub fn contains(&self, kind: LayerKind) -> bool {
        self.layer(kind).is_some()
    }

    pub fn layer(&self, kind: LayerKind) -> Option<LayerRef<'_>> {
        Some(match kind {
            LayerKind::Text => LayerRef::Text(self.text.as_ref()?),
            LayerKind::Tokens => LayerRef::Tokens(self.tokens.as_ref()?),
            LayerKind::Sentences => LayerRef::Sentences(self.sentences.as_ref()?),
            LayerKind::Lemmas => LayerRef::Lemmas(self.lemmas.as_ref()?),
            LayerKind::PosTags => LayerRef::PosTags(self.pos_tags.as_ref()?),
            LayerKind::NamedEntities => LayerRef::NamedEntities(self.named_entities.as_ref()?),
            LayerKind::References => LayerRef::References(self.references.as_ref()?),
            LayerKind::DepParsing => LayerRef::DepParsing(self.dep_parsing.as_ref()?),
            LayerKind::TextStructure => LayerRef::TextStructure(self.text_structure.as_ref()?),
            LayerKind::Wsd => LayerRef::Wsd(self.wsd.as_ref()?),
        })
    }

    /// Layers in serialization order: parsed layers as they appeared, then added ones.
    pub fn slots(&self) -> &[LayerSlot] {
        &self.order
    }

    pub fn opaque(&self) -> &[OpaqueLayer] {
        &self.opaque
    }

    pub fn text(&self) -> Option<&TextLayer> {
        self.text.as_ref()
    }

    pub fn tokens(&self) -> Option<&TokenLayer> {
        self.tokens.as_ref()
    }

    pub fn sentences(&self) -> Option<&SentenceLayer> {
        self.sentences.as_ref()
    }

    pub fn lemmas(&self) -> Option<&LemmaLayer> {
        self.lemmas.as_ref()
    }

    pub fn pos_tags(&self) -> Option<&PosTagLayer> {
        self.pos_tags.as_ref()
    }

    pub fn named_entities(&self) -> Option<&NamedEntityLayer> {
        self.named_entities.as_ref()
    }

    pub fn references(&self) -> Option<&ReferenceLayer> {
        self.references.as_ref()
    }

    pub fn dep_parsing(&self) -> Option<&DepParsingLayer> {
        self.dep_parsing.as_ref()
    }

    pub fn text_structure(&self) -> Option<&TextStructureLayer> {
        self.text_structure.as_ref()
    }

    pub fn wsd(&self) -> Option<&WsdLayer> {
        self.wsd.as_ref()
    }

    /// Idempotent: an existing layer of `kind` is returned as-is.
    pub(crate) fn ensure(&mut self, kind: LayerKind) -> &mut LayerHeader {
        if !self.contains(kind) {
            self.order.push(LayerSlot::Known(kind));
        }
        match kind {
            LayerKind::Text => &mut self.text.get_or_insert_with(Default::default).header,
            LayerKind::Tokens => &mut self.tokens.get_or_insert_with(Default::default).header,
            LayerKind::Sentences => &mut self.sentences.get_or_insert_with(Default::default).header,
            LayerKind::Lemmas => &mut self.lemmas.get_or_insert_with(Default::default).header,
            LayerKind::PosTags => &mut self.pos_tags.get_or_insert_with(Default::default).header,
            LayerKind::NamedEntities => {
                &mut self.named_entities.get_or_insert_with(Default::default).header
            }
            LayerKind::References => &mut self.references.get_or_insert_with(Default::default).header,
            LayerKind::DepParsing => &mut self.dep_parsing.get_or_insert_with(Default::default).header,
            LayerKind::TextStructure => {
                &mut self.text_structure.get_or_insert_with(Default::default).header
            }
            LayerKind::Wsd => &mut self.wsd.get_or_insert_with(Default::default).header,
        }
    }

    pub(crate) fn text_mut(&mut self) -> &mut TextLayer {
        self.ensure(LayerKind::Text);
        self.text.get_or_insert_with(Default::default)
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut TokenLayer {
        self.ensure(LayerKind::Tokens);
        self.tokens.get_or_insert_with(Default::default)
    }

    pub(crate) fn sentences_mut(&mut self) -> &mut SentenceLayer {
        self.ensure(LayerKind::Sentences);
        self.sentences.get_or_insert_with(Default::default)
    }

    pub(crate) fn lemmas_mut(&mut self) -> &mut LemmaLayer {
        self.ensure(LayerKind::Lemmas);
        self.lemmas.get_or_insert_with(Default::default)
    }

    pub(crate) fn pos_tags_mut(&mut self) -> &mut PosTagLayer {
        self.ensure(LayerKind::PosTags);
        self.pos_tags.get_or_insert_with(Default::default)
    }

    pub(crate) fn named_entities_mut(&mut self) -> &mut NamedEntityLayer {
        self.ensure(LayerKind::NamedEntities);
        self.named_entities.get_or_insert_with(Default::default)
    }

    pub(crate) fn references_mut(&mut self) -> &mut ReferenceLayer {
        self.ensure(LayerKind::References);
        self.references.get_or_insert_with(Default::default)
    }

    pub(crate) fn dep_parsing_mut(&mut self) -> &mut DepParsingLayer {
        self.ensure(LayerKind::DepParsing);
        self.dep_parsing.get_or_insert_with(Default::default)
    }

    pub(crate) fn text_structure_mut(&mut self) -> &mut TextStructureLayer {
        self.ensure(LayerKind::TextStructure);
        self.text_structure.get_or_insert_with(Default::default)
    }

    pub(crate) fn wsd_mut(&mut self) -> &mut WsdLayer {
        self.ensure(LayerKind::Wsd);
        self.wsd.get_or_insert_with(Default::default)
    }

    pub(crate) fn push_opaque(&mut self, layer: OpaqueLayer) {
        self.order.push(LayerSlot::Opaque(self.opaque.len()));
        self.opaque.push(layer);
    }
}
