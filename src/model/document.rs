// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use tracing::trace;

use super::annotation::{Lemma, PosTag, Sentence, TextSpan, TokenAnnotation, WordSense};
use super::dependency::Parse;
use super::entity::NamedEntity;
use super::ids::{Id, IdKind, IdScope, TokenId};
use super::index::{Handle, IdentifierIndex};
use super::layer::{LayerHeader, LayerKind, LayerRef, LayerStore};
use super::reference::Coreference;
use super::token::Token;
use crate::config::DocumentConfig;
use crate::error::DocumentError;
use crate::query::token::TokenRef;

/// The closed set of entities a producer can add to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    Text(String),
    Token(Token),
    Sentence(Sentence),
    Lemma(Lemma),
    PosTag(PosTag),
    NamedEntity(NamedEntity),
    Coreference(Coreference),
    Parse(Parse),
    TextSpan(TextSpan),
    WordSense(WordSense),
}

impl Annotation {
    pub fn layer_kind(&self) -> LayerKind {
        match self {
            Self::Text(_) => LayerKind::Text,
            Self::Token(_) => LayerKind::Tokens,
            Self::Sentence(_) => LayerKind::Sentences,
            Self::Lemma(_) => LayerKind::Lemmas,
            Self::PosTag(_) => LayerKind::PosTags,
            Self::NamedEntity(_) => LayerKind::NamedEntities,
            Self::Coreference(_) => LayerKind::References,
            Self::Parse(_) => LayerKind::DepParsing,
            Self::TextSpan(_) => LayerKind::TextStructure,
            Self::WordSense(_) => LayerKind::Wsd,
        }
    }
}

impl From<Token> for Annotation {
    fn from(value: Token) -> Self {
        Self::Token(value)
    }
}

impl From<Sentence> for Annotation {
    fn from(value: Sentence) -> Self {
        Self::Sentence(value)
    }
}

impl From<Lemma> for Annotation {
    fn from(value: Lemma) -> Self {
        Self::Lemma(value)
    }
}

impl From<PosTag> for Annotation {
    fn from(value: PosTag) -> Self {
        Self::PosTag(value)
    }
}

impl From<NamedEntity> for Annotation {
    fn from(value: NamedEntity) -> Self {
        Self::NamedEntity(value)
    }
}

impl From<Coreference> for Annotation {
    fn from(value: Coreference) -> Self {
        Self::Coreference(value)
    }
}

impl From<Parse> for Annotation {
    fn from(value: Parse) -> Self {
        Self::Parse(value)
    }
}

impl From<TextSpan> for Annotation {
    fn from(value: TextSpan) -> Self {
        Self::TextSpan(value)
    }
}

impl From<WordSense> for Annotation {
    fn from(value: WordSense) -> Self {
        Self::WordSense(value)
    }
}

/// Document text surrounding the layers, kept verbatim when the document was parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frame {
    /// Everything up to and including the `TextCorpus` start tag.
    pub(crate) prolog: String,
    /// Whitespace after the last layer, the `TextCorpus` end tag and everything after it.
    pub(crate) epilogue: String,
    /// The whole input when `TextCorpus` was self-closing. Emitted as-is while no layer
    /// has been added.
    pub(crate) collapsed: Option<String>,
    /// Namespace prefix of the `TextCorpus` element (`tc` for `<tc:TextCorpus>`).
    /// Rendered layers carry the same prefix.
    pub(crate) prefix: Option<String>,
}

/// A TCF text corpus: the layer store plus the identifier index over it.
///
/// All mutation goes through [`Document::append`], which validates ids before touching any
/// layer and registers them in the same call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    config: DocumentConfig,
    lang: Option<String>,
    frame: Option<Frame>,
    layers: LayerStore,
    index: IdentifierIndex,
}

impl Document {
    pub fn new(config: DocumentConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// The `lang` of the corpus: as read from the input, else the configured one.
    pub fn lang(&self) -> &str {
        self.lang.as_deref().unwrap_or(&self.config.lang)
    }

    pub fn layers(&self) -> &LayerStore {
        &self.layers
    }

    pub fn index(&self) -> &IdentifierIndex {
        &self.index
    }

    pub fn layer(&self, kind: LayerKind) -> Option<LayerRef<'_>> {
        self.layers.layer(kind)
    }

    /// Returns the layer header of `kind`, creating an empty layer first if needed.
    pub fn add_layer(&mut self, kind: LayerKind) -> &mut LayerHeader {
        self.layers.ensure(kind)
    }

    pub fn append(&mut self, annotation: impl Into<Annotation>) -> Result<Handle, DocumentError> {
        let annotation = annotation.into();
        let kind = annotation.layer_kind();
        let handle = match annotation {
            Annotation::Text(text) => {
                self.layers.text_mut().set_text(text);
                Handle::new(0)
            }
            Annotation::Token(token) => {
                self.index.ensure_vacant(IdKind::Token, token.id().as_str())?;
                let id = token.id().as_smol_str().clone();
                let handle = self.layers.tokens_mut().push(token);
                self.index.register(IdKind::Token, &id, handle)?;
                handle
            }
            Annotation::Sentence(sentence) => {
                self.index.ensure_vacant(IdKind::Sentence, sentence.id().as_str())?;
                let id = sentence.id().as_smol_str().clone();
                let handle = self.layers.sentences_mut().push(sentence);
                self.index.register(IdKind::Sentence, &id, handle)?;
                handle
            }
            Annotation::Lemma(lemma) => {
                self.index.ensure_vacant(IdKind::Lemma, lemma.id().as_str())?;
                let id = lemma.id().as_smol_str().clone();
                let handle = self.layers.lemmas_mut().push(lemma);
                self.index.register(IdKind::Lemma, &id, handle)?;
                handle
            }
            Annotation::PosTag(tag) => {
                self.index.ensure_vacant(IdKind::Tag, tag.id().as_str())?;
                let id = tag.id().as_smol_str().clone();
                let handle = self.layers.pos_tags_mut().push(tag);
                self.index.register(IdKind::Tag, &id, handle)?;
                handle
            }
            Annotation::NamedEntity(entity) => self.append_named_entity(entity)?,
            Annotation::Coreference(coreference) => self.append_coreference(coreference)?,
            Annotation::Parse(parse) => {
                self.index.ensure_vacant(IdKind::Parse, parse.id().as_str())?;
                let id = parse.id().as_smol_str().clone();
                let handle = self.layers.dep_parsing_mut().push(parse);
                self.index.register(IdKind::Parse, &id, handle)?;
                handle
            }
            Annotation::TextSpan(span) => self.layers.text_structure_mut().push(span),
            Annotation::WordSense(sense) => self.layers.wsd_mut().push(sense),
        };
        trace!(layer = %kind, handle = handle.index(), "appended annotation");
        Ok(handle)
    }

    fn append_named_entity(&mut self, entity: NamedEntity) -> Result<Handle, DocumentError> {
        self.index.ensure_vacant(IdKind::NamedEntity, entity.id().as_str())?;
        let mut members = HashSet::new();
        for token_id in entity.token_ids() {
            self.index
                .ensure_vacant(IdKind::NamedEntityMember, token_id.as_str())?;
            if !members.insert(token_id.as_str()) {
                return Err(DocumentError::DuplicateIdentifier {
                    kind: IdKind::NamedEntityMember,
                    id: token_id.as_smol_str().clone(),
                });
            }
        }

        let id = entity.id().as_smol_str().clone();
        let member_ids: Vec<_> = entity
            .token_ids()
            .iter()
            .map(|token_id| token_id.as_smol_str().clone())
            .collect();
        let handle = self.layers.named_entities_mut().push(entity);
        self.index.register(IdKind::NamedEntity, &id, handle)?;
        for member in member_ids {
            self.index
                .register(IdKind::NamedEntityMember, &member, handle)?;
        }
        Ok(handle)
    }

    fn append_coreference(&mut self, coreference: Coreference) -> Result<Handle, DocumentError> {
        let mut batch = HashSet::new();
        for reference in coreference.references() {
            let id = reference.id().as_str();
            self.index.ensure_vacant(IdKind::Reference, id)?;
            if !batch.insert(id) {
                return Err(DocumentError::DuplicateIdentifier {
                    kind: IdKind::Reference,
                    id: reference.id().as_smol_str().clone(),
                });
            }
        }

        let ids: Vec<_> = coreference
            .references()
            .iter()
            .map(|reference| reference.id().as_smol_str().clone())
            .collect();
        let layer = self.layers.references_mut();
        let first = layer.next_handle().index();
        let (extref, references) = coreference.into_parts();
        let handle = layer.push_entity(extref, references);
        for (offset, id) in ids.iter().enumerate() {
            self.index
                .register(IdKind::Reference, id, Handle::new(first + offset))?;
        }
        Ok(handle)
    }

    /// A conventional id of scope `T` (`t_<n>`, `le_<n>`, ...) that is not taken yet,
    /// counting up from the number of ids already registered.
    pub fn next_id<T: IdScope>(&self) -> Id<T> {
        let mut n = self.index.len(T::KIND);
        loop {
            let candidate = Id::<T>::generated(n);
            if !self.index.contains(T::KIND, candidate.as_str()) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Appends a token with the next free `t_<n>` id.
    pub fn push_token(&mut self, text: impl Into<String>) -> Result<TokenId, DocumentError> {
        let id: TokenId = self.next_id();
        self.append(Token::new(id.clone(), text))?;
        Ok(id)
    }

    pub fn token(&self, id: &str) -> Option<TokenRef<'_>> {
        let handle = self.index.get(IdKind::Token, id)?;
        TokenRef::new(self, handle)
    }

    /// Like [`token`](Self::token), for ids that another annotation requires to exist.
    pub fn require_token(&self, id: &str) -> Result<TokenRef<'_>, DocumentError> {
        let handle = self.index.resolve(IdKind::Token, id)?;
        TokenRef::new(self, handle).ok_or_else(|| DocumentError::unknown(IdKind::Token, id))
    }

    pub fn token_at(&self, position: usize) -> Option<TokenRef<'_>> {
        TokenRef::new(self, Handle::new(position))
    }

    pub fn tokens(&self) -> impl Iterator<Item = TokenRef<'_>> + '_ {
        let len = self.layers.tokens().map_or(0, |layer| layer.len());
        (0..len).filter_map(move |position| self.token_at(position))
    }

    pub(crate) fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub(crate) fn set_frame(&mut self, frame: Frame, lang: Option<String>) {
        self.frame = Some(frame);
        self.lang = lang;
    }

    pub(crate) fn layers_mut(&mut self) -> &mut LayerStore {
        &mut self.layers
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::Document;
    use crate::error::DocumentError;
    use crate::model::{
        Coreference, EntityId, IdKind, LayerKind, Lemma, LemmaId, NamedEntity, Reference,
        ReferenceId, Token, TokenId,
    };

    fn tid(value: &str) -> TokenId {
        TokenId::new(value).expect("token id")
    }

    #[fixture]
    fn doc() -> Document {
        let mut doc = Document::default();
        for text in ["Karin", "fliegt", "nach", "New", "York", "."] {
            doc.push_token(text).expect("token");
        }
        doc
    }

    #[rstest]
    fn tokens_get_sequential_ids_and_positions(doc: Document) {
        let ids: Vec<String> = doc.tokens().map(|t| t.id().to_string()).collect();
        assert_eq!(ids, ["t_0", "t_1", "t_2", "t_3", "t_4", "t_5"]);
        assert_eq!(doc.token("t_4").map(|t| t.position()), Some(4));
        assert_eq!(doc.token_at(1).map(|t| t.text()), Some("fliegt"));
    }

    #[rstest]
    fn duplicate_token_id_is_rejected_without_mutating(mut doc: Document) {
        let err = doc.append(Token::new(tid("t_2"), "again")).unwrap_err();

        assert!(matches!(err, DocumentError::DuplicateIdentifier { kind: IdKind::Token, .. }));
        assert_eq!(doc.tokens().count(), 6);
    }

    #[rstest]
    fn require_token_separates_malformed_from_missing_ids(doc: Document) {
        assert!(matches!(
            doc.require_token("t_0 t_1"),
            Err(DocumentError::InvalidId { .. })
        ));
        assert!(matches!(
            doc.require_token("t_99"),
            Err(DocumentError::UnknownIdentifier { kind: IdKind::Token, .. })
        ));
    }

    #[rstest]
    fn next_id_skips_ids_already_taken(mut doc: Document) {
        doc.append(Token::new(tid("t_7"), "x")).expect("explicit id");
        // seven tokens registered, so t_7 is the first candidate and is taken
        assert_eq!(doc.next_id::<crate::model::TokenIdTag>().as_str(), "t_8");
    }

    #[rstest]
    fn a_token_may_not_join_two_mentions(mut doc: Document) {
        doc.append(NamedEntity::new(
            EntityId::generated(0),
            Some("LOC".to_owned()),
            vec![tid("t_3"), tid("t_4")],
        ))
        .expect("first mention");

        let err = doc
            .append(NamedEntity::new(EntityId::generated(1), None, vec![tid("t_4")]))
            .unwrap_err();
        assert_eq!(
            err,
            DocumentError::DuplicateIdentifier {
                kind: IdKind::NamedEntityMember,
                id: "t_4".into(),
            }
        );
        assert_eq!(doc.layers().named_entities().map(|l| l.len()), Some(1));
    }

    #[rstest]
    fn coreference_registers_every_reference(mut doc: Document) {
        let handle = doc
            .append(Coreference::new(vec![
                Reference::new(ReferenceId::generated(0), vec![tid("t_3"), tid("t_4")]),
                Reference::new(ReferenceId::generated(1), vec![tid("t_0")]),
            ]))
            .expect("coreference");

        assert_eq!(handle.index(), 0);
        let index = doc.index();
        assert_eq!(index.get(IdKind::Reference, "rc_1").map(|h| h.index()), Some(1));
        let layer = doc.layers().references().expect("references");
        assert_eq!(layer.entities()[0].references().len(), 2);
    }

    #[rstest]
    fn add_layer_returns_the_existing_layer(mut doc: Document) {
        doc.add_layer(LayerKind::PosTags)
            .set_attribute("tagset", Some("stts"));
        doc.add_layer(LayerKind::PosTags);

        let layer = doc.layer(LayerKind::PosTags).expect("layer");
        assert_eq!(layer.header().attribute("tagset"), Some("stts"));
        assert!(doc.layer(LayerKind::Lemmas).is_none());
    }

    #[rstest]
    fn appends_are_visible_to_the_next_lookup(mut doc: Document) {
        assert!(doc.token("t_1").and_then(|t| t.lemma()).is_none());

        doc.append(Lemma::new(LemmaId::generated(0), [tid("t_1")], "fliegen"))
            .expect("lemma");

        assert_eq!(
            doc.token("t_1").and_then(|t| t.lemma()).map(|l| l.value()),
            Some("fliegen")
        );
    }
}
