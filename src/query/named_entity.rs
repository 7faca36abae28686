// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::token::TokenRef;
use crate::error::DocumentError;
use crate::model::{Document, EntityId, NamedEntity, Reference, ReferenceId, TokenAnnotation, TokenId};

/// The annotation a [`Span`] was built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpanSource {
    NamedEntity(EntityId),
    /// A multi-token reference that ends a coreference chain.
    Reference(ReferenceId),
}

/// A contiguous or discontiguous run of tokens acting as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'a> {
    source: SpanSource,
    tokens: Vec<TokenRef<'a>>,
    text: String,
    category: Option<&'a str>,
}

impl<'a> Span<'a> {
    pub(crate) fn from_named_entity(
        doc: &'a Document,
        entity: &'a NamedEntity,
    ) -> Result<Self, DocumentError> {
        Self::build(
            doc,
            SpanSource::NamedEntity(entity.id().clone()),
            entity.token_ids(),
            entity.class(),
        )
    }

    pub(crate) fn from_reference(
        doc: &'a Document,
        reference: &'a Reference,
    ) -> Result<Self, DocumentError> {
        Self::build(
            doc,
            SpanSource::Reference(reference.id().clone()),
            reference.token_ids(),
            None,
        )
    }

    fn build(
        doc: &'a Document,
        source: SpanSource,
        token_ids: &[TokenId],
        category: Option<&'a str>,
    ) -> Result<Self, DocumentError> {
        // keyed by position: document order, duplicates collapse
        let mut by_position = BTreeMap::new();
        for token_id in token_ids {
            let token = doc.require_token(token_id.as_str())?;
            by_position.insert(token.position(), token);
        }
        let tokens: Vec<TokenRef<'a>> = by_position.into_values().collect();

        let separator = doc.config().token_separator.as_str();
        let mut text = String::new();
        for (idx, token) in tokens.iter().enumerate() {
            if idx > 0 {
                text.push_str(separator);
            }
            text.push_str(token.text());
        }

        Ok(Self {
            source,
            tokens,
            text,
            category,
        })
    }

    pub fn source(&self) -> &SpanSource {
        &self.source
    }

    /// The mention id when the span comes from the named-entity layer.
    pub fn mention_id(&self) -> Option<&EntityId> {
        match &self.source {
            SpanSource::NamedEntity(id) => Some(id),
            SpanSource::Reference(_) => None,
        }
    }

    /// Member tokens in document order.
    pub fn tokens(&self) -> &[TokenRef<'a>] {
        &self.tokens
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The named-entity class (`PER`, `LOC`, ...). Always `None` for reference spans.
    pub fn category(&self) -> Option<&'a str> {
        self.category
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &TokenRef<'_>) -> bool {
        self.tokens
            .iter()
            .any(|member| member.id().as_str() == token.id().as_str())
    }
}

/// Resolves the named-entity mention `token` belongs to.
///
/// `Ok(None)` when the token is not part of any mention. A mention listing a token id
/// that does not exist is a hard [`DocumentError::UnknownIdentifier`].
pub fn named_entity<'a>(token: TokenRef<'a>) -> Result<Option<Span<'a>>, DocumentError> {
    match token.named_entity() {
        Some(entity) => Span::from_named_entity(token.document(), entity).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{named_entity, SpanSource};
    use crate::config::DocumentConfig;
    use crate::error::DocumentError;
    use crate::model::{Document, EntityId, IdKind, NamedEntity, TokenId};

    fn tid(n: usize) -> TokenId {
        TokenId::generated(n)
    }

    #[fixture]
    fn doc() -> Document {
        let mut doc = Document::default();
        for text in ["Karin", "fliegt", "nach", "New", "York", "."] {
            doc.push_token(text).expect("token");
        }
        doc.append(NamedEntity::new(
            EntityId::generated(0),
            Some("PER".to_owned()),
            vec![tid(0)],
        ))
        .expect("karin");
        // listed out of order on purpose
        doc.append(NamedEntity::new(
            EntityId::generated(1),
            Some("LOC".to_owned()),
            vec![tid(4), tid(3)],
        ))
        .expect("new york");
        doc
    }

    #[rstest]
    fn every_member_resolves_to_the_same_span(doc: Document) {
        let from_new = named_entity(doc.token("t_3").expect("t_3"))
            .expect("resolve")
            .expect("span");
        let from_york = named_entity(doc.token("t_4").expect("t_4"))
            .expect("resolve")
            .expect("span");

        assert_eq!(from_new, from_york);
        assert_eq!(from_new.text(), "New York");
        assert_eq!(from_new.category(), Some("LOC"));
        assert_eq!(from_new.mention_id().map(|id| id.as_str()), Some("ne_1"));
        let positions: Vec<usize> = from_new.tokens().iter().map(|t| t.position()).collect();
        assert_eq!(positions, [3, 4]);
    }

    #[rstest]
    fn non_members_have_no_span(doc: Document) {
        assert_eq!(named_entity(doc.token("t_1").expect("t_1")), Ok(None));
    }

    #[rstest]
    fn separator_comes_from_the_document_config() {
        let config = DocumentConfig {
            token_separator: "_".to_owned(),
            ..DocumentConfig::default()
        };
        let mut doc = Document::new(config);
        doc.push_token("New").expect("new");
        doc.push_token("York").expect("york");
        doc.append(NamedEntity::new(EntityId::generated(0), None, vec![tid(0), tid(1)]))
            .expect("mention");

        let span = named_entity(doc.token("t_1").expect("t_1"))
            .expect("resolve")
            .expect("span");
        assert_eq!(span.text(), "New_York");
        assert_eq!(span.source(), &SpanSource::NamedEntity(EntityId::generated(0)));
        assert_eq!(span.category(), None);
    }

    #[rstest]
    fn dangling_member_is_a_hard_error(mut doc: Document) {
        doc.append(NamedEntity::new(EntityId::generated(2), None, vec![tid(5), tid(9)]))
            .expect("mention with a forward reference");

        let err = named_entity(doc.token("t_5").expect("t_5")).unwrap_err();
        assert_eq!(
            err,
            DocumentError::UnknownIdentifier {
                kind: IdKind::Token,
                id: "t_9".into(),
            }
        );
    }
}
