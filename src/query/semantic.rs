// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Semantic-unit resolution: what a token stands for once named-entity grouping and
//! coreference chains are taken into account.

use std::collections::HashSet;
use std::slice;

use tracing::trace;

use super::named_entity::{named_entity, Span};
use super::token::TokenRef;
use crate::error::DocumentError;
use crate::model::{Document, IdKind, Reference, TokenAnnotation};

/// The resolved referent of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit<'a> {
    Token(TokenRef<'a>),
    Span(Span<'a>),
}

impl<'a> Unit<'a> {
    pub fn tokens(&self) -> &[TokenRef<'a>] {
        match self {
            Self::Token(token) => slice::from_ref(token),
            Self::Span(span) => span.tokens(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Token(token) => token.text(),
            Self::Span(span) => span.text(),
        }
    }

    pub fn category(&self) -> Option<&'a str> {
        match self {
            Self::Token(_) => None,
            Self::Span(span) => span.category(),
        }
    }

    pub fn as_span(&self) -> Option<&Span<'a>> {
        match self {
            Self::Token(_) => None,
            Self::Span(span) => Some(span),
        }
    }
}

/// Resolves `token` to its semantic unit.
///
/// Named-entity membership is terminal and takes precedence over any reference the token
/// carries. Otherwise an outgoing reference with a `target` is followed hop by hop until
/// an antecedent either touches a mention or has no target of its own. The number of hops
/// is bounded by the number of references in the document.
pub fn semantic_unit<'a>(token: TokenRef<'a>) -> Result<Unit<'a>, DocumentError> {
    if let Some(span) = named_entity(token)? {
        return Ok(Unit::Span(span));
    }

    let doc = token.document();
    let Some(layer) = doc.layers().references() else {
        return Ok(Unit::Token(token));
    };
    let Some((_, start)) = layer.reference_for_token(token.id().as_str()) else {
        return Ok(Unit::Token(token));
    };
    let Some(mut target) = start.target() else {
        return Ok(Unit::Token(token));
    };

    let limit = layer.len();
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(start.id().as_str());
    let mut hops = 0usize;

    loop {
        hops += 1;
        let handle = doc.index().resolve(IdKind::Reference, target.as_str())?;
        let antecedent = layer
            .get(handle)
            .ok_or_else(|| DocumentError::unknown(IdKind::Reference, target.as_str()))?;
        trace!(
            token = %token.id(),
            reference = %antecedent.id(),
            hop = hops,
            "followed reference"
        );

        if hops > limit || !visited.insert(antecedent.id().as_str()) {
            return Err(DocumentError::CyclicReference {
                token: token.id().as_smol_str().clone(),
                reference: antecedent.id().as_smol_str().clone(),
            });
        }

        for token_id in antecedent.token_ids() {
            let member = doc.require_token(token_id.as_str())?;
            if let Some(span) = named_entity(member)? {
                return Ok(Unit::Span(span));
            }
        }

        match antecedent.target() {
            Some(next) => target = next,
            None => return unit_of_reference(doc, antecedent),
        }
    }
}

fn unit_of_reference<'a>(
    doc: &'a Document,
    reference: &'a Reference,
) -> Result<Unit<'a>, DocumentError> {
    if let [only] = reference.token_ids() {
        return Ok(Unit::Token(doc.require_token(only.as_str())?));
    }
    Span::from_reference(doc, reference).map(Unit::Span)
}

/// A display label for what `token` refers to.
///
/// An `extref` on the token's coreference entity wins. Otherwise the tokens of the
/// semantic unit are rendered as their lemma (falling back to the surface text) with any
/// word senses in parentheses, e.g. `fliegen (fliegen.1, fliegen.2)`.
pub fn semantic_label(token: TokenRef<'_>) -> Result<String, DocumentError> {
    let doc = token.document();
    let extref = doc.layers().references().and_then(|layer| {
        let (handle, _) = layer.reference_for_token(token.id().as_str())?;
        layer.entity_of(handle)?.extref()
    });
    if let Some(extref) = extref {
        return Ok(extref.to_owned());
    }

    let unit = semantic_unit(token)?;
    let separator = doc.config().token_separator.as_str();
    let mut label = String::new();
    for (idx, member) in unit.tokens().iter().enumerate() {
        if idx > 0 {
            label.push_str(separator);
        }
        label.push_str(member.lemma().map_or(member.text(), |lemma| lemma.value()));
        let senses = member.word_senses();
        if !senses.is_empty() {
            label.push_str(" (");
            label.push_str(&senses.join(", "));
            label.push(')');
        }
    }
    Ok(label)
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{semantic_label, semantic_unit, Unit};
    use crate::error::DocumentError;
    use crate::model::{
        Coreference, Document, EntityId, IdKind, Lemma, LemmaId, NamedEntity, Reference,
        ReferenceId, TokenId, WordSense,
    };

    fn tid(n: usize) -> TokenId {
        TokenId::generated(n)
    }

    fn rid(n: usize) -> ReferenceId {
        ReferenceId::generated(n)
    }

    fn pointing(n: usize, tokens: &[usize], target: Option<usize>) -> Reference {
        Reference::new_with(
            rid(n),
            tokens.iter().copied().map(tid).collect(),
            None,
            None,
            target.map(rid),
        )
    }

    /// "Karin fliegt nach New York . Sie will dort Urlaub machen ."
    #[fixture]
    fn doc() -> Document {
        let mut doc = Document::default();
        for text in [
            "Karin", "fliegt", "nach", "New", "York", ".", "Sie", "will", "dort", "Urlaub",
            "machen", ".",
        ] {
            doc.push_token(text).expect("token");
        }
        doc.append(NamedEntity::new(
            EntityId::generated(0),
            Some("PER".to_owned()),
            vec![tid(0)],
        ))
        .expect("karin");
        doc.append(NamedEntity::new(
            EntityId::generated(1),
            Some("LOC".to_owned()),
            vec![tid(3), tid(4)],
        ))
        .expect("new york");
        doc
    }

    #[rstest]
    fn plain_token_is_its_own_unit(doc: Document) {
        let token = doc.token("t_1").expect("t_1");
        assert_eq!(semantic_unit(token), Ok(Unit::Token(token)));
    }

    #[rstest]
    fn pronoun_resolves_to_the_mention_of_its_antecedent(mut doc: Document) {
        doc.append(Coreference::new(vec![
            pointing(0, &[3, 4], None),
            pointing(1, &[8], Some(0)),
        ]))
        .expect("coreference");

        let unit = semantic_unit(doc.token("t_8").expect("dort")).expect("unit");
        assert_eq!(unit.text(), "New York");
        assert_eq!(unit.category(), Some("LOC"));
    }

    #[rstest]
    fn named_entity_membership_wins_over_an_outgoing_reference(mut doc: Document) {
        // t_0 is a mention and also points at "Urlaub"
        doc.append(Coreference::new(vec![
            pointing(0, &[9], None),
            pointing(1, &[0], Some(0)),
        ]))
        .expect("coreference");

        let unit = semantic_unit(doc.token("t_0").expect("karin")).expect("unit");
        assert_eq!(unit.text(), "Karin");
        assert_eq!(unit.category(), Some("PER"));
    }

    #[rstest]
    fn chains_are_followed_to_a_fixed_point(mut doc: Document) {
        // A (t_6) -> B (t_7) -> C (t_9)
        doc.append(Coreference::new(vec![
            pointing(0, &[6], Some(1)),
            pointing(1, &[7], Some(2)),
            pointing(2, &[9], None),
        ]))
        .expect("chain");

        let c = doc.token("t_9").expect("c");
        let from_a = semantic_unit(doc.token("t_6").expect("a")).expect("a");
        let from_b = semantic_unit(doc.token("t_7").expect("b")).expect("b");

        assert_eq!(from_a, Unit::Token(c));
        assert_eq!(from_b, Unit::Token(c));
        assert_eq!(semantic_unit(c).expect("fixed point"), from_a);
    }

    #[rstest]
    fn multi_token_antecedent_becomes_a_span(mut doc: Document) {
        doc.append(Coreference::new(vec![
            pointing(0, &[9, 10], None),
            pointing(1, &[6], Some(0)),
        ]))
        .expect("coreference");

        let unit = semantic_unit(doc.token("t_6").expect("sie")).expect("unit");
        let span = unit.as_span().expect("span");
        assert_eq!(span.text(), "Urlaub machen");
        assert_eq!(span.category(), None);
        assert_eq!(span.mention_id(), None);
    }

    #[rstest]
    fn cycles_are_rejected(mut doc: Document) {
        doc.append(Coreference::new(vec![
            pointing(0, &[6], Some(1)),
            pointing(1, &[7], Some(0)),
        ]))
        .expect("cycle");

        let err = semantic_unit(doc.token("t_6").expect("a")).unwrap_err();
        assert!(matches!(err, DocumentError::CyclicReference { .. }), "{err}");
    }

    #[rstest]
    fn dangling_target_is_a_hard_error(mut doc: Document) {
        doc.append(Coreference::new(vec![pointing(0, &[6], Some(42))]))
            .expect("dangling");

        let err = semantic_unit(doc.token("t_6").expect("sie")).unwrap_err();
        assert_eq!(
            err,
            DocumentError::UnknownIdentifier {
                kind: IdKind::Reference,
                id: "rc_42".into(),
            }
        );
    }

    #[rstest]
    fn label_prefers_extref_then_lemma_and_senses(mut doc: Document) {
        doc.append(
            Coreference::new(vec![pointing(0, &[3, 4], None), pointing(1, &[8], Some(0))])
                .with_extref("http://d-nb.info/gnd/4042011-5"),
        )
        .expect("coreference");
        doc.append(Lemma::new(LemmaId::generated(0), [tid(1)], "fliegen"))
            .expect("lemma");
        doc.append(WordSense::new(
            [tid(1)],
            ["fliegen.1".to_owned(), "fliegen.2".to_owned()],
        ))
        .expect("senses");

        assert_eq!(
            semantic_label(doc.token("t_8").expect("dort")).expect("label"),
            "http://d-nb.info/gnd/4042011-5"
        );
        assert_eq!(
            semantic_label(doc.token("t_1").expect("fliegt")).expect("label"),
            "fliegen (fliegen.1, fliegen.2)"
        );
        assert_eq!(
            semantic_label(doc.token("t_2").expect("nach")).expect("label"),
            "nach"
        );
    }
}
