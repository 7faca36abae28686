// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use standoff::model::{
    Annotation, Coreference, Dependency, EntityId, Lemma, LemmaId, NamedEntity, Parse, ParseId,
    PosTag, Reference, ReferenceId, Sentence, SentenceId, TagId, Token, TokenId, WordSense,
};
use standoff::Document;

#[derive(Debug, Clone, Copy)]
pub struct Params {
    pub sentences: usize,
    /// At least six: name, verb, preposition, two-token place, pronoun.
    pub words_per_sentence: usize,
    /// Pronouns per coreference chain; the longest chain needs this many hops.
    pub chain_depth: usize,
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    LargeLongChains,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::LargeLongChains => "large_long_chains",
        }
    }

    pub fn params(self) -> Params {
        match self {
            Self::Small => Params {
                sentences: 8,
                words_per_sentence: 8,
                chain_depth: 2,
            },
            Self::Medium => Params {
                sentences: 200,
                words_per_sentence: 12,
                chain_depth: 4,
            },
            Self::LargeLongChains => Params {
                sentences: 2_000,
                words_per_sentence: 16,
                chain_depth: 16,
            },
        }
    }
}

pub const CASES: [Case; 3] = [Case::Small, Case::Medium, Case::LargeLongChains];

fn words(sentence: usize, len: usize) -> Vec<String> {
    let mut out = Vec::with_capacity(len);
    out.push(format!("Karin{sentence}"));
    out.push("fliegt".to_owned());
    out.push("nach".to_owned());
    out.push("New".to_owned());
    out.push(format!("York{sentence}"));
    for filler in 5..len - 1 {
        out.push(format!("Wort{filler}"));
    }
    out.push("sie".to_owned());
    out
}

/// Builds a fully annotated document. Every pronoun closes a sentence and points at the
/// previous pronoun of its chain; the first pronoun of a chain points at the name that
/// opens the chain's first sentence.
pub fn document(params: Params) -> Document {
    assert!(params.words_per_sentence >= 6, "sentence too short");
    let mut doc = Document::default();
    let mut text = String::new();
    let mut sentences = Vec::with_capacity(params.sentences);

    for s in 0..params.sentences {
        let mut ids = Vec::with_capacity(params.words_per_sentence);
        for word in words(s, params.words_per_sentence) {
            if !text.is_empty() {
                text.push(' ');
            }
            let start = text.len();
            text.push_str(&word);
            let id: TokenId = doc.next_id();
            doc.append(Token::new(id.clone(), word).with_offsets(start, text.len()))
                .expect("token");
            ids.push(id);
        }
        sentences.push(ids);
    }
    doc.append(Annotation::Text(text)).expect("text");

    let mut lemma = 0;
    let mut entity = 0;
    for (s, ids) in sentences.iter().enumerate() {
        doc.append(Sentence::new(SentenceId::generated(s), ids.clone()))
            .expect("sentence");
        for id in ids {
            let value = doc.token(id.as_str()).expect("token").text().to_lowercase();
            doc.append(Lemma::new(LemmaId::generated(lemma), [id.clone()], value))
                .expect("lemma");
            doc.append(PosTag::new(TagId::generated(lemma), [id.clone()], "XY"))
                .expect("tag");
            lemma += 1;
        }
        doc.append(NamedEntity::new(
            EntityId::generated(entity),
            Some("PER".to_owned()),
            vec![ids[0].clone()],
        ))
        .expect("person");
        doc.append(NamedEntity::new(
            EntityId::generated(entity + 1),
            Some("LOC".to_owned()),
            vec![ids[3].clone(), ids[4].clone()],
        ))
        .expect("place");
        entity += 2;

        let verb = ids[1].clone();
        let mut dependencies = vec![Dependency::new(verb.clone(), None, Some("ROOT".to_owned()))];
        for (position, id) in ids.iter().enumerate() {
            let (governor, function) = match position {
                1 => continue,
                3 => (ids[4].clone(), "PNC"),
                4 => (ids[2].clone(), "NK"),
                _ => (verb.clone(), "MO"),
            };
            dependencies.push(Dependency::new(id.clone(), Some(governor), Some(function.to_owned())));
        }
        doc.append(Parse::with_dependencies(ParseId::generated(s), dependencies))
            .expect("parse");
        doc.append(WordSense::new([verb], ["fliegen.1".to_owned()]))
            .expect("sense");
    }

    let mut reference = 0;
    for chain in sentences.chunks(params.chain_depth.max(1)) {
        let name = ReferenceId::generated(reference);
        let mut refs = vec![Reference::new_with(
            name.clone(),
            vec![chain[0][0].clone()],
            Some("nam".to_owned()),
            None,
            None,
        )];
        reference += 1;
        let mut previous = name;
        for ids in chain {
            let id = ReferenceId::generated(reference);
            refs.push(Reference::new_with(
                id.clone(),
                vec![ids[ids.len() - 1].clone()],
                Some("pro.per3".to_owned()),
                Some("anaphoric".to_owned()),
                Some(previous),
            ));
            previous = id;
            reference += 1;
        }
        doc.append(Coreference::new(refs)).expect("chain");
    }

    doc
}

pub fn fixture(case: Case) -> Document {
    document(case.params())
}

/// Ids of every sentence-final pronoun.
pub fn pronouns(doc: &Document) -> Vec<TokenId> {
    doc.tokens()
        .filter(|token| token.text() == "sie")
        .map(|token| token.id().clone())
        .collect()
}

pub fn checksum_document(doc: &Document) -> u64 {
    let layers = doc.layers();
    let mut acc = layers.tokens().map_or(0, |layer| layer.len()) as u64;
    acc = acc.wrapping_mul(31) + layers.lemmas().map_or(0, |layer| layer.len()) as u64;
    acc = acc.wrapping_mul(31) + layers.named_entities().map_or(0, |layer| layer.len()) as u64;
    acc = acc.wrapping_mul(31) + layers.references().map_or(0, |layer| layer.len()) as u64;
    acc = acc.wrapping_mul(31) + layers.dep_parsing().map_or(0, |layer| layer.len()) as u64;
    acc
}
