// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::trace;

use super::token::TokenRef;
use crate::error::{DocumentError, MalformedParseReason};
use crate::model::{Document, Parse, TokenAnnotation};

/// Tree queries over one flat dependency parse.
///
/// Built once per parse: edges are indexed by governor and dependent so every query is
/// linear in the size of its answer.
#[derive(Debug, Clone)]
pub struct DependencyTree<'a> {
    parse: &'a Parse,
    nodes: Vec<TokenRef<'a>>,
    governor_of: HashMap<&'a str, TokenRef<'a>>,
    relation_of: HashMap<&'a str, &'a str>,
    children: HashMap<&'a str, Vec<TokenRef<'a>>>,
    roots: Vec<TokenRef<'a>>,
}

impl<'a> DependencyTree<'a> {
    /// Indexes `parse`. Every token id it mentions must exist in `doc`.
    ///
    /// A token with more than one governor, across one dependency element or several, is
    /// rejected here. Root and connectivity problems are reported by the queries that
    /// depend on them.
    pub fn new(doc: &'a Document, parse: &'a Parse) -> Result<Self, DocumentError> {
        let mut nodes = Vec::with_capacity(parse.token_ids().len());
        for token_id in parse.token_ids() {
            nodes.push(doc.require_token(token_id.as_str())?);
        }

        let mut governor_of = HashMap::new();
        let mut relation_of = HashMap::new();
        let mut children: HashMap<&'a str, Vec<TokenRef<'a>>> = HashMap::new();
        let mut seen = HashSet::new();

        for dependency in parse.dependencies() {
            let governor = match dependency.governors() {
                [] => None,
                [governor] => Some(doc.require_token(governor.as_str())?),
                [..] => {
                    let token = dependency
                        .dependents()
                        .first()
                        .map(|id| id.as_smol_str().clone())
                        .unwrap_or_default();
                    return Err(malformed(parse, MalformedParseReason::MultipleGovernors { token }));
                }
            };

            for dependent in dependency.dependents() {
                let dependent_id = dependent.as_str();
                if !seen.insert(dependent_id) {
                    return Err(malformed(
                        parse,
                        MalformedParseReason::MultipleGovernors {
                            token: dependent.as_smol_str().clone(),
                        },
                    ));
                }
                if let Some(function) = dependency.function() {
                    relation_of.insert(dependent_id, function);
                }
                if let Some(governor) = governor {
                    governor_of.insert(dependent_id, governor);
                    let dependent = doc.require_token(dependent_id)?;
                    children
                        .entry(governor.id().as_str())
                        .or_default()
                        .push(dependent);
                }
            }
        }

        for dependents in children.values_mut() {
            dependents.sort();
        }

        let roots = nodes
            .iter()
            .copied()
            .filter(|node| !governor_of.contains_key(node.id().as_str()))
            .collect();

        Ok(Self {
            parse,
            nodes,
            governor_of,
            relation_of,
            children,
            roots,
        })
    }

    pub fn parse(&self) -> &'a Parse {
        self.parse
    }

    /// Every token of the parse, first-seen order.
    pub fn nodes(&self) -> &[TokenRef<'a>] {
        &self.nodes
    }

    pub fn contains(&self, token: &TokenRef<'_>) -> bool {
        self.parse.contains(token.id().as_str())
    }

    /// The unique token without a governor.
    pub fn root(&self) -> Result<TokenRef<'a>, DocumentError> {
        match self.roots.as_slice() {
            [root] => Ok(*root),
            [] => Err(malformed(self.parse, MalformedParseReason::NoRoot)),
            many => Err(malformed(
                self.parse,
                MalformedParseReason::MultipleRoots {
                    roots: many.iter().map(|root| root.id().as_smol_str().clone()).collect(),
                },
            )),
        }
    }

    pub fn governor(&self, token: TokenRef<'a>) -> Result<Option<TokenRef<'a>>, DocumentError> {
        self.ensure_member(&token)?;
        Ok(self.governor_of.get(token.id().as_str()).copied())
    }

    /// The relation label on the edge into `token` (`SB`, `OA`, ...).
    pub fn relation(&self, token: TokenRef<'a>) -> Result<Option<&'a str>, DocumentError> {
        self.ensure_member(&token)?;
        Ok(self.relation_of.get(token.id().as_str()).copied())
    }

    /// Direct dependents in document order.
    pub fn dependents(&self, token: TokenRef<'a>) -> Result<&[TokenRef<'a>], DocumentError> {
        self.ensure_member(&token)?;
        Ok(self
            .children
            .get(token.id().as_str())
            .map(|children| children.as_slice())
            .unwrap_or(&[]))
    }

    /// `token` and everything below it, in document order.
    pub fn subtree(&self, token: TokenRef<'a>) -> Result<Vec<TokenRef<'a>>, DocumentError> {
        self.ensure_member(&token)?;
        let mut visited: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();
        let mut queue = VecDeque::from([token]);

        while let Some(node) = queue.pop_front() {
            if !visited.insert(node.id().as_str()) {
                return Err(self.cyclic(node));
            }
            out.push(node);
            if let Some(children) = self.children.get(node.id().as_str()) {
                queue.extend(children.iter().copied());
            }
        }

        out.sort();
        Ok(out)
    }

    /// From `token` up through its governors to the root, both ends included.
    pub fn path_to_root(&self, token: TokenRef<'a>) -> Result<Vec<TokenRef<'a>>, DocumentError> {
        self.ensure_member(&token)?;
        let mut visited: HashSet<&str> = HashSet::new();
        let mut path = Vec::new();
        let mut current = Some(token);

        while let Some(node) = current {
            if !visited.insert(node.id().as_str()) {
                return Err(self.cyclic(node));
            }
            trace!(parse = %self.parse.id(), token = %node.id(), "path step");
            path.push(node);
            current = self.governor_of.get(node.id().as_str()).copied();
        }
        Ok(path)
    }

    /// Checks the whole parse: a single root from which every node is reachable.
    pub fn validate(&self) -> Result<(), DocumentError> {
        let root = self.root()?;
        let reached: HashSet<&str> = self
            .subtree(root)?
            .iter()
            .map(|node| node.id().as_str())
            .collect();
        match self
            .nodes
            .iter()
            .find(|node| !reached.contains(node.id().as_str()))
        {
            None => Ok(()),
            Some(node) => Err(malformed(
                self.parse,
                MalformedParseReason::Disconnected {
                    token: node.id().as_smol_str().clone(),
                },
            )),
        }
    }

    fn ensure_member(&self, token: &TokenRef<'_>) -> Result<(), DocumentError> {
        if self.contains(token) {
            return Ok(());
        }
        Err(DocumentError::NotInParse {
            parse: self.parse.id().as_smol_str().clone(),
            token: token.id().as_smol_str().clone(),
        })
    }

    fn cyclic(&self, node: TokenRef<'_>) -> DocumentError {
        DocumentError::CyclicParse {
            parse: self.parse.id().as_smol_str().clone(),
            token: node.id().as_smol_str().clone(),
        }
    }
}

fn malformed(parse: &Parse, reason: MalformedParseReason) -> DocumentError {
    DocumentError::MalformedParse {
        parse: parse.id().as_smol_str().clone(),
        reason,
    }
}
