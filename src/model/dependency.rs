// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{HashMap, HashSet};

use smallvec::SmallVec;
use smol_str::SmolStr;

use super::annotation::TokenAnnotation;
use super::ids::{ParseId, TokenId};

/// A flat dependency edge (`depparsing/parse/dependency`).
///
/// TCF allows several dependents per element and, with `multigovs`, several governors. An
/// element without governors marks its dependents as roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    function: Option<String>,
    dependents: SmallVec<[TokenId; 1]>,
    governors: SmallVec<[TokenId; 1]>,
}

impl Dependency {
    pub fn new(dependent: TokenId, governor: Option<TokenId>, function: Option<String>) -> Self {
        Self {
            function,
            dependents: SmallVec::from_iter([dependent]),
            governors: governor.into_iter().collect(),
        }
    }

    pub fn new_with(
        dependents: impl IntoIterator<Item = TokenId>,
        governors: impl IntoIterator<Item = TokenId>,
        function: Option<String>,
    ) -> Self {
        Self {
            function,
            dependents: dependents.into_iter().collect(),
            governors: governors.into_iter().collect(),
        }
    }

    /// The relation label (`func`).
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    pub fn dependents(&self) -> &[TokenId] {
        &self.dependents
    }

    pub fn governors(&self) -> &[TokenId] {
        &self.governors
    }
}

/// One dependency parse, usually covering a single sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    id: ParseId,
    dependencies: Vec<Dependency>,
    members: Vec<TokenId>,
    member_set: HashSet<SmolStr>,
    by_dependent: HashMap<SmolStr, SmallVec<[usize; 1]>>,
}

impl Parse {
    pub fn new(id: ParseId) -> Self {
        Self {
            id,
            dependencies: Vec::new(),
            members: Vec::new(),
            member_set: HashSet::new(),
            by_dependent: HashMap::new(),
        }
    }

    pub fn with_dependencies(id: ParseId, dependencies: impl IntoIterator<Item = Dependency>) -> Self {
        let mut parse = Self::new(id);
        for dependency in dependencies {
            parse.push(dependency);
        }
        parse
    }

    pub fn push(&mut self, dependency: Dependency) {
        let slot = self.dependencies.len();
        for token_id in dependency.dependents.iter().chain(dependency.governors.iter()) {
            if self.member_set.insert(token_id.as_smol_str().clone()) {
                self.members.push(token_id.clone());
            }
        }
        for token_id in &dependency.dependents {
            self.by_dependent
                .entry(token_id.as_smol_str().clone())
                .or_default()
                .push(slot);
        }
        self.dependencies.push(dependency);
    }

    pub fn id(&self) -> &ParseId {
        &self.id
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Dependency elements listing `token_id` as a dependent. More than one is malformed.
    pub fn dependencies_of(&self, token_id: &str) -> impl Iterator<Item = &Dependency> + '_ {
        self.by_dependent
            .get(token_id)
            .into_iter()
            .flatten()
            .filter_map(|slot| self.dependencies.get(*slot))
    }

    pub fn contains(&self, token_id: &str) -> bool {
        self.member_set.contains(token_id)
    }
}

impl TokenAnnotation for Parse {
    /// Every token appearing in the parse, as dependent or governor, first-seen order.
    fn token_ids(&self) -> &[TokenId] {
        &self.members
    }
}
