// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Annotation pipelines.
//!
//! A document is built by handing it through a sequence of stages (tokenizer, tagger,
//! parser, ...), each appending its own layers. Independent documents can be pushed
//! through the same pipeline in parallel.

use std::fmt;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::DocumentError;
use crate::format::tcf::{export_document, parse_document, TcfExportError, TcfParseError};
use crate::model::Document;

#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("{0}")]
    Failed(String),
}

impl StageError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("stage {stage:?} failed: {source}")]
    Stage {
        stage: String,
        #[source]
        source: StageError,
    },

    #[error(transparent)]
    Parse(#[from] TcfParseError),

    #[error(transparent)]
    Export(#[from] TcfExportError),
}

/// One annotation step. Takes the document by value and hands it on.
pub trait Stage: Send + Sync {
    fn name(&self) -> &str;

    fn apply(&self, doc: Document) -> Result<Document, StageError>;
}

/// A [`Stage`] backed by a closure that mutates the document in place.
pub struct FnStage<F> {
    name: String,
    apply: F,
}

impl<F> FnStage<F>
where
    F: Fn(&mut Document) -> Result<(), StageError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, apply: F) -> Self {
        Self {
            name: name.into(),
            apply,
        }
    }
}

impl<F> Stage for FnStage<F>
where
    F: Fn(&mut Document) -> Result<(), StageError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, mut doc: Document) -> Result<Document, StageError> {
        (self.apply)(&mut doc)?;
        Ok(doc)
    }
}

impl<F> fmt::Debug for FnStage<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStage").field("name", &self.name).finish()
    }
}

#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stage(mut self, stage: impl Stage + 'static) -> Self {
        self.push(stage);
        self
    }

    pub fn push(&mut self, stage: impl Stage + 'static) {
        self.stages.push(Box::new(stage));
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.stages.iter().map(|stage| stage.name())
    }

    /// Runs every stage in order. The first failing stage aborts the run.
    pub fn run(&self, mut doc: Document) -> Result<Document, PipelineError> {
        for stage in &self.stages {
            debug!(stage = stage.name(), "applying stage");
            doc = stage.apply(doc).map_err(|source| {
                warn!(stage = stage.name(), error = %source, "stage failed");
                PipelineError::Stage {
                    stage: stage.name().to_owned(),
                    source,
                }
            })?;
        }
        Ok(doc)
    }

    /// Parses TCF input, runs the stages and serializes the result.
    pub fn run_tcf(&self, input: &str) -> Result<String, PipelineError> {
        let doc = self.run(parse_document(input)?)?;
        Ok(export_document(&doc)?)
    }

    /// Runs independent documents in parallel. Results keep the input order.
    pub fn run_batch(&self, docs: Vec<Document>) -> Vec<Result<Document, PipelineError>> {
        debug!(documents = docs.len(), stages = self.len(), "running batch");
        docs.into_par_iter().map(|doc| self.run(doc)).collect()
    }

    /// [`run_tcf`](Self::run_tcf) over many inputs, in parallel.
    pub fn run_tcf_batch<S>(&self, inputs: &[S]) -> Vec<Result<String, PipelineError>>
    where
        S: AsRef<str> + Sync,
    {
        inputs
            .par_iter()
            .map(|input| self.run_tcf(input.as_ref()))
            .collect()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.stage_names()).finish()
    }
}
