// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::{self, Write as _};

use quick_xml::escape::escape;
use thiserror::Error;
use tracing::debug;

use super::{CORPUS_ELEMENT, CORPUS_NS, METADATA_NS, ROOT_ELEMENT, ROOT_NS};
use crate::model::{
    join_id_list, Document, LayerHeader, LayerRef, LayerSlot, RawLayer, TokenAnnotation,
};

#[derive(Debug, Error)]
pub enum TcfExportError {
    #[error("failed to write TCF output")]
    Fmt(#[from] fmt::Error),
}

/// Nesting depth of layer elements below the `D-Spin` root.
const LAYER_LEVEL: usize = 2;

/// Serializes `doc` as TCF.
///
/// Layers that were parsed and never touched are copied from the input verbatim, together
/// with the whitespace in front of them and the document text around the corpus. Layers
/// that changed, or that did not exist in the input, are rendered from the model and
/// follow the existing ones in the order they were added. Rendered elements take the
/// namespace prefix of the parsed `TextCorpus`, and child elements the model does not
/// represent are put back where they were read.
pub fn export_document(doc: &Document) -> Result<String, TcfExportError> {
    let prefix = doc.frame().and_then(|frame| frame.prefix.as_deref());
    let mut writer = TcfWriter::new(&doc.config().indent, prefix);

    match doc.frame() {
        Some(frame) => {
            if let (Some(collapsed), []) = (&frame.collapsed, doc.layers().slots()) {
                return Ok(collapsed.clone());
            }
            writer.out.push_str(&frame.prolog);
            write_layers(doc, &mut writer)?;
            writer.out.push_str(&frame.epilogue);
        }
        None => {
            write_prolog(doc, &mut writer)?;
            write_layers(doc, &mut writer)?;
            writer.newline(LAYER_LEVEL - 1);
            write!(writer.out, "</{CORPUS_ELEMENT}>\n</{ROOT_ELEMENT}>\n")?;
        }
    }

    Ok(writer.out)
}

fn write_prolog(doc: &Document, writer: &mut TcfWriter<'_>) -> fmt::Result {
    writer.out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    writer.start(
        ROOT_ELEMENT,
        &[("xmlns", ROOT_NS), ("version", doc.config().version.as_str())],
        false,
    )?;
    writer.newline(1);
    writer.start("MetaData", &[("xmlns", METADATA_NS)], false)?;
    writer.newline(2);
    writer.start("source", &[], true)?;
    writer.newline(2);
    writer.start("Services", &[], true)?;
    writer.newline(1);
    writer.end("MetaData");
    writer.newline(1);
    writer.start(CORPUS_ELEMENT, &[("xmlns", CORPUS_NS), ("lang", doc.lang())], false)
}

fn write_layers(doc: &Document, writer: &mut TcfWriter<'_>) -> fmt::Result {
    for slot in doc.layers().slots() {
        match *slot {
            LayerSlot::Known(kind) => {
                let Some(layer) = doc.layer(kind) else {
                    continue;
                };
                let header = layer.header();
                match header.raw() {
                    Some(raw) if !header.is_dirty() => writer.raw(raw),
                    raw => {
                        match raw {
                            Some(raw) => writer.out.push_str(&raw.leading),
                            None => writer.newline(LAYER_LEVEL),
                        }
                        render_layer(layer, writer)?;
                        debug!(layer = %kind, "rendered layer");
                    }
                }
            }
            LayerSlot::Opaque(idx) => {
                if let Some(layer) = doc.layers().opaque().get(idx) {
                    writer.raw(layer.raw());
                }
            }
        }
    }
    Ok(())
}

fn header_attributes(header: &LayerHeader) -> Vec<(&str, &str)> {
    header
        .attributes()
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect()
}

fn render_layer(layer: LayerRef<'_>, writer: &mut TcfWriter<'_>) -> fmt::Result {
    let name = layer.kind().element_name();
    let header = layer.header();
    let attributes = header_attributes(header);
    let child = LAYER_LEVEL + 1;

    if let LayerRef::Text(text) = layer {
        writer.start(name, &attributes, false)?;
        writer.text(text.text());
        writer.end(name);
        return Ok(());
    }

    let len = match layer {
        LayerRef::Tokens(tokens) => tokens.len(),
        LayerRef::Sentences(items) => items.len(),
        LayerRef::Lemmas(items) => items.len(),
        LayerRef::PosTags(items) => items.len(),
        LayerRef::NamedEntities(items) => items.len(),
        LayerRef::References(items) => items.entities().len(),
        LayerRef::DepParsing(items) => items.len(),
        LayerRef::TextStructure(items) => items.len(),
        LayerRef::Wsd(items) => items.len(),
        LayerRef::Text(_) => 1,
    };
    let empty = len == 0 && header.unmodelled().is_empty();
    writer.start(name, &attributes, empty)?;
    if empty {
        return Ok(());
    }

    match layer {
        LayerRef::Text(_) => {}
        LayerRef::Tokens(tokens) => {
            let mut start = itoa::Buffer::new();
            let mut end = itoa::Buffer::new();
            for (idx, token) in tokens.iter().enumerate() {
                writer.unmodelled(header.unmodelled_at(None, idx), child);
                writer.newline(child);
                let mut attributes = vec![("ID", token.id().as_str())];
                if let Some(offsets) = token.offsets() {
                    attributes.push(("start", start.format(offsets.start)));
                    attributes.push(("end", end.format(offsets.end)));
                }
                writer.text_element("token", &attributes, token.text())?;
            }
        }
        LayerRef::Sentences(sentences) => {
            for (idx, sentence) in sentences.iter().enumerate() {
                writer.unmodelled(header.unmodelled_at(None, idx), child);
                writer.newline(child);
                let token_ids = join_id_list(sentence.token_ids());
                writer.start(
                    "sentence",
                    &[("ID", sentence.id().as_str()), ("tokenIDs", token_ids.as_str())],
                    true,
                )?;
            }
        }
        LayerRef::Lemmas(lemmas) => {
            for (idx, lemma) in lemmas.iter().enumerate() {
                writer.unmodelled(header.unmodelled_at(None, idx), child);
                writer.newline(child);
                let token_ids = join_id_list(lemma.token_ids());
                writer.text_element(
                    "lemma",
                    &[("ID", lemma.id().as_str()), ("tokenIDs", token_ids.as_str())],
                    lemma.value(),
                )?;
            }
        }
        LayerRef::PosTags(tags) => {
            for (idx, tag) in tags.iter().enumerate() {
                writer.unmodelled(header.unmodelled_at(None, idx), child);
                writer.newline(child);
                let token_ids = join_id_list(tag.token_ids());
                writer.text_element(
                    "tag",
                    &[("ID", tag.id().as_str()), ("tokenIDs", token_ids.as_str())],
                    tag.value(),
                )?;
            }
        }
        LayerRef::NamedEntities(entities) => {
            for (idx, entity) in entities.iter().enumerate() {
                writer.unmodelled(header.unmodelled_at(None, idx), child);
                writer.newline(child);
                let token_ids = join_id_list(entity.token_ids());
                let mut attributes = vec![("ID", entity.id().as_str())];
                if let Some(class) = entity.class() {
                    attributes.push(("class", class));
                }
                attributes.push(("tokenIDs", token_ids.as_str()));
                writer.start("entity", &attributes, true)?;
            }
        }
        LayerRef::References(layer) => {
            for (idx, entity) in layer.entities().iter().enumerate() {
                writer.unmodelled(header.unmodelled_at(None, idx), child);
                writer.newline(child);
                writer.start("entity", &[], false)?;
                if let Some(extref) = entity.extref() {
                    writer.newline(child + 1);
                    writer.start("extref", &[("refid", extref)], true)?;
                }
                let references: Vec<_> =
                    entity.references().iter().filter_map(|h| layer.get(*h)).collect();
                for (position, reference) in references.iter().enumerate() {
                    writer.unmodelled(header.unmodelled_at(Some(idx), position), child + 1);
                    writer.newline(child + 1);
                    let token_ids = join_id_list(reference.token_ids());
                    let mut attributes =
                        vec![("ID", reference.id().as_str()), ("tokenIDs", token_ids.as_str())];
                    if let Some(kind) = reference.kind() {
                        attributes.push(("type", kind));
                    }
                    if let Some(rel) = reference.rel() {
                        attributes.push(("rel", rel));
                    }
                    if let Some(target) = reference.target() {
                        attributes.push(("target", target.as_str()));
                    }
                    writer.start("reference", &attributes, true)?;
                }
                writer.unmodelled(header.unmodelled_after(Some(idx), references.len()), child + 1);
                writer.newline(child);
                writer.end("entity");
            }
        }
        LayerRef::DepParsing(parses) => {
            for (idx, parse) in parses.iter().enumerate() {
                writer.unmodelled(header.unmodelled_at(None, idx), child);
                writer.newline(child);
                writer.start("parse", &[("ID", parse.id().as_str())], false)?;
                for (position, dependency) in parse.dependencies().iter().enumerate() {
                    writer.unmodelled(header.unmodelled_at(Some(idx), position), child + 1);
                    writer.newline(child + 1);
                    let dependents = join_id_list(dependency.dependents());
                    let governors = join_id_list(dependency.governors());
                    let mut attributes = Vec::with_capacity(3);
                    if let Some(function) = dependency.function() {
                        attributes.push(("func", function));
                    }
                    attributes.push(("depIDs", dependents.as_str()));
                    if !governors.is_empty() {
                        attributes.push(("govIDs", governors.as_str()));
                    }
                    writer.start("dependency", &attributes, true)?;
                }
                writer.unmodelled(
                    header.unmodelled_after(Some(idx), parse.dependencies().len()),
                    child + 1,
                );
                writer.newline(child);
                writer.end("parse");
            }
        }
        LayerRef::TextStructure(spans) => {
            for (idx, span) in spans.iter().enumerate() {
                writer.unmodelled(header.unmodelled_at(None, idx), child);
                writer.newline(child);
                let mut attributes = vec![("start", span.start().as_str()), ("end", span.end().as_str())];
                if let Some(kind) = span.kind() {
                    attributes.push(("type", kind));
                }
                let mut nested = header.unmodelled_after(Some(idx), 0).peekable();
                if nested.peek().is_none() {
                    writer.start("textspan", &attributes, true)?;
                    continue;
                }
                writer.start("textspan", &attributes, false)?;
                writer.unmodelled(nested, child + 1);
                writer.newline(child);
                writer.end("textspan");
            }
        }
        LayerRef::Wsd(senses) => {
            for (idx, sense) in senses.iter().enumerate() {
                writer.unmodelled(header.unmodelled_at(None, idx), child);
                writer.newline(child);
                let token_ids = join_id_list(sense.token_ids());
                let lexical_units = sense.lexical_units().join(" ");
                writer.start(
                    "ws",
                    &[("tokenIDs", token_ids.as_str()), ("lexunits", lexical_units.as_str())],
                    true,
                )?;
            }
        }
    }

    writer.unmodelled(header.unmodelled_after(None, len), child);
    writer.newline(LAYER_LEVEL);
    writer.end(name);
    Ok(())
}

struct TcfWriter<'a> {
    out: String,
    indent: &'a str,
    prefix: Option<&'a str>,
}

impl<'a> TcfWriter<'a> {
    fn new(indent: &'a str, prefix: Option<&'a str>) -> Self {
        Self {
            out: String::new(),
            indent,
            prefix,
        }
    }

    fn name(&mut self, name: &str) {
        if let Some(prefix) = self.prefix {
            self.out.push_str(prefix);
            self.out.push(':');
        }
        self.out.push_str(name);
    }

    fn newline(&mut self, level: usize) {
        self.out.push('\n');
        for _ in 0..level {
            self.out.push_str(self.indent);
        }
    }

    fn raw(&mut self, raw: &RawLayer) {
        self.out.push_str(&raw.leading);
        self.out.push_str(&raw.element);
    }

    fn start(&mut self, name: &str, attributes: &[(&str, &str)], empty: bool) -> fmt::Result {
        self.out.push('<');
        self.name(name);
        for (key, value) in attributes {
            write!(self.out, " {key}=\"{}\"", escape(*value))?;
        }
        self.out.push_str(if empty { "/>" } else { ">" });
        Ok(())
    }

    fn text(&mut self, text: &str) {
        self.out.push_str(&escape(text));
    }

    fn end(&mut self, name: &str) {
        self.out.push_str("</");
        self.name(name);
        self.out.push('>');
    }

    /// Source elements, each on its own line at `level`.
    fn unmodelled<'s>(&mut self, elements: impl Iterator<Item = &'s str>, level: usize) {
        for element in elements {
            self.newline(level);
            self.out.push_str(element);
        }
    }

    fn text_element(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) -> fmt::Result {
        self.start(name, attributes, false)?;
        self.text(text);
        self.end(name);
        Ok(())
    }
}
