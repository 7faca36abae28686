// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::mem;
use std::ops::Range;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;
use tracing::debug;

use super::{CORPUS_ELEMENT, ROOT_ELEMENT};
use crate::config::DocumentConfig;
use crate::error::DocumentError;
use crate::model::{
    parse_id_list, Annotation, Coreference, Dependency, Document, Frame, Id, IdError, IdScope,
    LayerKind, Lemma, NamedEntity, OpaqueLayer, Parse, PosTag, RawLayer, Reference, Sentence,
    TextSpan, Token, TokenIdTag, UnmodelledChild, WordSense,
};

#[derive(Debug, Error)]
pub enum TcfParseError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("expected a D-Spin root element")]
    MissingRoot,

    #[error("D-Spin document has no TextCorpus element")]
    MissingTextCorpus,

    #[error("unexpected end of input inside <{element}>")]
    UnexpectedEof { element: String },

    #[error("<{element}> is missing required attribute {attribute:?}")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("invalid id in <{element} {attribute}=\"{value}\">: {reason}")]
    InvalidId {
        element: String,
        attribute: &'static str,
        value: String,
        reason: IdError,
    },

    #[error("invalid number in <{element} {attribute}=\"{value}\">")]
    InvalidNumber {
        element: String,
        attribute: &'static str,
        value: String,
    },

    #[error("layer <{layer}> appears more than once")]
    DuplicateLayer { layer: LayerKind },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// One layer element, fully read.
#[derive(Debug, Clone, Default)]
struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
    /// Byte range of the element in the input.
    span: Range<usize>,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, TcfParseError> {
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            attributes,
            ..Self::default()
        })
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn require(&self, name: &'static str) -> Result<&str, TcfParseError> {
        self.attribute(name)
            .ok_or_else(|| TcfParseError::MissingAttribute {
                element: self.name.clone(),
                attribute: name,
            })
    }

    fn id<T>(&self, name: &'static str) -> Result<Option<Id<T>>, TcfParseError> {
        self.attribute(name)
            .map(|value| Id::new(value).map_err(|reason| self.invalid_id(name, value, reason)))
            .transpose()
    }

    fn ids<T>(&self, name: &'static str) -> Result<Vec<Id<T>>, TcfParseError> {
        let value = self.require(name)?;
        parse_id_list(value).map_err(|reason| self.invalid_id(name, value, reason))
    }

    fn optional_ids<T>(&self, name: &'static str) -> Result<Vec<Id<T>>, TcfParseError> {
        match self.attribute(name) {
            Some(value) => {
                parse_id_list(value).map_err(|reason| self.invalid_id(name, value, reason))
            }
            None => Ok(Vec::new()),
        }
    }

    fn number(&self, name: &'static str) -> Result<Option<usize>, TcfParseError> {
        self.attribute(name)
            .map(|value| {
                value.parse().map_err(|_| TcfParseError::InvalidNumber {
                    element: self.name.clone(),
                    attribute: name,
                    value: value.to_owned(),
                })
            })
            .transpose()
    }

    fn owned(&self, name: &str) -> Option<String> {
        self.attribute(name).map(str::to_owned)
    }

    fn children_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s XmlElement> + 's {
        self.children.iter().filter(move |child| child.name == name)
    }

    fn invalid_id(&self, attribute: &'static str, value: &str, reason: IdError) -> TcfParseError {
        TcfParseError::InvalidId {
            element: self.name.clone(),
            attribute,
            value: value.to_owned(),
            reason,
        }
    }
}

/// Parses a TCF document with the default [`DocumentConfig`].
pub fn parse_document(input: &str) -> Result<Document, TcfParseError> {
    parse_document_with(input, DocumentConfig::default())
}

/// Parses a TCF document.
///
/// Known layers are decoded into the model; unknown ones are kept verbatim. The text
/// around the layers (XML declaration, `D-Spin` root, `MetaData`, whitespace between
/// layers) is retained so that an unmodified document exports byte-for-byte.
pub fn parse_document_with(input: &str, config: DocumentConfig) -> Result<Document, TcfParseError> {
    let mut reader = Reader::from_str(input);
    let mut doc = Document::new(config);
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let event = reader.read_event()?;
        let position = offset(&reader);
        match event {
            Event::Start(start) => {
                let name = start.local_name();
                if depth == 0 {
                    if name.as_ref() != ROOT_ELEMENT.as_bytes() {
                        return Err(TcfParseError::MissingRoot);
                    }
                    seen_root = true;
                }
                if depth == 1 && name.as_ref() == CORPUS_ELEMENT.as_bytes() {
                    let lang = XmlElement::from_start(&start)?.owned("lang");
                    let prefix = element_prefix(&start);
                    let cursor = read_corpus(&mut reader, input, &mut doc, position)?;
                    drain(&mut reader)?;
                    let frame = Frame {
                        prolog: input[..position].to_owned(),
                        epilogue: input[cursor..].to_owned(),
                        collapsed: None,
                        prefix,
                    };
                    doc.set_frame(frame, lang);
                    debug!(layers = doc.layers().slots().len(), "parsed TCF document");
                    return Ok(doc);
                }
                depth += 1;
            }
            Event::Empty(start) => {
                let name = start.local_name();
                if depth == 0 && name.as_ref() == ROOT_ELEMENT.as_bytes() {
                    return Err(TcfParseError::MissingTextCorpus);
                }
                if depth == 0 {
                    return Err(TcfParseError::MissingRoot);
                }
                if depth == 1 && name.as_ref() == CORPUS_ELEMENT.as_bytes() {
                    let lang = XmlElement::from_start(&start)?.owned("lang");
                    let prefix = element_prefix(&start);
                    drain(&mut reader)?;
                    doc.set_frame(collapsed_frame(input, position, prefix), lang);
                    debug!("parsed TCF document with an empty corpus");
                    return Ok(doc);
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof if seen_root => return Err(TcfParseError::MissingTextCorpus),
            Event::Eof => return Err(TcfParseError::MissingRoot),
            _ => {}
        }
    }
}

fn offset(reader: &Reader<&[u8]>) -> usize {
    reader.buffer_position() as usize
}

fn element_prefix(start: &BytesStart<'_>) -> Option<String> {
    start
        .name()
        .prefix()
        .map(|prefix| String::from_utf8_lossy(prefix.as_ref()).into_owned())
}

/// Start offset of the tag that ends at `end`.
fn tag_start(input: &str, end: usize) -> usize {
    input[..end].rfind('<').unwrap_or(0)
}

/// Splits a self-closing `<TextCorpus .../>` into an open/close pair so layers can be
/// inserted later.
fn collapsed_frame(input: &str, end: usize, prefix: Option<String>) -> Frame {
    let start = tag_start(input, end);
    let head = input[..end - 2].trim_end();
    let line_start = input[..start].rfind('\n').map_or(0, |idx| idx + 1);
    let indent = &input[line_start..start];
    let indent = if indent.chars().all(char::is_whitespace) {
        indent
    } else {
        ""
    };

    let mut epilogue = String::with_capacity(input.len() - end + indent.len() + 16);
    epilogue.push('\n');
    epilogue.push_str(indent);
    epilogue.push_str("</");
    if let Some(prefix) = &prefix {
        epilogue.push_str(prefix);
        epilogue.push(':');
    }
    epilogue.push_str(CORPUS_ELEMENT);
    epilogue.push('>');
    epilogue.push_str(&input[end..]);

    Frame {
        prolog: format!("{head}>"),
        epilogue,
        collapsed: Some(input.to_owned()),
        prefix,
    }
}

/// Reads the layers of `TextCorpus` up to its end tag. Returns the offset just past the
/// last layer.
fn read_corpus(
    reader: &mut Reader<&[u8]>,
    input: &str,
    doc: &mut Document,
    mut cursor: usize,
) -> Result<usize, TcfParseError> {
    loop {
        let event = reader.read_event()?;
        let position = offset(reader);
        let (element, end) = match event {
            Event::Start(start) => {
                let element = read_element(reader, input, &start)?;
                (element, offset(reader))
            }
            Event::Empty(start) => {
                let mut element = XmlElement::from_start(&start)?;
                element.span = tag_start(input, position)..position;
                (element, position)
            }
            Event::End(_) => return Ok(cursor),
            Event::Eof => {
                return Err(TcfParseError::UnexpectedEof {
                    element: CORPUS_ELEMENT.to_owned(),
                })
            }
            _ => continue,
        };

        let start = tag_start(input, position);
        let raw = RawLayer {
            leading: input[cursor..start].to_owned(),
            element: input[start..end].to_owned(),
        };
        decode_layer(doc, input, element, raw)?;
        cursor = end;
    }
}

fn read_element(
    reader: &mut Reader<&[u8]>,
    input: &str,
    start: &BytesStart<'_>,
) -> Result<XmlElement, TcfParseError> {
    let mut current = XmlElement::from_start(start)?;
    current.span.start = tag_start(input, offset(reader));
    let mut open: Vec<XmlElement> = Vec::new();

    loop {
        let event = reader.read_event()?;
        let position = offset(reader);
        match event {
            Event::Start(child) => {
                let mut child = XmlElement::from_start(&child)?;
                child.span.start = tag_start(input, position);
                open.push(mem::replace(&mut current, child));
            }
            Event::Empty(child) => {
                let mut child = XmlElement::from_start(&child)?;
                child.span = tag_start(input, position)..position;
                current.children.push(child);
            }
            Event::Text(text) => current.text.push_str(&text.unescape()?),
            Event::CData(data) => current.text.push_str(&String::from_utf8_lossy(&data)),
            Event::End(_) => {
                current.span.end = position;
                match open.pop() {
                    Some(parent) => {
                        let done = mem::replace(&mut current, parent);
                        current.children.push(done);
                    }
                    None => return Ok(current),
                }
            }
            Event::Eof => {
                return Err(TcfParseError::UnexpectedEof {
                    element: current.name,
                })
            }
            _ => {}
        }
    }
}

/// Reads past the corpus so that trailing markup errors still surface.
fn drain(reader: &mut Reader<&[u8]>) -> Result<(), TcfParseError> {
    loop {
        if let Event::Eof = reader.read_event()? {
            return Ok(());
        }
    }
}

fn id_or_next<T: IdScope>(
    doc: &Document,
    element: &XmlElement,
) -> Result<Id<T>, TcfParseError> {
    Ok(element.id("ID")?.unwrap_or_else(|| doc.next_id()))
}

/// Child elements of one layer that the model has no place for.
struct Leftovers<'i> {
    input: &'i str,
    children: Vec<UnmodelledChild>,
}

impl Leftovers<'_> {
    fn keep(&mut self, parent: Option<usize>, before: usize, element: &XmlElement) {
        debug!(element = %element.name, ?parent, before, "keeping unmodelled element");
        self.children.push(UnmodelledChild {
            parent,
            before,
            element: self.input[element.span.clone()].to_owned(),
        });
    }
}

/// What a decoder made of one child element.
enum Decoded {
    /// A modelled entry; later siblings are positioned after it.
    Entry,
    /// Folded into the enclosing entry (`extref`).
    Merged,
    Unmodelled,
}

/// Runs `decode` over the children of `element`, keeping the ones it does not model.
/// Returns the number of entries.
fn each_child<'e>(
    element: &'e XmlElement,
    parent: Option<usize>,
    leftovers: &mut Leftovers<'_>,
    mut decode: impl FnMut(usize, &'e XmlElement, &mut Leftovers<'_>) -> Result<Decoded, TcfParseError>,
) -> Result<usize, TcfParseError> {
    let mut entries = 0;
    for child in &element.children {
        match decode(entries, child, leftovers)? {
            Decoded::Entry => entries += 1,
            Decoded::Merged => {}
            Decoded::Unmodelled => leftovers.keep(parent, entries, child),
        }
    }
    Ok(entries)
}

fn decode_layer(
    doc: &mut Document,
    input: &str,
    element: XmlElement,
    raw: RawLayer,
) -> Result<(), TcfParseError> {
    let Ok(kind) = element.name.parse::<LayerKind>() else {
        debug!(layer = %element.name, "keeping unknown layer verbatim");
        doc.layers_mut().push_opaque(OpaqueLayer::new(element.name.as_str(), raw));
        return Ok(());
    };
    if doc.layers().contains(kind) {
        return Err(TcfParseError::DuplicateLayer { layer: kind });
    }

    let header = doc.add_layer(kind);
    for (name, value) in &element.attributes {
        header.push_attribute(name.as_str().into(), value.clone());
    }

    let mut leftovers = Leftovers {
        input,
        children: Vec::new(),
    };
    let entries = match kind {
        LayerKind::Text => {
            doc.append(Annotation::Text(element.text))?;
            1
        }
        LayerKind::Tokens => decode_tokens(doc, &element, &mut leftovers)?,
        LayerKind::Sentences => decode_sentences(doc, &element, &mut leftovers)?,
        LayerKind::Lemmas => decode_lemmas(doc, &element, &mut leftovers)?,
        LayerKind::PosTags => decode_tags(doc, &element, &mut leftovers)?,
        LayerKind::NamedEntities => decode_named_entities(doc, &element, &mut leftovers)?,
        LayerKind::References => decode_references(doc, &element, &mut leftovers)?,
        LayerKind::DepParsing => decode_parses(doc, &element, &mut leftovers)?,
        LayerKind::TextStructure => decode_text_spans(doc, &element, &mut leftovers)?,
        LayerKind::Wsd => decode_word_senses(doc, &element, &mut leftovers)?,
    };

    let unmodelled = leftovers.children.len();
    let header = doc.add_layer(kind);
    header.keep_unmodelled(leftovers.children);
    header.attach_raw(raw);
    debug!(layer = %kind, entries, unmodelled, "read layer");
    Ok(())
}

fn decode_tokens(
    doc: &mut Document,
    layer: &XmlElement,
    leftovers: &mut Leftovers<'_>,
) -> Result<usize, TcfParseError> {
    each_child(layer, None, leftovers, |_, element, _| {
        if element.name != "token" {
            return Ok(Decoded::Unmodelled);
        }
        let mut token = Token::new(id_or_next(doc, element)?, element.text.as_str());
        if let (Some(start), Some(end)) = (element.number("start")?, element.number("end")?) {
            token = token.with_offsets(start, end);
        }
        doc.append(token)?;
        Ok(Decoded::Entry)
    })
}

fn decode_sentences(
    doc: &mut Document,
    layer: &XmlElement,
    leftovers: &mut Leftovers<'_>,
) -> Result<usize, TcfParseError> {
    each_child(layer, None, leftovers, |_, element, _| {
        if element.name != "sentence" {
            return Ok(Decoded::Unmodelled);
        }
        let sentence = Sentence::new(id_or_next(doc, element)?, element.ids("tokenIDs")?);
        doc.append(sentence)?;
        Ok(Decoded::Entry)
    })
}

fn decode_lemmas(
    doc: &mut Document,
    layer: &XmlElement,
    leftovers: &mut Leftovers<'_>,
) -> Result<usize, TcfParseError> {
    each_child(layer, None, leftovers, |_, element, _| {
        if element.name != "lemma" {
            return Ok(Decoded::Unmodelled);
        }
        let lemma = Lemma::new(
            id_or_next(doc, element)?,
            element.ids("tokenIDs")?,
            element.text.as_str(),
        );
        doc.append(lemma)?;
        Ok(Decoded::Entry)
    })
}

fn decode_tags(
    doc: &mut Document,
    layer: &XmlElement,
    leftovers: &mut Leftovers<'_>,
) -> Result<usize, TcfParseError> {
    each_child(layer, None, leftovers, |_, element, _| {
        if element.name != "tag" {
            return Ok(Decoded::Unmodelled);
        }
        let tag = PosTag::new(
            id_or_next(doc, element)?,
            element.ids("tokenIDs")?,
            element.text.as_str(),
        );
        doc.append(tag)?;
        Ok(Decoded::Entry)
    })
}

fn decode_named_entities(
    doc: &mut Document,
    layer: &XmlElement,
    leftovers: &mut Leftovers<'_>,
) -> Result<usize, TcfParseError> {
    each_child(layer, None, leftovers, |_, element, _| {
        if element.name != "entity" {
            return Ok(Decoded::Unmodelled);
        }
        let entity = NamedEntity::new(
            id_or_next(doc, element)?,
            element.owned("class"),
            element.ids("tokenIDs")?,
        );
        doc.append(entity)?;
        Ok(Decoded::Entry)
    })
}

fn decode_references(
    doc: &mut Document,
    layer: &XmlElement,
    leftovers: &mut Leftovers<'_>,
) -> Result<usize, TcfParseError> {
    each_child(layer, None, leftovers, |idx, entity, leftovers| {
        if entity.name != "entity" {
            return Ok(Decoded::Unmodelled);
        }
        let mut references = Vec::new();
        let mut extref: Option<&str> = None;
        each_child(entity, Some(idx), leftovers, |_, element, _| {
            match element.name.as_str() {
                "reference" => {
                    let id = element
                        .id("ID")?
                        .ok_or_else(|| TcfParseError::MissingAttribute {
                            element: element.name.clone(),
                            attribute: "ID",
                        })?;
                    references.push(Reference::new_with(
                        id,
                        element.ids("tokenIDs")?,
                        element.owned("type"),
                        element.owned("rel"),
                        element.id("target")?,
                    ));
                    Ok(Decoded::Entry)
                }
                "extref" if extref.is_none() => match element.attribute("refid") {
                    Some(refid) => {
                        extref = Some(refid);
                        Ok(Decoded::Merged)
                    }
                    None => Ok(Decoded::Unmodelled),
                },
                _ => Ok(Decoded::Unmodelled),
            }
        })?;

        let mut coreference = Coreference::new(references);
        if let Some(extref) = extref {
            coreference = coreference.with_extref(extref);
        }
        doc.append(coreference)?;
        Ok(Decoded::Entry)
    })
}

fn decode_parses(
    doc: &mut Document,
    layer: &XmlElement,
    leftovers: &mut Leftovers<'_>,
) -> Result<usize, TcfParseError> {
    each_child(layer, None, leftovers, |idx, element, leftovers| {
        if element.name != "parse" {
            return Ok(Decoded::Unmodelled);
        }
        let mut parse = Parse::new(id_or_next(doc, element)?);
        // emptytoken elements are kept verbatim
        each_child(element, Some(idx), leftovers, |_, dependency, _| {
            if dependency.name != "dependency" {
                return Ok(Decoded::Unmodelled);
            }
            parse.push(Dependency::new_with(
                dependency.ids("depIDs")?,
                dependency.optional_ids("govIDs")?,
                dependency.owned("func"),
            ));
            Ok(Decoded::Entry)
        })?;
        doc.append(parse)?;
        Ok(Decoded::Entry)
    })
}

fn decode_text_spans(
    doc: &mut Document,
    layer: &XmlElement,
    leftovers: &mut Leftovers<'_>,
) -> Result<usize, TcfParseError> {
    each_child(layer, None, leftovers, |idx, element, leftovers| {
        if element.name != "textspan" {
            return Ok(Decoded::Unmodelled);
        }
        let Some(start) = element.id::<TokenIdTag>("start")? else {
            return Ok(Decoded::Unmodelled);
        };
        // an open-ended span runs to the last token
        let end = match element.id::<TokenIdTag>("end")? {
            Some(end) => end,
            None => doc
                .tokens()
                .last()
                .map(|token| token.id().clone())
                .unwrap_or_else(|| start.clone()),
        };
        doc.append(TextSpan::new(start, end, element.owned("type")))?;
        each_child(element, Some(idx), leftovers, |_, _, _| Ok(Decoded::Unmodelled))?;
        Ok(Decoded::Entry)
    })
}

fn decode_word_senses(
    doc: &mut Document,
    layer: &XmlElement,
    leftovers: &mut Leftovers<'_>,
) -> Result<usize, TcfParseError> {
    each_child(layer, None, leftovers, |_, element, _| {
        if element.name != "ws" {
            return Ok(Decoded::Unmodelled);
        }
        let lexical_units = element
            .require("lexunits")?
            .split_whitespace()
            .map(str::to_owned);
        doc.append(WordSense::new(element.ids("tokenIDs")?, lexical_units))?;
        Ok(Decoded::Entry)
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_document, TcfParseError};
    use crate::error::DocumentError;
    use crate::model::{IdKind, LayerKind, LayerSlot, UnmodelledChild};

    const MINIMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<D-Spin xmlns="http://www.dspin.de/data" version="0.4">
  <MetaData xmlns="http://www.dspin.de/data/metadata"/>
  <TextCorpus xmlns="http://www.dspin.de/data/textcorpus" lang="de">
    <tokens>
      <token ID="t_0" start="0" end="5">Karin</token>
      <token ID="t_1">fliegt</token>
    </tokens>
    <lemmas>
      <lemma ID="le_0" tokenIDs="t_0">Karin</lemma>
      <lemma ID="le_1" tokenIDs="t_1">fliegen</lemma>
    </lemmas>
    <graph><nodes/></graph>
  </TextCorpus>
</D-Spin>
"#;

    #[test]
    fn reads_layers_and_keeps_unknown_ones() {
        let doc = parse_document(MINIMAL).expect("parse");

        assert_eq!(doc.lang(), "de");
        assert_eq!(
            doc.layers().slots(),
            &[
                LayerSlot::Known(LayerKind::Tokens),
                LayerSlot::Known(LayerKind::Lemmas),
                LayerSlot::Opaque(0),
            ]
        );
        assert_eq!(doc.layers().opaque()[0].raw().element, "<graph><nodes/></graph>");

        let karin = doc.token("t_0").expect("t_0");
        assert_eq!(karin.char_offsets().map(|o| (o.start, o.end)), Some((0, 5)));
        assert_eq!(
            doc.token("t_1").and_then(|t| t.lemma()).map(|l| l.value()),
            Some("fliegen")
        );
    }

    #[test]
    fn layers_keep_their_source_text() {
        let doc = parse_document(MINIMAL).expect("parse");
        let lemmas = doc.layer(LayerKind::Lemmas).expect("lemmas");
        let raw = lemmas.header().raw().expect("raw");

        assert_eq!(raw.leading, "\n    ");
        assert!(raw.element.starts_with("<lemmas>"));
        assert!(raw.element.ends_with("</lemmas>"));
        assert!(!lemmas.header().is_dirty());
    }

    #[test]
    fn rejects_documents_without_a_corpus() {
        let err = parse_document("<D-Spin><MetaData/></D-Spin>").unwrap_err();
        assert!(matches!(err, TcfParseError::MissingTextCorpus), "{err}");

        let err = parse_document("<html/>").unwrap_err();
        assert!(matches!(err, TcfParseError::MissingRoot), "{err}");
    }

    #[test]
    fn duplicate_ids_in_input_are_document_errors() {
        let input = r#"<D-Spin><TextCorpus><tokens><token ID="t_0">a</token><token ID="t_0">b</token></tokens></TextCorpus></D-Spin>"#;

        let err = parse_document(input).unwrap_err();
        assert!(
            matches!(
                err,
                TcfParseError::Document(DocumentError::DuplicateIdentifier {
                    kind: IdKind::Token,
                    ..
                })
            ),
            "{err}"
        );
    }

    #[test]
    fn missing_token_ids_are_generated() {
        let input = r#"<D-Spin><TextCorpus><tokens><token>a</token><token>b</token></tokens></TextCorpus></D-Spin>"#;

        let doc = parse_document(input).expect("parse");
        let ids: Vec<String> = doc.tokens().map(|t| t.id().to_string()).collect();
        assert_eq!(ids, ["t_0", "t_1"]);
    }

    #[test]
    fn textspans_without_start_are_kept_verbatim() {
        let input = r#"<D-Spin><TextCorpus><tokens><token ID="t_0">a</token><token ID="t_1">b</token></tokens><textstructure><textspan type="page"/><textspan start="t_0" type="line"/></textstructure></TextCorpus></D-Spin>"#;

        let doc = parse_document(input).expect("parse");
        let spans = doc.layers().text_structure().expect("textstructure");
        assert_eq!(spans.len(), 1);
        let span = spans.iter().next().expect("span");
        assert_eq!(span.kind(), Some("line"));
        assert_eq!(span.end().as_str(), "t_1");
        assert_eq!(
            spans.header().unmodelled(),
            &[UnmodelledChild {
                parent: None,
                before: 0,
                element: r#"<textspan type="page"/>"#.to_owned(),
            }]
        );
    }

    #[test]
    fn unmodelled_children_remember_their_entry() {
        let input = r#"<D-Spin><TextCorpus><tokens><token ID="t_0">a</token></tokens><depparsing><parse ID="d_0"><dependency func="ROOT" depIDs="t_0"/><emptytoken ID="e_0">PRO</emptytoken></parse></depparsing><references><entity><note>x</note><reference ID="rc_0" tokenIDs="t_0"/></entity></references></TextCorpus></D-Spin>"#;

        let doc = parse_document(input).expect("parse");

        let parses = doc.layers().dep_parsing().expect("depparsing");
        assert_eq!(
            parses.header().unmodelled_at(Some(0), 1).collect::<Vec<_>>(),
            [r#"<emptytoken ID="e_0">PRO</emptytoken>"#]
        );
        let parse = parses.iter().next().expect("parse");
        assert_eq!(parse.dependencies().len(), 1);

        let references = doc.layers().references().expect("references");
        assert_eq!(
            references.header().unmodelled_at(Some(0), 0).collect::<Vec<_>>(),
            ["<note>x</note>"]
        );
    }

    #[test]
    fn corpus_prefix_is_recorded() {
        let input = r#"<D-Spin xmlns="http://www.dspin.de/data"><tc:TextCorpus xmlns:tc="http://www.dspin.de/data/textcorpus"><tc:tokens><tc:token ID="t_0">a</tc:token></tc:tokens></tc:TextCorpus></D-Spin>"#;

        let doc = parse_document(input).expect("parse");
        assert_eq!(doc.frame().and_then(|f| f.prefix.as_deref()), Some("tc"));
        assert_eq!(doc.token("t_0").map(|t| t.text()), Some("a"));
    }

    #[test]
    fn reference_without_id_is_rejected() {
        let input = r#"<D-Spin><TextCorpus><tokens><token ID="t_0">a</token></tokens><references><entity><reference tokenIDs="t_0"/></entity></references></TextCorpus></D-Spin>"#;

        let err = parse_document(input).unwrap_err();
        assert!(
            matches!(err, TcfParseError::MissingAttribute { attribute: "ID", .. }),
            "{err}"
        );
    }
}
