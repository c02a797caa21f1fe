//! Minimal owned XML tree with namespace-aware queries.
//!
//! Registry responses declare their namespace URIs on the root element and the
//! URIs change between service versions, so queries go through the prefixes
//! the document itself declares instead of hard-coded URIs.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use crate::core::AresError;

/// Deepest element nesting accepted by [`XmlDocument::parse`].
pub const MAX_DEPTH: usize = 256;

fn xml_err(e: impl std::fmt::Display) -> AresError {
    AresError::Xml(e.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Element(Element),
    Text(String),
}

/// An element with its resolved namespace URI, attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    namespace: Option<String>,
    local_name: String,
    /// Attributes by qualified name as written (`xmlns:are`, `nespolehlivyPlatce`).
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    fn open(ns: ResolveResult<'_>, start: &BytesStart<'_>) -> Result<Self, AresError> {
        let namespace = match ns {
            ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
            _ => None,
        };
        let local_name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(xml_err)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(xml_err)?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            namespace,
            local_name,
            attributes,
            children: Vec::new(),
        })
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Attribute value by its name as written in the document.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text of this element and all its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    fn child_elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// All descendants (not including `self`) in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.child_elements().rev().collect(),
        }
    }

    /// First descendant with the given namespace URI and local name.
    pub fn find_ns(&self, namespace: &str, local_name: &str) -> Option<&Element> {
        self.descendants()
            .find(|e| e.namespace() == Some(namespace) && e.local_name == local_name)
    }

    /// First descendant with the given local name, in any namespace.
    pub fn find_local(&self, local_name: &str) -> Option<&Element> {
        self.descendants().find(|e| e.local_name == local_name)
    }
}

/// Pre-order iterator over an element's descendants.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.child_elements().rev());
        Some(next)
    }
}

/// A parsed document plus the namespace prefixes declared on its root.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    root: Element,
    bindings: BTreeMap<String, String>,
}

impl XmlDocument {
    pub fn parse(xml: &str) -> Result<Self, AresError> {
        let mut reader = NsReader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let (ns, event) = reader.read_resolved_event().map_err(xml_err)?;
            match event {
                Event::Start(ref e) => {
                    if stack.len() >= MAX_DEPTH {
                        return Err(AresError::Xml(format!(
                            "elements nested deeper than {MAX_DEPTH} levels"
                        )));
                    }
                    let element = Element::open(ns, e)?;
                    stack.push(element);
                }
                Event::Empty(ref e) => {
                    let element = Element::open(ns, e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| AresError::Xml("unexpected closing tag".into()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(ref e) => {
                    let text = e.unescape().map_err(xml_err)?;
                    push_text(&mut stack, text);
                }
                Event::CData(e) => {
                    let bytes = e.into_inner();
                    push_text(&mut stack, String::from_utf8_lossy(&bytes));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(AresError::Xml("unexpected end of document".into()));
        }
        let root = root.ok_or_else(|| AresError::Xml("document has no root element".into()))?;

        let bindings = root
            .attributes
            .iter()
            .filter_map(|(k, v)| {
                k.strip_prefix("xmlns:")
                    .map(|prefix| (prefix.to_string(), v.clone()))
            })
            .collect();

        Ok(Self { root, bindings })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Namespace URI bound to `prefix` on the root element.
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }

    pub fn bindings(&self) -> &BTreeMap<String, String> {
        &self.bindings
    }

    /// Adopt `other`'s bindings for prefixes this document does not declare.
    pub fn inherit_bindings(&mut self, other: &XmlDocument) {
        for (prefix, uri) in &other.bindings {
            self.bindings
                .entry(prefix.clone())
                .or_insert_with(|| uri.clone());
        }
    }

    fn resolve(&self, prefix: &str) -> Result<&str, AresError> {
        self.namespace(prefix).ok_or_else(|| {
            AresError::Xml(format!(
                "namespace prefix '{prefix}' is not declared on <{}>",
                self.root.local_name
            ))
        })
    }

    /// First descendant of the root matching `prefix:local_name`.
    pub fn find(&self, prefix: &str, local_name: &str) -> Result<Option<&Element>, AresError> {
        let ns = self.resolve(prefix)?;
        Ok(self.root.find_ns(ns, local_name))
    }

    /// Text of the first descendant matching `prefix:local_name`.
    pub fn find_text(&self, prefix: &str, local_name: &str) -> Result<Option<String>, AresError> {
        Ok(self.find(prefix, local_name)?.map(Element::text))
    }

    /// All descendants of the root matching `prefix:local_name`.
    pub fn find_all(&self, prefix: &str, local_name: &str) -> Result<Vec<&Element>, AresError> {
        let ns = self.resolve(prefix)?;
        Ok(self
            .root
            .descendants()
            .filter(|e| e.namespace() == Some(ns) && e.local_name == local_name)
            .collect())
    }

    /// First descendant with the given local name, in any namespace.
    pub fn find_local(&self, local_name: &str) -> Option<&Element> {
        self.root.find_local(local_name)
    }
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), AresError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return Err(AresError::Xml("multiple root elements".into())),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: Cow<'_, str>) {
    // Whitespace outside the root and formatting between elements carry no data.
    if text.trim().is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Text(text.into_owned()));
    }
}

fn xml_io(e: std::io::Error) -> AresError {
    AresError::Xml(format!("XML write error: {e}"))
}

/// Small builder for outgoing XML documents (SOAP envelopes).
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, AresError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_string(self) -> Result<String, AresError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| AresError::Xml(format!("XML UTF-8 error: {e}")))
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, AresError> {
        self.start_element_with_attrs(name, &[])
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, AresError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, AresError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, AresError> {
        self.start_element(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }
}
