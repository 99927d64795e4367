//! Minimal element tree on top of quick-xml.
//!
//! The clip reader needs random access to children (first match, sibling
//! scans), so the event stream is folded into an owned tree once and the
//! sections walk that. Element names are kept qualified (`aces:Info`),
//! matching how clip files spell them.

use crate::{ClipError, ClipResult};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// An XML element with its attributes, text and child elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// Qualified element name.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Concatenated text content (empty when none).
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Creates an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Sets text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Appends a child element.
    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Returns an attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns text content, `None` if the element has none.
    pub fn text(&self) -> Option<&str> {
        if self.text.is_empty() { None } else { Some(&self.text) }
    }

    /// First child element with the given name.
    pub fn first_child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First child matching any of `names`, tried in the order given.
    pub fn first_child_any(&self, names: &[&str]) -> Option<&XmlElement> {
        names.iter().find_map(|n| self.first_child(n))
    }

    /// All children with the given name, in document order.
    pub fn children_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first child with the given name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.first_child(name).and_then(XmlElement::text)
    }
}

// ============================================================================
// Parsing
// ============================================================================

fn start_element(e: &BytesStart) -> XmlElement {
    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let attributes = e
        .attributes()
        .flatten()
        .map(|a| {
            let key = String::from_utf8_lossy(a.key.as_ref()).to_string();
            let raw = String::from_utf8_lossy(&a.value).to_string();
            let value = match quick_xml::escape::unescape(&raw) {
                Ok(v) => v.into_owned(),
                Err(_) => raw,
            };
            (key, value)
        })
        .collect();
    XmlElement { name, attributes, ..Default::default() }
}

/// Reads an XML file into a tree and returns its document element.
pub fn read_xml(path: &Path) -> ClipResult<XmlElement> {
    let file = File::open(path)?;
    parse_xml(BufReader::new(file))
}

/// Parses XML from a reader and returns its document element.
pub fn parse_xml<R: BufRead>(reader: R) -> ClipResult<XmlElement> {
    // Leaf text is kept verbatim. Text of an element with children is only
    // the indentation between them and is trimmed on close.
    let mut xml = Reader::from_reader(reader);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                stack.push(start_element(&e));
            }
            Ok(Event::Empty(e)) => {
                let elem = start_element(&e);
                match stack.last_mut() {
                    Some(parent) => parent.push(elem),
                    None if root.is_none() => root = Some(elem),
                    None => return Err(ClipError::Xml("multiple root elements".into())),
                }
            }
            Ok(Event::End(_)) => {
                let mut elem = stack
                    .pop()
                    .ok_or_else(|| ClipError::Xml("unbalanced end tag".into()))?;
                if !elem.children.is_empty() {
                    let trimmed = elem.text.trim();
                    if trimmed.len() != elem.text.len() {
                        elem.text = trimmed.to_string();
                    }
                }
                match stack.last_mut() {
                    Some(parent) => parent.push(elem),
                    None if root.is_none() => root = Some(elem),
                    None => return Err(ClipError::Xml("multiple root elements".into())),
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(cur) = stack.last_mut() {
                    cur.text.push_str(&e.decode().unwrap_or_default());
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(cur) = stack.last_mut() {
                    cur.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some(cur) = stack.last_mut() {
                    if let Ok(Some(ch)) = e.resolve_char_ref() {
                        cur.text.push(ch);
                    } else {
                        let name = e.decode().unwrap_or_default();
                        match quick_xml::escape::resolve_predefined_entity(&name) {
                            Some(s) => cur.text.push_str(s),
                            None => {
                                return Err(ClipError::Xml(format!("unknown entity: &{};", name)));
                            }
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ClipError::Xml(format!("{}", e))),
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ClipError::Xml("unexpected end of document".into()));
    }
    root.ok_or_else(|| ClipError::Xml("missing document element".into()))
}

// ============================================================================
// Writing
// ============================================================================

/// Writes a tree as an indented XML document.
pub fn write_xml_to<W: Write>(writer: W, root: &XmlElement) -> ClipResult<()> {
    let mut xml = Writer::new_with_indent(writer, b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(ClipError::write)?;
    write_element(&mut xml, root)
}

fn write_element<W: Write>(xml: &mut Writer<W>, elem: &XmlElement) -> ClipResult<()> {
    let mut start = BytesStart::new(elem.name.as_str());
    for (k, v) in &elem.attributes {
        start.push_attribute((k.as_str(), v.as_str()));
    }

    if elem.text.is_empty() && elem.children.is_empty() {
        xml.write_event(Event::Empty(start)).map_err(ClipError::write)?;
        return Ok(());
    }

    xml.write_event(Event::Start(start)).map_err(ClipError::write)?;
    if !elem.text.is_empty() {
        xml.write_event(Event::Text(BytesText::new(&elem.text)))
            .map_err(ClipError::write)?;
    }
    for child in &elem.children {
        write_element(xml, child)?;
    }
    xml.write_event(Event::End(BytesEnd::new(elem.name.as_str())))
        .map_err(ClipError::write)?;
    Ok(())
}
