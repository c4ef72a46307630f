// SPDX-License-Identifier: Apache-2.0
// Copyright 2025, 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A small owned XML element tree.
//!
//! The AIXM parser needs to look ahead and count children (exactly one volume
//! per component, exactly one ring per volume) before it decides how to read
//! an element. This is awkward on a pull parser, so the document is first read
//! into a tree of [`Element`]s with quick-xml and then walked with a handful of
//! find-by-name queries. Names are namespace-resolved: a query matches on the
//! namespace URI and the local name, never on the prefix used in the document.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::Error;

/// An XML element with its resolved name, attributes, text and children.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Element {
    namespace: Option<String>,
    name: String,
    attributes: Vec<Attribute>,
    text: String,
    children: Vec<Element>,
}

#[derive(Clone, PartialEq, Debug)]
struct Attribute {
    namespace: Option<String>,
    name: String,
    value: String,
}

impl Element {
    /// Reads a complete document and returns its root element.
    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        let mut reader = NsReader::from_reader(data);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            buf.clear();
            let (ns, event) = reader.read_resolved_event_into(&mut buf)?;
            let namespace = namespace_uri(ns)?;

            match event {
                Event::Start(e) => {
                    stack.push(Element::from_start(&reader, namespace, &e)?);
                }
                Event::Empty(e) => {
                    let element = Element::from_start(&reader, namespace, &e)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
                Event::End(_) => {
                    // quick-xml checks that end tags match their start tags
                    if let Some(element) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(element),
                            None => root = Some(element),
                        }
                    }
                }
                Event::Text(t) => {
                    if let Some(element) = stack.last_mut() {
                        element.text.push_str(&t.unescape()?);
                    }
                }
                Event::CData(c) => {
                    if let Some(element) = stack.last_mut() {
                        element.text.push_str(std::str::from_utf8(&c)?);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(Error::Xml("unexpected end of document".to_string()));
        }

        root.ok_or_else(|| Error::Xml("document has no root element".to_string()))
    }

    fn from_start(
        reader: &NsReader<&[u8]>,
        namespace: Option<String>,
        start: &BytesStart<'_>,
    ) -> Result<Self, Error> {
        let name = std::str::from_utf8(start.local_name().as_ref())?.to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let (ns, local) = reader.resolve_attribute(attr.key);
            attributes.push(Attribute {
                namespace: namespace_uri(ns)?,
                name: std::str::from_utf8(local.as_ref())?.to_string(),
                value: attr.unescape_value()?.into_owned(),
            });
        }

        Ok(Self {
            namespace,
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    /// Returns the local name of the element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the namespace URI of the element, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns `true` if the element has the namespace `ns` and local `name`.
    pub fn is(&self, ns: &str, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(ns)
    }

    /// Returns the trimmed text content of the element.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the value of an unqualified attribute like `uom`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns the value of a namespaced attribute like `xlink:href`.
    pub fn attribute_ns(&self, ns: &str, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == Some(ns) && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns all direct children in document order.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }

    /// Returns the first direct child with the given name.
    pub fn child(&self, ns: &str, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.is(ns, name))
    }

    /// Returns all elements below this one with the given name, in document
    /// order. The element itself is not included.
    pub fn descendants<'a, 'n>(&'a self, ns: &'n str, name: &'n str) -> Descendants<'a, 'n> {
        Descendants {
            stack: self.children.iter().rev().collect(),
            ns,
            name,
        }
    }

    /// Returns the first element below this one with the given name.
    pub fn descendant(&self, ns: &str, name: &str) -> Option<&Element> {
        self.descendants(ns, name).next()
    }
}

/// Depth-first iterator over the matching descendants of an [`Element`].
pub struct Descendants<'a, 'n> {
    stack: Vec<&'a Element>,
    ns: &'n str,
    name: &'n str,
}

impl<'a> Iterator for Descendants<'a, '_> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(element) = self.stack.pop() {
            self.stack.extend(element.children.iter().rev());
            if element.is(self.ns, self.name) {
                return Some(element);
            }
        }
        None
    }
}

fn namespace_uri(ns: ResolveResult<'_>) -> Result<Option<String>, Error> {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(std::str::from_utf8(uri)?.to_string())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(Error::Xml(format!(
            "unknown namespace prefix: {}",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS_A: &str = "urn:test:a";
    const NS_B: &str = "urn:test:b";

    const XML: &[u8] = br#"
    <a:root xmlns:a="urn:test:a" xmlns:b="urn:test:b" xmlns:x="http://www.w3.org/1999/xlink">
      <a:item id="1">first</a:item>
      <b:item>other namespace</b:item>
      <a:group>
        <a:item id="2" x:href="urn:uuid:42"/>
        <a:nested><a:item id="3">&lt;escaped&gt;</a:item></a:nested>
      </a:group>
    </a:root>"#;

    #[test]
    fn parse_tree() {
        let root = Element::parse(XML).unwrap();
        assert!(root.is(NS_A, "root"));
        assert_eq!(root.children().count(), 3);
        assert_eq!(root.child(NS_B, "item").unwrap().text(), "other namespace");
    }

    #[test]
    fn descendants_are_in_document_order() {
        let root = Element::parse(XML).unwrap();
        let ids: Vec<_> = root
            .descendants(NS_A, "item")
            .filter_map(|e| e.attribute("id"))
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn resolves_attribute_namespaces() {
        let root = Element::parse(XML).unwrap();
        let group = root.child(NS_A, "group").unwrap();
        let item = group.child(NS_A, "item").unwrap();
        assert_eq!(
            item.attribute_ns("http://www.w3.org/1999/xlink", "href"),
            Some("urn:uuid:42")
        );
        assert_eq!(item.attribute("href"), None);
    }

    #[test]
    fn unescapes_text() {
        let root = Element::parse(XML).unwrap();
        let nested = root.descendant(NS_A, "nested").unwrap();
        assert_eq!(nested.child(NS_A, "item").unwrap().text(), "<escaped>");
    }

    #[test]
    fn descendant_outlives_query() {
        let root = Element::parse(XML).unwrap();
        let nested = {
            let name = String::from("nested");
            root.descendant(NS_A, &name)
        };
        assert_eq!(nested.map(Element::name), Some("nested"));
    }

    #[test]
    fn rejects_truncated_document() {
        assert!(Element::parse(b"<a><b></b>").is_err());
        assert!(Element::parse(b"").is_err());
    }
}
