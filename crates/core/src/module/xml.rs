//! Tree model for XML configuration fragments

use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::Serialize;

use crate::error::{Error, Result};

pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const OBJECT_MANAGER_SCHEMA: &str = "urn:magento:framework:ObjectManager/etc/config.xsd";
pub const MODULE_SCHEMA: &str = "urn:magento:framework:Module/etc/module.xsd";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigNode {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub children: Vec<ConfigNode>,
}

impl ConfigNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// A root `config` element bound to the given schema
    pub fn config_root(schema: &str) -> Self {
        Self::new("config")
            .attr("xmlns:xsi", XSI_NAMESPACE)
            .attr("xsi:noNamespaceSchemaLocation", schema)
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn child(mut self, node: ConfigNode) -> Self {
        self.children.push(node);
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn find(&self, name: &str) -> Option<&ConfigNode> {
        self.children.iter().find(|child| child.name == name)
    }

    fn same_identity(&self, other: &ConfigNode) -> bool {
        self.name == other.name && self.get_attr("name") == other.get_attr("name")
    }

    /// Merges `other` into this node. Children with the same element name and
    /// `name` attribute are merged recursively, others are appended in order.
    /// Attributes from `other` win.
    pub fn merge(&mut self, other: ConfigNode) {
        self.attributes.extend(other.attributes);
        if other.text.is_some() {
            self.text = other.text;
        }
        for child in other.children {
            match self.children.iter_mut().find(|c| c.same_identity(&child)) {
                Some(existing) => existing.merge(child),
                None => self.children.push(child),
            }
        }
    }

    /// Parses an XML document back into a node tree. Comments and the
    /// declaration are dropped; whitespace-only text is ignored.
    pub fn from_xml_document(xml: &str) -> Result<ConfigNode> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<ConfigNode> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event().map_err(|e| parse_error(&reader, e))? {
                Event::Start(start) => stack.push(node_from_start(&start)?),
                Event::Empty(start) => {
                    let node = node_from_start(&start)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Event::End(_) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| Error::RenderError("Unbalanced closing tag".to_string()))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| parse_error(&reader, e))?
                        .into_owned();
                    if let Some(node) = stack.last_mut() {
                        node.text.get_or_insert_with(String::new).push_str(&text);
                    }
                }
                Event::CData(data) => {
                    let text = String::from_utf8_lossy(&data).into_owned();
                    if let Some(node) = stack.last_mut() {
                        node.text.get_or_insert_with(String::new).push_str(&text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(Error::RenderError(format!(
                "Unclosed element <{}>",
                stack[stack.len() - 1].name
            )));
        }
        root.ok_or_else(|| Error::RenderError("Document has no root element".to_string()))
    }

    /// Serializes this node as a standalone XML document
    pub fn to_xml_document(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
            .map_err(|e| Error::RenderError(e.to_string()))?;
        self.write_to(&mut writer)?;

        let mut xml = String::from_utf8(writer.into_inner())
            .map_err(|e| Error::RenderError(e.to_string()))?;
        xml.push('\n');
        Ok(xml)
    }

    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() && self.text.is_none() {
            writer
                .write_event(Event::Empty(start))
                .map_err(|e| Error::RenderError(e.to_string()))?;
            return Ok(());
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| Error::RenderError(e.to_string()))?;
        if let Some(text) = &self.text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| Error::RenderError(e.to_string()))?;
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(|e| Error::RenderError(e.to_string()))?;
        Ok(())
    }
}

fn parse_error(reader: &Reader<&[u8]>, error: impl std::fmt::Display) -> Error {
    Error::RenderError(format!(
        "Invalid XML at position {}: {error}",
        reader.buffer_position()
    ))
}

fn node_from_start(start: &BytesStart) -> Result<ConfigNode> {
    let mut node = ConfigNode::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| Error::RenderError(e.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| Error::RenderError(e.to_string()))?
            .into_owned();
        node.attributes.insert(key, value);
    }
    Ok(node)
}

fn attach(stack: &mut [ConfigNode], root: &mut Option<ConfigNode>, node: ConfigNode) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => {
            return Err(Error::RenderError(format!(
                "Second root element <{}>",
                node.name
            )));
        }
    }
    Ok(())
}
