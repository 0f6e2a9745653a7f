// SPDX-License-Identifier: Apache-2.0

use quick_xml::{
    events::{BytesStart, Event},
    name::{QName as XmlName, ResolveResult},
    reader::NsReader,
};

use crate::{
    path::parse_predicates, tag::NETCONF_BASE_NS, tag::YANG_NS, DataNode,
    ErrorKind, NcDiffError, QName,
};

/// Parse a XML document into a [DataNode] tree rooted at the document
/// element. Whitespace only text is dropped, other text is kept as is.
pub(crate) fn data_node_from_xml(xml: &str) -> Result<DataNode, NcDiffError> {
    let mut reader = NsReader::from_str(xml);

    let mut stack: Vec<DataNode> = Vec::new();
    let mut root: Option<DataNode> = None;

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        let ns = resolved_namespace(ns)?;
        match event {
            Event::Start(e) => {
                stack.push(new_node(&reader, ns, &e)?);
            }
            Event::Empty(e) => {
                let node = new_node(&reader, ns, &e)?;
                close_node(node, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| {
                    NcDiffError::new(
                        ErrorKind::InvalidXml,
                        "Unexpected closing tag".to_string(),
                    )
                })?;
                close_node(node, &mut stack, &mut root)?;
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                append_text(&mut stack, &text)?;
            }
            Event::CData(c) => {
                let text = String::from_utf8(c.into_inner().into_owned())?;
                append_text(&mut stack, &text)?;
            }
            Event::Eof => break,
            _ => (),
        }
    }

    if let Some(node) = stack.last() {
        return Err(NcDiffError::new(
            ErrorKind::InvalidXml,
            format!("Element {} is not closed", node.name.name),
        ));
    }
    root.ok_or_else(|| {
        NcDiffError::new(
            ErrorKind::InvalidXml,
            "XML document holds no element".to_string(),
        )
    })
}

fn resolved_namespace(ns: ResolveResult) -> Result<String, NcDiffError> {
    match ns {
        ResolveResult::Bound(ns) => {
            Ok(String::from_utf8(ns.as_ref().to_vec())?)
        }
        ResolveResult::Unbound => Ok(String::new()),
        ResolveResult::Unknown(prefix) => Err(NcDiffError::new(
            ErrorKind::InvalidXml,
            format!(
                "Undeclared namespace prefix {}",
                String::from_utf8_lossy(&prefix)
            ),
        )),
    }
}

fn new_node(
    reader: &NsReader<&[u8]>,
    namespace: String,
    e: &BytesStart,
) -> Result<DataNode, NcDiffError> {
    let name = String::from_utf8(e.local_name().as_ref().to_vec())?;
    let mut node = DataNode::new(QName { namespace, name });

    for attr in e.attributes() {
        let attr = attr?;
        let raw_key = attr.key.as_ref();
        if raw_key == b"xmlns" || raw_key.starts_with(b"xmlns:") {
            continue;
        }
        let (attr_ns, local) = reader.resolve_attribute(attr.key);
        let attr_ns = resolved_namespace(attr_ns)?;
        let value = attr.unescape_value()?.to_string();
        match (attr_ns.as_str(), local.as_ref()) {
            (NETCONF_BASE_NS, b"operation") => {
                node.operation = Some(value.parse()?);
            }
            (YANG_NS, b"insert") => {
                node.insert = Some(value.parse()?);
            }
            (YANG_NS, b"value") => {
                node.value = Some(value);
            }
            (YANG_NS, b"key") => {
                node.key = Some(parse_key_attr(reader, &node.name, &value)?);
            }
            _ => {
                return Err(NcDiffError::new(
                    ErrorKind::InvalidXml,
                    format!(
                        "Unsupported attribute {} on element {}",
                        String::from_utf8_lossy(raw_key),
                        node.name.name
                    ),
                ));
            }
        }
    }
    Ok(node)
}

// Key names in `yang:key` are resolved against the namespace declarations in
// scope, unprefixed names belong to the list itself.
fn parse_key_attr(
    reader: &NsReader<&[u8]>,
    list_name: &QName,
    value: &str,
) -> Result<Vec<(QName, String)>, NcDiffError> {
    let mut ret = Vec::new();
    for (name, key_value) in parse_predicates(value)? {
        let qname = if name.contains(':') {
            let (ns, local) = reader.resolve_element(XmlName(name.as_bytes()));
            QName {
                namespace: resolved_namespace(ns)?,
                name: String::from_utf8(local.as_ref().to_vec())?,
            }
        } else {
            QName::new(&list_name.namespace, &name)
        };
        ret.push((qname, key_value));
    }
    Ok(ret)
}

fn append_text(
    stack: &mut [DataNode],
    text: &str,
) -> Result<(), NcDiffError> {
    if let Some(node) = stack.last_mut() {
        match node.text.as_mut() {
            Some(t) => t.push_str(text),
            None => node.text = Some(text.to_string()),
        }
        Ok(())
    } else if text.trim().is_empty() {
        Ok(())
    } else {
        Err(NcDiffError::new(
            ErrorKind::InvalidXml,
            format!("Text '{text}' found outside of root element"),
        ))
    }
}

fn close_node(
    mut node: DataNode,
    stack: &mut [DataNode],
    root: &mut Option<DataNode>,
) -> Result<(), NcDiffError> {
    // Indentation between elements
    if node.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
        node.text = None;
    }
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        Ok(())
    } else if root.is_none() {
        *root = Some(node);
        Ok(())
    } else {
        Err(NcDiffError::new(
            ErrorKind::InvalidXml,
            "XML document holds more than one root element".to_string(),
        ))
    }
}
