// SPDX-License-Identifier: Apache-2.0

use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use crate::{
    path::format_predicates, tag::NETCONF_BASE_NS, tag::YANG_NS, DataNode,
    ErrorKind, NamespaceMap, NcDiffError, TagNotation,
};

const NC_PREFIX: &str = "nc";
const YANG_PREFIX: &str = "yang";

/// Render the tree as indented XML. The default namespace is declared
/// whenever it changes from the parent element.
pub(crate) fn data_node_to_xml(
    node: &DataNode,
    namespaces: &NamespaceMap,
) -> Result<String, NcDiffError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let (has_nc_attr, has_yang_attr) = scan_control_attrs(node);
    write_node(
        &mut writer,
        node,
        None,
        namespaces,
        has_nc_attr,
        has_yang_attr,
    )?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn scan_control_attrs(node: &DataNode) -> (bool, bool) {
    let mut has_nc = node.operation.is_some();
    let mut has_yang =
        node.insert.is_some() || node.value.is_some() || node.key.is_some();
    for child in node.children.as_slice() {
        let (nc, yang) = scan_control_attrs(child);
        has_nc |= nc;
        has_yang |= yang;
    }
    (has_nc, has_yang)
}

fn write_error<E: std::fmt::Display>(e: E) -> NcDiffError {
    NcDiffError::new(
        ErrorKind::Bug,
        format!("Failed to generate XML: {e}"),
    )
}

fn write_node(
    writer: &mut Writer<Vec<u8>>,
    node: &DataNode,
    parent_ns: Option<&str>,
    namespaces: &NamespaceMap,
    declare_nc: bool,
    declare_yang: bool,
) -> Result<(), NcDiffError> {
    let mut elem = BytesStart::new(node.name.name.as_str());
    if parent_ns != Some(node.name.namespace.as_str())
        && !node.name.namespace.is_empty()
    {
        elem.push_attribute(("xmlns", node.name.namespace.as_str()));
    }
    if declare_nc {
        elem.push_attribute((
            format!("xmlns:{NC_PREFIX}").as_str(),
            NETCONF_BASE_NS,
        ));
    }
    if declare_yang {
        elem.push_attribute((
            format!("xmlns:{YANG_PREFIX}").as_str(),
            YANG_NS,
        ));
    }
    if let Some(operation) = node.operation {
        elem.push_attribute((
            format!("{NC_PREFIX}:operation").as_str(),
            operation.as_str(),
        ));
    }
    if let Some(insert) = node.insert {
        elem.push_attribute((
            format!("{YANG_PREFIX}:insert").as_str(),
            insert.as_str(),
        ));
    }
    if let Some(value) = node.value.as_deref() {
        elem.push_attribute((format!("{YANG_PREFIX}:value").as_str(), value));
    }
    if let Some(keys) = node.key.as_ref() {
        let mut predicates = Vec::new();
        let mut declared: Vec<String> = Vec::new();
        for (key_name, key_value) in keys {
            let prefixed = namespaces.format_qname(
                "",
                key_name,
                TagNotation::Prefixed,
            )?;
            if let Some((prefix, _)) = prefixed.split_once(':') {
                if !declared.iter().any(|p| p == prefix) {
                    declared.push(prefix.to_string());
                    elem.push_attribute((
                        format!("xmlns:{prefix}").as_str(),
                        key_name.namespace.as_str(),
                    ));
                }
            }
            predicates.push((prefixed, key_value.clone()));
        }
        elem.push_attribute((
            format!("{YANG_PREFIX}:key").as_str(),
            format_predicates(&predicates).as_str(),
        ));
    }

    if node.children.is_empty() && node.text.is_none() {
        writer.write_event(Event::Empty(elem)).map_err(write_error)?;
        return Ok(());
    }

    writer.write_event(Event::Start(elem)).map_err(write_error)?;
    if let Some(text) = node.text.as_deref() {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(write_error)?;
    }
    for child in node.children.as_slice() {
        write_node(
            writer,
            child,
            Some(node.name.namespace.as_str()),
            namespaces,
            false,
            false,
        )?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(node.name.name.as_str())))
        .map_err(write_error)?;
    Ok(())
}
