// SPDX-License-Identifier: Apache-2.0

use crate::{
    path::{parse_path, PathStep},
    DataKind, DataNode, NcDiffError, QName, SchemaNodeId, SchemaTree,
    TagNotation,
};

pub(crate) fn filter_root(
    schema: &SchemaTree,
    root: &DataNode,
    path: &str,
) -> Result<DataNode, NcDiffError> {
    let steps = parse_path(path)?;
    let mut ret = DataNode::new(root.name.clone());
    ret.children =
        filter_children(schema, SchemaTree::ROOT, root, steps.as_slice())?;
    log::debug!(
        "Filter {path} selected {} top level nodes",
        ret.children.len()
    );
    Ok(ret)
}

fn filter_children(
    schema: &SchemaTree,
    parent_schema: SchemaNodeId,
    node: &DataNode,
    steps: &[PathStep],
) -> Result<Vec<DataNode>, NcDiffError> {
    let (step, rest) = match steps.split_first() {
        Some(s) => s,
        None => return Ok(Vec::new()),
    };
    let default_ns = if parent_schema == SchemaTree::ROOT {
        ""
    } else {
        node.name.namespace.as_str()
    };
    let name = schema.namespaces().parse_tag(
        default_ns,
        &step.name,
        TagNotation::Prefixed,
    )?;
    let schema_id = schema.lookup_child(parent_schema, &name)?;
    let schema_node = schema.node(schema_id);

    let mut ret = Vec::new();
    for child in node.children.iter().filter(|c| c.name == name) {
        if !match_predicates(schema, child, &step.predicates)? {
            continue;
        }
        if rest.is_empty() {
            ret.push(child.clone());
            continue;
        }
        let selected = filter_children(schema, schema_id, child, rest)?;
        if selected.is_empty() {
            continue;
        }
        let mut ancestor = DataNode::new(child.name.clone());
        if schema.data_kind(schema_id)? == DataKind::List {
            ancestor.children = child
                .children
                .iter()
                .filter(|c| {
                    schema_node.is_key(&c.name)
                        && !selected.iter().any(|s| s.name == c.name)
                })
                .cloned()
                .collect();
        }
        ancestor.children.extend(selected);
        ret.push(ancestor);
    }
    Ok(ret)
}

// Predicates are `prefix:key='value'` for list entries and `.='value'` for
// leaf-list entries.
fn match_predicates(
    schema: &SchemaTree,
    node: &DataNode,
    predicates: &[(String, String)],
) -> Result<bool, NcDiffError> {
    for (name, value) in predicates {
        let text = if name == "." {
            node.text()
        } else {
            let key: QName = schema.namespaces().parse_tag(
                node.name.namespace.as_str(),
                name,
                TagNotation::Prefixed,
            )?;
            node.child(&key).and_then(|c| c.text())
        };
        if text != Some(value.as_str()) {
            return Ok(false);
        }
    }
    Ok(true)
}
