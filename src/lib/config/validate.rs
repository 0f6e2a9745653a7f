// SPDX-License-Identifier: Apache-2.0

use crate::{
    BaseCalculator, DataKind, DataNode, ErrorKind, NcDiffError, QName,
    SchemaNodeId, SchemaTree,
};

pub(crate) fn validate_config(
    schema: &SchemaTree,
    root: &DataNode,
) -> Result<(), NcDiffError> {
    if let Some(node) = root.find_control_attrs() {
        return Err(NcDiffError::new(
            ErrorKind::InvalidConfig,
            format!(
                "Config should not hold operation or insert attributes, \
                 but found on {}",
                schema.display_qname(&node.name)
            ),
        ));
    }
    validate_delta(schema, root)
}

/// Shape check shared by config and delta trees: every node has a schema
/// node, only containers and list entries hold children, list entries
/// hold all their keys.
pub(crate) fn validate_delta(
    schema: &SchemaTree,
    root: &DataNode,
) -> Result<(), NcDiffError> {
    if root.name != QName::config_root() {
        return Err(NcDiffError::new(
            ErrorKind::InvalidConfig,
            format!(
                "Root element should be {}, but got {}",
                QName::config_root(),
                root.name
            ),
        ));
    }
    validate_children(&BaseCalculator::new(schema), SchemaTree::ROOT, root)
}

fn validate_children(
    base: &BaseCalculator,
    parent_schema: SchemaNodeId,
    node: &DataNode,
) -> Result<(), NcDiffError> {
    let schema = base.schema();
    for child in node.children.iter() {
        let schema_id = schema.lookup_child(parent_schema, &child.name)?;
        match schema.data_kind(schema_id)? {
            DataKind::Leaf | DataKind::LeafList => {
                if !child.children.is_empty() {
                    return Err(NcDiffError::new(
                        ErrorKind::InvalidConfig,
                        format!(
                            "{} is a {} and cannot hold child nodes",
                            schema.xpath(schema_id),
                            schema.node(schema_id).node_type
                        ),
                    ));
                }
            }
            kind => {
                if child.text.is_some() {
                    return Err(NcDiffError::new(
                        ErrorKind::InvalidConfig,
                        format!(
                            "{} is a {} and cannot hold text",
                            schema.xpath(schema_id),
                            schema.node(schema_id).node_type
                        ),
                    ));
                }
                if kind == DataKind::List {
                    base.list_keys(schema_id, child)?;
                }
                validate_children(base, schema_id, child)?;
            }
        }
    }
    Ok(())
}

/// Drop containers left without children unless they carry presence
/// meaning.
pub(crate) fn prune_empty_containers(
    schema: &SchemaTree,
    parent_schema: SchemaNodeId,
    node: &mut DataNode,
) {
    node.children.retain_mut(|child| {
        let schema_id = match schema.data_child(parent_schema, &child.name) {
            Some(id) => id,
            None => return true,
        };
        match schema.data_kind(schema_id) {
            Ok(DataKind::Container) => {
                prune_empty_containers(schema, schema_id, child);
                if child.children.is_empty()
                    && !schema.node(schema_id).presence
                {
                    log::trace!(
                        "Pruning empty container {}",
                        schema.xpath(schema_id)
                    );
                    false
                } else {
                    true
                }
            }
            Ok(DataKind::List) => {
                prune_empty_containers(schema, schema_id, child);
                true
            }
            _ => true,
        }
    });
}
