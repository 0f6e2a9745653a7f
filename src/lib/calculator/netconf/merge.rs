// SPDX-License-Identifier: Apache-2.0

use super::NetconfCalculator;
use crate::{
    DataKind, DataNode, EditOperation, ErrorKind, InsertPosition, NcDiffError,
    QName, SchemaNodeId, SchemaTree,
};

impl<'a> NetconfCalculator<'a> {
    /// Apply a NETCONF delta on `base` following the `edit-config`
    /// semantics of RFC 6241 with `default-operation` of `merge`.
    /// The `base` is left untouched.
    pub fn merge(
        &self,
        base: &DataNode,
        delta: &DataNode,
    ) -> Result<DataNode, NcDiffError> {
        if base.name != delta.name {
            return Err(NcDiffError::new(
                ErrorKind::InvalidArgument,
                format!(
                    "Cannot merge delta rooted at {} into config rooted at {}",
                    delta.name, base.name
                ),
            ));
        }
        let mut ret = base.clone();
        self.merge_children(
            SchemaTree::ROOT,
            &mut ret,
            delta,
            delta.operation.unwrap_or_default(),
        )?;
        log::debug!(
            "Applied delta of {} nodes, config holds {} nodes",
            delta.count(),
            ret.count()
        );
        Ok(ret)
    }

    fn merge_children(
        &self,
        parent_schema: SchemaNodeId,
        base: &mut DataNode,
        delta: &DataNode,
        inherited: EditOperation,
    ) -> Result<(), NcDiffError> {
        let parent_node = self.schema().node(parent_schema);
        for delta_child in delta.children.iter() {
            let schema_id =
                self.schema().lookup_child(parent_schema, &delta_child.name)?;
            // Key leaves only identify the list entry
            if parent_node.is_key(&delta_child.name) {
                continue;
            }
            let operation = delta_child.operation.unwrap_or(inherited);
            let peer = self.base.find_peer(
                schema_id,
                base.children.as_slice(),
                delta_child,
            )?;
            match (peer, operation) {
                (None, EditOperation::Delete) => {
                    return Err(NcDiffError::new(
                        ErrorKind::DeltaApplication,
                        format!(
                            "data-missing: cannot delete {} as it does not \
                             exist",
                            self.base.node_path(schema_id, delta_child)
                        ),
                    ));
                }
                (None, EditOperation::Remove) => {
                    log::debug!(
                        "Ignoring removal of absent {}",
                        self.base.node_path(schema_id, delta_child)
                    );
                }
                (None, _) => {
                    let new_node =
                        self.build_node(schema_id, delta_child, operation)?;
                    self.insert_node(
                        parent_schema,
                        schema_id,
                        base,
                        new_node,
                        delta_child,
                        None,
                    )?;
                }
                (Some(_), EditOperation::Create) => {
                    return Err(NcDiffError::new(
                        ErrorKind::DeltaApplication,
                        format!(
                            "data-exists: cannot create {} as it already \
                             exists",
                            self.base.node_path(schema_id, delta_child)
                        ),
                    ));
                }
                (Some(i), op) if op.is_deletion() => {
                    base.children.remove(i);
                }
                (Some(i), EditOperation::Replace) => {
                    let new_node =
                        self.build_node(schema_id, delta_child, operation)?;
                    base.children.remove(i);
                    self.insert_node(
                        parent_schema,
                        schema_id,
                        base,
                        new_node,
                        delta_child,
                        Some(i),
                    )?;
                }
                (Some(i), _) => {
                    match self.schema().data_kind(schema_id)? {
                        DataKind::Leaf => {
                            base.children[i].text = delta_child.text.clone();
                        }
                        DataKind::LeafList => (),
                        DataKind::Container | DataKind::List => {
                            self.merge_children(
                                schema_id,
                                &mut base.children[i],
                                delta_child,
                                operation,
                            )?;
                        }
                    }
                    if delta_child.insert.is_some() {
                        let node = base.children.remove(i);
                        self.insert_node(
                            parent_schema,
                            schema_id,
                            base,
                            node,
                            delta_child,
                            Some(i),
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    // New node built from the delta. Its descendants are applied with
    // `operation` inherited.
    fn build_node(
        &self,
        schema_id: SchemaNodeId,
        delta: &DataNode,
        operation: EditOperation,
    ) -> Result<DataNode, NcDiffError> {
        let mut ret = match self.schema().data_kind(schema_id)? {
            DataKind::Leaf | DataKind::LeafList => return Ok(delta.shell()),
            DataKind::Container => DataNode::new(delta.name.clone()),
            DataKind::List => {
                let mut entry = DataNode::new(delta.name.clone());
                for (name, value) in self.base.list_keys(schema_id, delta)? {
                    entry.children.push(DataNode::new_leaf(name, Some(value)));
                }
                entry
            }
        };
        self.merge_children(schema_id, &mut ret, delta, operation)?;
        Ok(ret)
    }

    fn insert_node(
        &self,
        parent_schema: SchemaNodeId,
        schema_id: SchemaNodeId,
        parent: &mut DataNode,
        node: DataNode,
        delta: &DataNode,
        default_index: Option<usize>,
    ) -> Result<(), NcDiffError> {
        let index = self.insert_index(
            parent_schema,
            schema_id,
            parent,
            &node,
            delta,
            default_index,
        )?;
        parent.children.insert(index, node);
        Ok(())
    }

    fn insert_index(
        &self,
        parent_schema: SchemaNodeId,
        schema_id: SchemaNodeId,
        parent: &DataNode,
        node: &DataNode,
        delta: &DataNode,
        default_index: Option<usize>,
    ) -> Result<usize, NcDiffError> {
        let siblings: Vec<usize> = parent
            .children
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name == node.name)
            .map(|(i, _)| i)
            .collect();
        let insert = match delta.insert {
            Some(insert) if self.schema().node(schema_id).is_user_ordered() => {
                insert
            }
            Some(insert) => {
                log::warn!(
                    "Ignoring insert={} on {} as it is not ordered by user",
                    insert.as_str(),
                    self.base.node_path(schema_id, delta)
                );
                InsertPosition::Last
            }
            None => {
                if let Some(i) = default_index {
                    return Ok(i);
                }
                InsertPosition::Last
            }
        };
        let first = siblings.first().copied();
        let last = siblings.last().copied();
        Ok(match insert {
            InsertPosition::First => match first {
                Some(i) => i,
                None => self.schema_order_index(parent_schema, parent, node),
            },
            InsertPosition::Last => match last {
                Some(i) => i + 1,
                None => self.schema_order_index(parent_schema, parent, node),
            },
            insert if insert.need_anchor() => {
                let anchor =
                    self.find_anchor(schema_id, parent, &siblings, delta)?;
                if insert == InsertPosition::Before {
                    anchor
                } else {
                    anchor + 1
                }
            }
            _ => self.schema_order_index(parent_schema, parent, node),
        })
    }

    // After the last child whose schema node comes no later than the one
    // of `node`.
    fn schema_order_index(
        &self,
        parent_schema: SchemaNodeId,
        parent: &DataNode,
        node: &DataNode,
    ) -> usize {
        let position = |name: &QName| {
            self.schema()
                .data_child_position(parent_schema, name)
                .unwrap_or(usize::MAX)
        };
        let wanted = position(&node.name);
        parent
            .children
            .iter()
            .rposition(|c| position(&c.name) <= wanted)
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    fn find_anchor(
        &self,
        schema_id: SchemaNodeId,
        parent: &DataNode,
        siblings: &[usize],
        delta: &DataNode,
    ) -> Result<usize, NcDiffError> {
        let path = self.base.node_path(schema_id, delta);
        let missing = |attr: &str, detail: String| {
            NcDiffError::new(
                ErrorKind::DeltaApplication,
                format!(
                    "Invalid yang:{attr} for insert={} on {path}: {detail}",
                    delta.insert.map(|i| i.as_str()).unwrap_or_default()
                ),
            )
        };
        if self.schema().data_kind(schema_id)? == DataKind::List {
            let anchor_keys = match delta.key.as_ref() {
                Some(k) => k,
                None => {
                    return Err(missing("key", "attribute missing".into()))
                }
            };
            let schema_keys = self.schema().node(schema_id).keys.as_slice();
            let mut wanted = Vec::with_capacity(schema_keys.len());
            for key in schema_keys {
                match anchor_keys.iter().find(|(name, _)| name == key) {
                    Some((_, value)) => wanted.push(value.as_str()),
                    None => {
                        return Err(missing(
                            "key",
                            format!(
                                "key {} not specified",
                                self.schema().display_qname(key)
                            ),
                        ))
                    }
                }
            }
            for i in siblings {
                let keys =
                    self.base.list_keys(schema_id, &parent.children[*i])?;
                let values = keys.iter().map(|(_, v)| v.as_str());
                if values.eq(wanted.iter().copied()) {
                    return Ok(*i);
                }
            }
            Err(missing("key", "no such list entry".into()))
        } else {
            let value = match delta.value.as_deref() {
                Some(v) => v,
                None => {
                    return Err(missing("value", "attribute missing".into()))
                }
            };
            siblings
                .iter()
                .copied()
                .find(|i| parent.children[*i].text() == Some(value))
                .ok_or_else(|| {
                    missing("value", format!("no such leaf-list entry {value}"))
                })
        }
    }
}
