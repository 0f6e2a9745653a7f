// SPDX-License-Identifier: Apache-2.0

use super::NetconfCalculator;
use crate::{
    DataKind, DataNode, ErrorKind, NcDiffError, SchemaNodeId, SchemaTree,
};

impl<'a> NetconfCalculator<'a> {
    /// Delta turning `source` into `target`. Both trees must be rooted at
    /// the config root.
    pub fn diff(
        &self,
        target: &DataNode,
        source: &DataNode,
    ) -> Result<DataNode, NcDiffError> {
        if target.name != source.name {
            return Err(NcDiffError::new(
                ErrorKind::InvalidArgument,
                format!(
                    "Cannot diff trees of different roots {} and {}",
                    target.name, source.name
                ),
            ));
        }
        let mut ret = DataNode::new(target.name.clone());
        ret.children = self.diff_children(SchemaTree::ROOT, target, source)?;
        log::debug!(
            "NETCONF delta holds {} nodes under {} top level nodes",
            ret.count() - 1,
            ret.children.len()
        );
        Ok(ret)
    }

    // Deletions come first, then changes in the order of `target`.
    pub(crate) fn diff_children(
        &self,
        parent_schema: SchemaNodeId,
        target: &DataNode,
        source: &DataNode,
    ) -> Result<Vec<DataNode>, NcDiffError> {
        let node_match =
            self.base.match_children(parent_schema, target, source)?;
        let mut ret = Vec::new();
        for j in node_match.only_in_b.iter() {
            ret.push(self.deletion_stub(
                node_match.b_schema_ids[*j],
                &source.children[*j],
            )?);
        }

        let mut changes: Vec<Option<DataNode>> =
            vec![None; target.children.len()];
        for i in node_match.only_in_a.iter() {
            changes[*i] = Some(self.creation(&target.children[*i]));
        }
        for (i, j) in node_match.paired.iter() {
            changes[*i] = self.diff_peers(
                node_match.a_schema_ids[*i],
                &target.children[*i],
                &source.children[*j],
            )?;
        }
        self.mark_user_order(target, &node_match, &mut changes)?;
        ret.extend(changes.into_iter().flatten());
        Ok(ret)
    }

    fn deletion_stub(
        &self,
        schema_id: SchemaNodeId,
        node: &DataNode,
    ) -> Result<DataNode, NcDiffError> {
        let mut ret = match self.schema().data_kind(schema_id)? {
            DataKind::Leaf | DataKind::Container => {
                DataNode::new(node.name.clone())
            }
            DataKind::LeafList => node.shell(),
            DataKind::List => self.list_entry_stub(schema_id, node),
        };
        ret.operation = self.option.delete_attr();
        Ok(ret)
    }

    fn creation(&self, node: &DataNode) -> DataNode {
        let mut ret = node.clone();
        ret.operation = self.option.create_attr();
        ret
    }

    // List entry holding its key leaves only.
    pub(crate) fn list_entry_stub(
        &self,
        schema_id: SchemaNodeId,
        node: &DataNode,
    ) -> DataNode {
        let schema_node = self.schema().node(schema_id);
        let mut ret = DataNode::new(node.name.clone());
        ret.children = node
            .children
            .iter()
            .filter(|c| schema_node.is_key(&c.name))
            .cloned()
            .collect();
        ret
    }

    fn diff_peers(
        &self,
        schema_id: SchemaNodeId,
        target: &DataNode,
        source: &DataNode,
    ) -> Result<Option<DataNode>, NcDiffError> {
        Ok(match self.schema().data_kind(schema_id)? {
            DataKind::Leaf => {
                if target.text == source.text {
                    None
                } else {
                    let mut ret = target.clone();
                    ret.operation = self.option.replace_attr();
                    Some(ret)
                }
            }
            // Peers of leaf-list share the same value
            DataKind::LeafList => None,
            DataKind::Container => {
                let children =
                    self.diff_children(schema_id, target, source)?;
                if children.is_empty() {
                    None
                } else {
                    let mut ret = DataNode::new(target.name.clone());
                    ret.children = children;
                    Some(ret)
                }
            }
            DataKind::List => {
                let children =
                    self.diff_children(schema_id, target, source)?;
                if children.is_empty() {
                    None
                } else {
                    let mut ret = self.list_entry_stub(schema_id, target);
                    ret.children.extend(children);
                    Some(ret)
                }
            }
        })
    }
}
