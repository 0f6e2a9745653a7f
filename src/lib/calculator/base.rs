// SPDX-License-Identifier: Apache-2.0

use std::collections::{HashMap, HashSet};

use crate::{
    path::format_predicates, DataKind, DataNode, ErrorKind, ListKeys,
    NcDiffError, QName, SchemaNodeId, SchemaTree,
};

/// How the children of two corresponding nodes correspond to each other.
/// Indexes refer to `children` of the two compared nodes, in their original
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeMatch {
    pub only_in_a: Vec<usize>,
    pub only_in_b: Vec<usize>,
    pub paired: Vec<(usize, usize)>,
    /// Schema node of each child of A
    pub a_schema_ids: Vec<SchemaNodeId>,
    /// Schema node of each child of B
    pub b_schema_ids: Vec<SchemaNodeId>,
}

impl NodeMatch {
    /// Child of B paired with child `a_index` of A.
    pub fn peer_of_a(&self, a_index: usize) -> Option<usize> {
        self.paired
            .iter()
            .find(|(a, _)| *a == a_index)
            .map(|(_, b)| *b)
    }
}

// Identity of a config node among its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum NodeIdentity {
    Single(QName),
    LeafListValue(QName, Option<String>),
    ListEntry(QName, Vec<String>),
}

/// Schema aware comparison primitives shared by every protocol calculator.
#[derive(Debug, Clone, Copy)]
pub struct BaseCalculator<'a> {
    pub(crate) schema: &'a SchemaTree,
}

impl<'a> BaseCalculator<'a> {
    pub fn new(schema: &'a SchemaTree) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'a SchemaTree {
        self.schema
    }

    pub(crate) fn identity(
        &self,
        schema_id: SchemaNodeId,
        node: &DataNode,
    ) -> Result<NodeIdentity, NcDiffError> {
        Ok(match self.schema.data_kind(schema_id)? {
            DataKind::Leaf | DataKind::Container => {
                NodeIdentity::Single(node.name.clone())
            }
            DataKind::LeafList => {
                NodeIdentity::LeafListValue(
                    node.name.clone(),
                    node.text.clone(),
                )
            }
            DataKind::List => NodeIdentity::ListEntry(
                node.name.clone(),
                self.list_keys(schema_id, node)?
                    .into_iter()
                    .map(|(_, v)| v)
                    .collect(),
            ),
        })
    }

    /// Key leaves of a list entry in key statement order.
    pub fn list_keys(
        &self,
        schema_id: SchemaNodeId,
        node: &DataNode,
    ) -> Result<ListKeys, NcDiffError> {
        let schema_node = self.schema.node(schema_id);
        let mut ret = Vec::with_capacity(schema_node.keys.len());
        for key in schema_node.keys.as_slice() {
            let value = node
                .child(key)
                .and_then(|c| c.text.clone())
                .ok_or_else(|| {
                    NcDiffError::new(
                        ErrorKind::InvalidConfig,
                        format!(
                            "Entry of list {} is missing key {}",
                            self.schema.xpath(schema_id),
                            self.schema.display_qname(key)
                        ),
                    )
                })?;
            ret.push((key.clone(), value));
        }
        Ok(ret)
    }

    /// Data path of a config node including its list keys or leaf-list
    /// value, used in messages.
    pub fn node_path(
        &self,
        schema_id: SchemaNodeId,
        node: &DataNode,
    ) -> String {
        let path = self.schema.xpath(schema_id);
        match self.schema.data_kind(schema_id) {
            Ok(DataKind::List) => match self.list_keys(schema_id, node) {
                Ok(keys) => {
                    let predicates: Vec<(String, String)> = keys
                        .into_iter()
                        .map(|(k, v)| (self.schema.display_qname(&k), v))
                        .collect();
                    format!("{path}{}", format_predicates(&predicates))
                }
                Err(_) => path,
            },
            Ok(DataKind::LeafList) => format!(
                "{path}{}",
                format_predicates(&[(
                    ".".to_string(),
                    node.text.clone().unwrap_or_default()
                )])
            ),
            _ => path,
        }
    }

    fn index_children(
        &self,
        parent_schema: SchemaNodeId,
        node: &DataNode,
    ) -> Result<
        (Vec<SchemaNodeId>, Vec<NodeIdentity>, HashMap<NodeIdentity, usize>),
        NcDiffError,
    > {
        let mut schema_ids = Vec::with_capacity(node.children.len());
        let mut identities = Vec::with_capacity(node.children.len());
        let mut index: HashMap<NodeIdentity, usize> = HashMap::new();
        for (i, child) in node.children.iter().enumerate() {
            let schema_id =
                self.schema.lookup_child(parent_schema, &child.name)?;
            let identity = self.identity(schema_id, child)?;
            if index.insert(identity.clone(), i).is_some() {
                return Err(NcDiffError::new(
                    ErrorKind::Integrity,
                    format!(
                        "More than one peer found for {}",
                        self.node_path(schema_id, child)
                    ),
                ));
            }
            schema_ids.push(schema_id);
            identities.push(identity);
        }
        Ok((schema_ids, identities, index))
    }

    /// Partition the children of `a` and `b` into "only in A", "only in B"
    /// and peer pairs. Two siblings sharing one identity is an
    /// [ErrorKind::Integrity] error.
    pub fn match_children(
        &self,
        parent_schema: SchemaNodeId,
        a: &DataNode,
        b: &DataNode,
    ) -> Result<NodeMatch, NcDiffError> {
        let (a_schema_ids, a_identities, a_index) =
            self.index_children(parent_schema, a)?;
        let (b_schema_ids, b_identities, b_index) =
            self.index_children(parent_schema, b)?;

        let mut ret = NodeMatch {
            a_schema_ids,
            b_schema_ids,
            ..Default::default()
        };
        for (i, identity) in a_identities.iter().enumerate() {
            match b_index.get(identity) {
                Some(j) => ret.paired.push((i, *j)),
                None => ret.only_in_a.push(i),
            }
        }
        for (j, identity) in b_identities.iter().enumerate() {
            if !a_index.contains_key(identity) {
                ret.only_in_b.push(j);
            }
        }
        log::trace!(
            "Matched children of {}: {} only in A, {} only in B, {} paired",
            a.name.name,
            ret.only_in_a.len(),
            ret.only_in_b.len(),
            ret.paired.len()
        );
        Ok(ret)
    }

    /// Index of the peer of `node` among `siblings`.
    pub(crate) fn find_peer(
        &self,
        schema_id: SchemaNodeId,
        siblings: &[DataNode],
        node: &DataNode,
    ) -> Result<Option<usize>, NcDiffError> {
        let identity = self.identity(schema_id, node)?;
        let mut ret = None;
        for (i, sibling) in siblings.iter().enumerate() {
            if sibling.name != node.name
                || self.identity(schema_id, sibling)? != identity
            {
                continue;
            }
            if ret.is_some() {
                return Err(NcDiffError::new(
                    ErrorKind::Integrity,
                    format!(
                        "More than one peer found for {}",
                        self.node_path(schema_id, node)
                    ),
                ));
            }
            ret = Some(i);
        }
        Ok(ret)
    }

    /// Whether `x` is contained in `y`: same name, text and control
    /// attributes, every child of `x` has a peer in `y` containing it, and
    /// user ordered entries keep their relative order.
    pub fn is_subtree(
        &self,
        schema_id: SchemaNodeId,
        x: &DataNode,
        y: &DataNode,
    ) -> Result<bool, NcDiffError> {
        if x.name != y.name || x.text != y.text || !x.same_control_attrs(y) {
            return Ok(false);
        }
        if x.children.is_empty() && y.children.is_empty() {
            return Ok(true);
        }
        let node_match = self.match_children(schema_id, x, y)?;
        if !node_match.only_in_a.is_empty() {
            return Ok(false);
        }
        for (i, j) in node_match.paired.iter() {
            if !self.is_subtree(
                node_match.a_schema_ids[*i],
                &x.children[*i],
                &y.children[*j],
            )? {
                return Ok(false);
            }
        }
        Ok(self.is_user_order_kept(&node_match))
    }

    fn is_user_order_kept(&self, node_match: &NodeMatch) -> bool {
        let user_ordered: HashSet<SchemaNodeId> = node_match
            .a_schema_ids
            .iter()
            .copied()
            .filter(|id| self.schema.node(*id).is_user_ordered())
            .collect();
        if user_ordered.is_empty() {
            return true;
        }
        let a_to_b: HashMap<usize, usize> =
            node_match.paired.iter().copied().collect();
        let paired_b: HashSet<usize> =
            node_match.paired.iter().map(|(_, j)| *j).collect();

        for schema_id in user_ordered {
            let peers_in_a_order: Vec<usize> = node_match
                .a_schema_ids
                .iter()
                .enumerate()
                .filter(|(_, id)| **id == schema_id)
                .filter_map(|(i, _)| a_to_b.get(&i).copied())
                .collect();
            let peers_in_b_order: Vec<usize> = node_match
                .b_schema_ids
                .iter()
                .enumerate()
                .filter(|(j, id)| **id == schema_id && paired_b.contains(j))
                .map(|(j, _)| j)
                .collect();
            if peers_in_a_order != peers_in_b_order {
                return false;
            }
        }
        true
    }

    pub fn is_equal(
        &self,
        schema_id: SchemaNodeId,
        x: &DataNode,
        y: &DataNode,
    ) -> Result<bool, NcDiffError> {
        Ok(self.is_subtree(schema_id, x, y)?
            && self.is_subtree(schema_id, y, x)?)
    }
}
