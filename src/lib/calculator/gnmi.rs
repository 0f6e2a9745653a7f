// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::JsonEncoder;
use crate::{
    BaseCalculator, DataKind, DataNode, ErrorKind, JsonDisplay, NcDiffError,
    NodeMatch, QName, SchemaNodeId, SchemaTree,
};

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonDisplay,
)]
#[non_exhaustive]
pub struct GnmiPathElem {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub key: BTreeMap<String, String>,
}

impl GnmiPathElem {
    pub fn new(name: String) -> Self {
        Self {
            name,
            key: BTreeMap::new(),
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[non_exhaustive]
pub struct GnmiPath {
    pub elem: Vec<GnmiPathElem>,
}

impl GnmiPath {
    fn join(&self, elem: GnmiPathElem) -> Self {
        let mut ret = self.clone();
        ret.elem.push(elem);
        ret
    }
}

// `/name[key=value]/name` form used by gNMI tooling.
impl std::fmt::Display for GnmiPath {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.elem.is_empty() {
            return write!(f, "/");
        }
        for elem in self.elem.iter() {
            write!(f, "/{}", elem.name)?;
            for (k, v) in elem.key.iter() {
                write!(f, "[{k}={v}]")?;
            }
        }
        Ok(())
    }
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonDisplay,
)]
#[non_exhaustive]
pub struct GnmiTypedValue {
    /// RFC 7951 JSON text
    pub json_val: String,
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonDisplay,
)]
#[non_exhaustive]
pub struct GnmiUpdate {
    pub path: GnmiPath,
    pub val: GnmiTypedValue,
}

impl GnmiUpdate {
    fn new(path: GnmiPath, value: &serde_json::Value) -> Self {
        Self {
            path,
            val: GnmiTypedValue {
                json_val: value.to_string(),
            },
        }
    }
}

/// gNMI `SetRequest`, deletions are processed first, then replaces and
/// updates.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonDisplay,
)]
#[non_exhaustive]
pub struct GnmiSetRequest {
    #[serde(default)]
    pub delete: Vec<GnmiPath>,
    #[serde(default)]
    pub replace: Vec<GnmiUpdate>,
    #[serde(default)]
    pub update: Vec<GnmiUpdate>,
}

impl GnmiSetRequest {
    pub fn is_empty(&self) -> bool {
        self.delete.is_empty()
            && self.replace.is_empty()
            && self.update.is_empty()
    }
}

/// Renders the difference of two config trees as a gNMI `SetRequest`.
#[derive(Debug, Clone, Copy)]
pub struct GnmiCalculator<'a> {
    base: BaseCalculator<'a>,
    json: JsonEncoder<'a>,
}

impl<'a> GnmiCalculator<'a> {
    pub fn new(schema: &'a SchemaTree) -> Self {
        Self {
            base: BaseCalculator::new(schema),
            json: JsonEncoder::new(schema),
        }
    }

    fn schema(&self) -> &'a SchemaTree {
        self.base.schema
    }

    /// `SetRequest` turning `source` into `target`.
    pub fn diff(
        &self,
        target: &DataNode,
        source: &DataNode,
    ) -> Result<GnmiSetRequest, NcDiffError> {
        if target.name != source.name {
            return Err(NcDiffError::new(
                ErrorKind::InvalidArgument,
                format!(
                    "Cannot diff trees of different roots {} and {}",
                    target.name, source.name
                ),
            ));
        }
        let mut ret = GnmiSetRequest::default();
        self.diff_children(
            SchemaTree::ROOT,
            &GnmiPath::default(),
            target,
            source,
            &mut ret,
        )?;
        log::debug!(
            "Generated gNMI SetRequest with {} delete, {} replace and {} \
             update",
            ret.delete.len(),
            ret.replace.len(),
            ret.update.len()
        );
        Ok(ret)
    }

    fn diff_children(
        &self,
        parent_schema: SchemaNodeId,
        parent_path: &GnmiPath,
        target: &DataNode,
        source: &DataNode,
        request: &mut GnmiSetRequest,
    ) -> Result<(), NcDiffError> {
        let node_match =
            self.base.match_children(parent_schema, target, source)?;
        let replaced = self.replaced_wholly(&node_match, target, source)?;

        // Whole leaf-list or list replacement
        for schema_id in replaced.iter() {
            let name = &self.schema().node(*schema_id).name;
            let entries: Vec<&DataNode> =
                target.children.iter().filter(|c| &c.name == name).collect();
            let path = parent_path.join(GnmiPathElem::new(
                self.json.member_name(target.name.namespace.as_str(), name)?,
            ));
            if entries.is_empty() {
                request.delete.push(path);
            } else {
                let value =
                    self.json.instances_value(*schema_id, entries.as_slice())?;
                request.replace.push(GnmiUpdate::new(path, &value));
            }
        }

        for j in node_match.only_in_b.iter() {
            let schema_id = node_match.b_schema_ids[*j];
            if replaced.contains(&schema_id) {
                continue;
            }
            request.delete.push(self.node_path(
                parent_path,
                target,
                schema_id,
                &source.children[*j],
            )?);
        }

        for (i, child) in target.children.iter().enumerate() {
            let schema_id = node_match.a_schema_ids[i];
            if replaced.contains(&schema_id) {
                continue;
            }
            let path = self.node_path(parent_path, target, schema_id, child)?;
            match node_match.peer_of_a(i) {
                None => {
                    let value = self.json.node_value(schema_id, child)?;
                    request.update.push(GnmiUpdate::new(path, &value));
                }
                Some(j) => {
                    let peer = &source.children[j];
                    match self.schema().data_kind(schema_id)? {
                        DataKind::Leaf => {
                            if child.text != peer.text {
                                let value =
                                    self.json.node_value(schema_id, child)?;
                                request
                                    .update
                                    .push(GnmiUpdate::new(path, &value));
                            }
                        }
                        DataKind::LeafList => (),
                        DataKind::Container | DataKind::List => {
                            self.diff_children(
                                schema_id, &path, child, peer, request,
                            )?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    // Leaf-lists with any membership or order change, and user ordered
    // lists whose entry sequence changed while entries remain.
    fn replaced_wholly(
        &self,
        node_match: &NodeMatch,
        target: &DataNode,
        source: &DataNode,
    ) -> Result<BTreeSet<SchemaNodeId>, NcDiffError> {
        let mut ret = BTreeSet::new();
        let all_ids: BTreeSet<SchemaNodeId> = node_match
            .a_schema_ids
            .iter()
            .chain(node_match.b_schema_ids.iter())
            .copied()
            .collect();
        for schema_id in all_ids {
            let schema_node = self.schema().node(schema_id);
            let kind = self.schema().data_kind(schema_id)?;
            let target_seq = texts_of(target, &schema_node.name);
            let source_seq = texts_of(source, &schema_node.name);
            match kind {
                DataKind::LeafList => {
                    let changed = if schema_node.is_user_ordered() {
                        target_seq != source_seq
                    } else {
                        target_seq.iter().collect::<BTreeSet<_>>()
                            != source_seq.iter().collect::<BTreeSet<_>>()
                    };
                    if changed {
                        ret.insert(schema_id);
                    }
                }
                DataKind::List if schema_node.is_user_ordered() => {
                    let target_order: Vec<Option<usize>> = node_match
                        .a_schema_ids
                        .iter()
                        .enumerate()
                        .filter(|(_, id)| **id == schema_id)
                        .map(|(i, _)| node_match.peer_of_a(i))
                        .collect();
                    let source_order: Vec<Option<usize>> = node_match
                        .b_schema_ids
                        .iter()
                        .enumerate()
                        .filter(|(_, id)| **id == schema_id)
                        .map(|(j, _)| Some(j))
                        .collect();
                    if !target_order.is_empty() && target_order != source_order
                    {
                        ret.insert(schema_id);
                    }
                }
                _ => (),
            }
        }
        Ok(ret)
    }

    fn node_path(
        &self,
        parent_path: &GnmiPath,
        parent: &DataNode,
        schema_id: SchemaNodeId,
        node: &DataNode,
    ) -> Result<GnmiPath, NcDiffError> {
        let mut elem = GnmiPathElem::new(
            self.json
                .member_name(parent.name.namespace.as_str(), &node.name)?,
        );
        if self.schema().data_kind(schema_id)? == DataKind::List {
            for (key, value) in self.base.list_keys(schema_id, node)? {
                elem.key.insert(key.name, value);
            }
        }
        Ok(parent_path.join(elem))
    }
}

fn texts_of<'b>(
    node: &'b DataNode,
    name: &QName,
) -> Vec<Option<&'b str>> {
    node.children
        .iter()
        .filter(|c| &c.name == name)
        .map(|c| c.text())
        .collect()
}
