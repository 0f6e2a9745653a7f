// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use super::JsonEncoder;
use crate::{
    BaseCalculator, DataKind, DataNode, DiffOption, ErrorKind, JsonDisplay,
    NcDiffError, NodeMatch, SchemaNodeId, SchemaTree,
};

// Everything but the RFC 3986 unreserved characters.
const KEY_VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub const RESTCONF_CONTENT_TYPE: &str = "application/yang-data+json";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RestconfMethod {
    Delete,
    Put,
    Patch,
}

impl RestconfMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "DELETE",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
        }
    }
}

/// One RESTCONF write request. Requests should be sent in the order they
/// are generated.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[non_exhaustive]
pub struct RestconfRequest {
    pub method: RestconfMethod,
    pub url: String,
    /// JSON body, `None` for `DELETE`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl RestconfRequest {
    pub fn new(
        method: RestconfMethod,
        url: String,
        payload: Option<String>,
    ) -> Self {
        Self {
            method,
            url,
            payload,
        }
    }

    pub fn content_type(&self) -> Option<&'static str> {
        self.payload.as_ref().map(|_| RESTCONF_CONTENT_TYPE)
    }
}

// Resource of the config node currently walked.
struct Resource<'b> {
    url: &'b str,
    namespace: &'b str,
}

/// Renders the difference of two config trees as RESTCONF requests.
#[derive(Debug, Clone, Copy)]
pub struct RestconfCalculator<'a> {
    base: BaseCalculator<'a>,
    json: JsonEncoder<'a>,
    option: &'a DiffOption,
}

impl<'a> RestconfCalculator<'a> {
    pub fn new(schema: &'a SchemaTree, option: &'a DiffOption) -> Self {
        Self {
            base: BaseCalculator::new(schema),
            json: JsonEncoder::new(schema),
            option,
        }
    }

    fn schema(&self) -> &'a SchemaTree {
        self.base.schema
    }

    /// Requests turning `source` into `target`.
    pub fn diff(
        &self,
        target: &DataNode,
        source: &DataNode,
    ) -> Result<Vec<RestconfRequest>, NcDiffError> {
        if target.name != source.name {
            return Err(NcDiffError::new(
                ErrorKind::InvalidArgument,
                format!(
                    "Cannot diff trees of different roots {} and {}",
                    target.name, source.name
                ),
            ));
        }
        let mut ret = Vec::new();
        let root = Resource {
            url: self.option.restconf_prefix(),
            namespace: target.name.namespace.as_str(),
        };
        self.diff_children(SchemaTree::ROOT, &root, target, source, &mut ret)?;
        log::debug!("Generated {} RESTCONF requests", ret.len());
        Ok(ret)
    }

    fn diff_children(
        &self,
        parent_schema: SchemaNodeId,
        parent: &Resource,
        target: &DataNode,
        source: &DataNode,
        requests: &mut Vec<RestconfRequest>,
    ) -> Result<(), NcDiffError> {
        let node_match =
            self.base.match_children(parent_schema, target, source)?;
        let reordered = self.reordered(&node_match);

        for j in node_match.only_in_b.iter() {
            let schema_id = node_match.b_schema_ids[*j];
            if reordered.contains(&schema_id) {
                continue;
            }
            requests.push(RestconfRequest::new(
                RestconfMethod::Delete,
                self.node_url(parent, schema_id, &source.children[*j])?,
                None,
            ));
        }

        let mut replaced: BTreeSet<SchemaNodeId> = BTreeSet::new();
        for (i, child) in target.children.iter().enumerate() {
            let schema_id = node_match.a_schema_ids[i];
            if reordered.contains(&schema_id) {
                if replaced.insert(schema_id) {
                    requests.push(self.whole_list_put(
                        parent, schema_id, target,
                    )?);
                }
                continue;
            }
            let url = self.node_url(parent, schema_id, child)?;
            match node_match.peer_of_a(i) {
                None => requests.push(RestconfRequest::new(
                    RestconfMethod::Put,
                    url,
                    Some(self.json.document(schema_id, &[child])?.to_string()),
                )),
                Some(j) => {
                    let peer = &source.children[j];
                    match self.schema().data_kind(schema_id)? {
                        DataKind::Leaf => {
                            if child.text != peer.text {
                                requests.push(RestconfRequest::new(
                                    RestconfMethod::Patch,
                                    url,
                                    Some(
                                        self.json
                                            .document(schema_id, &[child])?
                                            .to_string(),
                                    ),
                                ));
                            }
                        }
                        DataKind::LeafList => (),
                        DataKind::Container | DataKind::List => {
                            let resource = Resource {
                                url: url.as_str(),
                                namespace: child.name.namespace.as_str(),
                            };
                            self.diff_children(
                                schema_id, &resource, child, peer, requests,
                            )?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    // User ordered lists and leaf-lists whose entry sequence differs while
    // the target side still holds entries.
    fn reordered(&self, node_match: &NodeMatch) -> BTreeSet<SchemaNodeId> {
        let mut ret = BTreeSet::new();
        let candidates: BTreeSet<SchemaNodeId> = node_match
            .a_schema_ids
            .iter()
            .copied()
            .filter(|id| self.schema().node(*id).is_user_ordered())
            .collect();
        for schema_id in candidates {
            let target_seq: Vec<Option<usize>> = node_match
                .a_schema_ids
                .iter()
                .enumerate()
                .filter(|(_, id)| **id == schema_id)
                .map(|(i, _)| node_match.peer_of_a(i))
                .collect();
            let source_seq: Vec<Option<usize>> = node_match
                .b_schema_ids
                .iter()
                .enumerate()
                .filter(|(_, id)| **id == schema_id)
                .map(|(j, _)| Some(j))
                .collect();
            if target_seq != source_seq {
                ret.insert(schema_id);
            }
        }
        ret
    }

    fn whole_list_put(
        &self,
        parent: &Resource,
        schema_id: SchemaNodeId,
        target: &DataNode,
    ) -> Result<RestconfRequest, NcDiffError> {
        let name = &self.schema().node(schema_id).name;
        let entries: Vec<&DataNode> = target
            .children
            .iter()
            .filter(|c| &c.name == name)
            .collect();
        log::debug!(
            "Replacing all {} entries of {}",
            entries.len(),
            self.schema().xpath(schema_id)
        );
        let payload = self.json.document(schema_id, entries.as_slice())?;
        Ok(RestconfRequest::new(
            RestconfMethod::Put,
            format!(
                "{}/{}",
                parent.url,
                self.json.member_name(parent.namespace, name)?
            ),
            Some(payload.to_string()),
        ))
    }

    fn node_url(
        &self,
        parent: &Resource,
        schema_id: SchemaNodeId,
        node: &DataNode,
    ) -> Result<String, NcDiffError> {
        let mut url = format!(
            "{}/{}",
            parent.url,
            self.json.member_name(parent.namespace, &node.name)?
        );
        match self.schema().data_kind(schema_id)? {
            DataKind::List => {
                let values: Vec<String> = self
                    .base
                    .list_keys(schema_id, node)?
                    .iter()
                    .map(|(_, v)| encode_key_value(v))
                    .collect();
                url.push('=');
                url.push_str(&values.join(","));
            }
            DataKind::LeafList => {
                url.push('=');
                url.push_str(&encode_key_value(
                    node.text().unwrap_or_default(),
                ));
            }
            DataKind::Leaf | DataKind::Container => (),
        }
        Ok(url)
    }
}

fn encode_key_value(value: &str) -> String {
    utf8_percent_encode(value, KEY_VALUE_ENCODE_SET).to_string()
}
