// SPDX-License-Identifier: Apache-2.0

mod delta;
mod filter;
mod ops;
mod validate;

use std::sync::Arc;

pub use self::delta::ConfigDelta;

use crate::{
    xml::{data_node_from_xml, data_node_to_xml},
    BaseCalculator, DataNode, DiffOption, EditOperation, NcDiffError,
    NetconfCalculator, QName, SchemaTree,
};

/// A validated config tree rooted at `<config>` together with the schema
/// describing it.
///
/// A `Config` is a value object: diff, merge and filter never modify it but
/// return new instances.
#[derive(Debug, Clone)]
pub struct Config {
    schema: Arc<SchemaTree>,
    root: DataNode,
}

impl Config {
    /// Validate `root` against `schema`. Empty containers without presence
    /// meaning are dropped.
    pub fn new(
        schema: Arc<SchemaTree>,
        mut root: DataNode,
    ) -> Result<Self, NcDiffError> {
        validate::validate_config(&schema, &root)?;
        validate::prune_empty_containers(&schema, SchemaTree::ROOT, &mut root);
        Ok(Self { schema, root })
    }

    /// Config holding nothing but the `<config>` root.
    pub fn new_empty(schema: Arc<SchemaTree>) -> Self {
        Self {
            schema,
            root: DataNode::new(QName::config_root()),
        }
    }

    pub fn new_from_xml(
        schema: Arc<SchemaTree>,
        xml: &str,
    ) -> Result<Self, NcDiffError> {
        let root = data_node_from_xml(xml)?;
        Self::new(schema, root)
    }

    pub fn schema(&self) -> &Arc<SchemaTree> {
        &self.schema
    }

    pub fn root(&self) -> &DataNode {
        &self.root
    }

    pub fn into_root(self) -> DataNode {
        self.root
    }

    /// Names of the top level nodes, each name listed once.
    pub fn roots(&self) -> Vec<QName> {
        let mut ret: Vec<QName> = Vec::new();
        for child in self.root.children.iter() {
            if !ret.contains(&child.name) {
                ret.push(child.name.clone());
            }
        }
        ret
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    pub fn to_xml(&self) -> Result<String, NcDiffError> {
        data_node_to_xml(&self.root, self.schema.namespaces())
    }

    pub fn is_subset_of(&self, other: &Self) -> Result<bool, NcDiffError> {
        self.schema.check_compatible(&other.schema)?;
        BaseCalculator::new(&self.schema).is_subtree(
            SchemaTree::ROOT,
            &self.root,
            &other.root,
        )
    }

    pub fn is_superset_of(&self, other: &Self) -> Result<bool, NcDiffError> {
        other.is_subset_of(self)
    }

    pub fn is_equal(&self, other: &Self) -> Result<bool, NcDiffError> {
        Ok(self.is_subset_of(other)? && other.is_subset_of(self)?)
    }

    pub fn is_proper_subset_of(
        &self,
        other: &Self,
    ) -> Result<bool, NcDiffError> {
        Ok(self.is_subset_of(other)? && !other.is_subset_of(self)?)
    }

    pub fn is_proper_superset_of(
        &self,
        other: &Self,
    ) -> Result<bool, NcDiffError> {
        other.is_proper_subset_of(self)
    }

    /// Delta turning `other` into `self` using default [DiffOption].
    pub fn diff(&self, other: &Self) -> Result<ConfigDelta, NcDiffError> {
        self.diff_with_option(other, DiffOption::default())
    }

    pub fn diff_with_option(
        &self,
        other: &Self,
        option: DiffOption,
    ) -> Result<ConfigDelta, NcDiffError> {
        ConfigDelta::new(other.clone(), self.clone(), option)
    }

    /// Merge `other` into a copy of `self` as if `other` were a NETCONF
    /// delta with `merge` operation everywhere.
    pub fn merge(&self, other: &Self) -> Result<Self, NcDiffError> {
        self.schema.check_compatible(&other.schema)?;
        let mut delta = other.root.clone();
        delta.operation = Some(EditOperation::Merge);
        self.apply_nc(&delta)
    }

    /// Apply the NETCONF delta of `delta` on a copy of `self`.
    pub fn apply(&self, delta: &ConfigDelta) -> Result<Self, NcDiffError> {
        self.schema.check_compatible(delta.schema())?;
        self.apply_nc(&delta.nc()?)
    }

    /// Apply a NETCONF delta tree rooted at `<config>`.
    pub fn apply_nc(&self, delta: &DataNode) -> Result<Self, NcDiffError> {
        let option = DiffOption::default();
        let root = NetconfCalculator::new(&self.schema, &option)
            .merge(&self.root, delta)?;
        Self::new(self.schema.clone(), root)
    }

    /// Apply a NETCONF delta in XML.
    pub fn apply_xml(&self, delta_xml: &str) -> Result<Self, NcDiffError> {
        let delta = data_node_from_xml(delta_xml)?;
        validate::validate_delta(&self.schema, &delta)?;
        self.apply_nc(&delta)
    }

    /// Project the sub-trees selected by `path`, for example
    /// `/oc-if:interfaces/oc-if:interface[oc-if:name='Gi1/0/1']`.
    pub fn filter(&self, path: &str) -> Result<Self, NcDiffError> {
        let root = filter::filter_root(&self.schema, &self.root, path)?;
        Self::new(self.schema.clone(), root)
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.to_xml() {
            Ok(s) => write!(f, "{s}"),
            Err(e) => {
                log::error!("BUG: Failed to render config as XML: {e}");
                write!(f, "{:?}", self.root)
            }
        }
    }
}
