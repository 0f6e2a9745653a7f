// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{Access, OrderedBy, OrderingAnnotation, SchemaNodeType};

/// Annotated schema tree as produced by the YANG compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct SchemaConf {
    #[serde(default)]
    pub modules: Vec<SchemaModuleConf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct SchemaModuleConf {
    pub name: String,
    pub prefix: String,
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Top level data nodes, RPCs and notifications
    #[serde(default)]
    pub nodes: Vec<SchemaNodeConf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct SchemaNodeConf {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: SchemaNodeType,
    /// Module defining this node when it differs from the parent's module,
    /// e.g. for augmentations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// List keys in `name` or `prefix:name` form
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key: Vec<String>,
    #[serde(default)]
    pub ordered_by: OrderedBy,
    #[serde(default)]
    pub access: Access,
    #[serde(default)]
    pub presence: bool,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    /// Allowed values of enumeration typed leaves
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Path of the `leafref` type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leafref: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<OrderingAnnotation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SchemaNodeConf>,
}
