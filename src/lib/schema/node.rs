// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{JsonDisplay, OrderingAnnotation, QName};

/// Handle of a node inside a [crate::SchemaTree].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct SchemaNodeId(pub(crate) usize);

impl std::fmt::Display for SchemaNodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum SchemaNodeType {
    Leaf,
    LeafList,
    Container,
    List,
    Choice,
    Case,
    Rpc,
    Notification,
    Input,
    Output,
}

impl SchemaNodeType {
    /// Choice and case never show up in data trees.
    pub fn is_transparent(&self) -> bool {
        matches!(self, Self::Choice | Self::Case)
    }

    pub fn data_kind(&self) -> Option<DataKind> {
        match self {
            Self::Leaf => Some(DataKind::Leaf),
            Self::LeafList => Some(DataKind::LeafList),
            Self::Container => Some(DataKind::Container),
            Self::List => Some(DataKind::List),
            Self::Choice
            | Self::Case
            | Self::Rpc
            | Self::Notification
            | Self::Input
            | Self::Output => None,
        }
    }
}

/// The schema types a config node could be an instance of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Leaf,
    LeafList,
    Container,
    List,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
pub enum OrderedBy {
    #[default]
    System,
    User,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
pub enum Access {
    #[default]
    ReadWrite,
    ReadOnly,
    Write,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SchemaNode {
    pub id: SchemaNodeId,
    pub name: QName,
    /// Name of the module defining this node
    pub module: String,
    pub node_type: SchemaNodeType,
    pub keys: Vec<QName>,
    pub ordered_by: OrderedBy,
    pub access: Access,
    pub presence: bool,
    pub mandatory: bool,
    pub datatype: Option<String>,
    pub values: Vec<String>,
    pub leafref: Option<String>,
    pub annotations: Vec<OrderingAnnotation>,
    pub parent: Option<SchemaNodeId>,
    pub children: Vec<SchemaNodeId>,
}

impl SchemaNode {
    pub fn is_user_ordered(&self) -> bool {
        self.ordered_by == OrderedBy::User
    }

    pub fn is_key(&self, name: &QName) -> bool {
        self.keys.contains(name)
    }

    pub fn is_config(&self) -> bool {
        self.access != Access::ReadOnly
    }
}
