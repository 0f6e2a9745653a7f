// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{ErrorKind, JsonDisplay, NcDiffError, QName};

/// NETCONF `operation` attribute values (RFC 6241 section 7.2).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum EditOperation {
    #[default]
    Merge,
    Replace,
    Create,
    Delete,
    Remove,
}

impl EditOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Replace => "replace",
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Remove => "remove",
        }
    }

    pub fn is_deletion(&self) -> bool {
        matches!(self, Self::Delete | Self::Remove)
    }
}

impl std::str::FromStr for EditOperation {
    type Err = NcDiffError;

    fn from_str(s: &str) -> Result<Self, NcDiffError> {
        match s {
            "merge" => Ok(Self::Merge),
            "replace" => Ok(Self::Replace),
            "create" => Ok(Self::Create),
            "delete" => Ok(Self::Delete),
            "remove" => Ok(Self::Remove),
            _ => Err(NcDiffError::new(
                ErrorKind::InvalidArgument,
                format!("Invalid NETCONF operation {s}"),
            )),
        }
    }
}

/// YANG `insert` attribute values (RFC 7950 section 7.8.6).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
pub enum InsertPosition {
    First,
    Last,
    Before,
    After,
}

impl InsertPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
            Self::Before => "before",
            Self::After => "after",
        }
    }

    pub fn need_anchor(&self) -> bool {
        matches!(self, Self::Before | Self::After)
    }
}

impl std::str::FromStr for InsertPosition {
    type Err = NcDiffError;

    fn from_str(s: &str) -> Result<Self, NcDiffError> {
        match s {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            _ => Err(NcDiffError::new(
                ErrorKind::InvalidArgument,
                format!("Invalid YANG insert position {s}"),
            )),
        }
    }
}

/// Key leaves of a list entry in key statement order.
pub type ListKeys = Vec<(QName, String)>;

/// One element of a config or delta tree.
///
/// Leaves and leaf-list entries carry `text`, containers and list entries
/// carry `children`. The control attributes are only meaningful in delta
/// trees: a plain config tree never has them set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataNode {
    pub name: QName,
    pub text: Option<String>,
    pub children: Vec<DataNode>,
    /// `nc:operation`
    pub operation: Option<EditOperation>,
    /// `yang:insert`
    pub insert: Option<InsertPosition>,
    /// `yang:value`, anchor of leaf-list insertion
    pub value: Option<String>,
    /// `yang:key`, anchor of list insertion, key leaf names with values
    pub key: Option<ListKeys>,
}

impl DataNode {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn new_leaf(name: QName, text: Option<String>) -> Self {
        Self {
            name,
            text,
            ..Default::default()
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn has_control_attrs(&self) -> bool {
        self.operation.is_some()
            || self.insert.is_some()
            || self.value.is_some()
            || self.key.is_some()
    }

    pub fn same_control_attrs(&self, other: &Self) -> bool {
        self.operation == other.operation
            && self.insert == other.insert
            && self.value == other.value
            && self.key == other.key
    }

    pub(crate) fn find_control_attrs(&self) -> Option<&DataNode> {
        if self.has_control_attrs() {
            Some(self)
        } else {
            self.children.iter().find_map(|c| c.find_control_attrs())
        }
    }

    pub fn child(&self, name: &QName) -> Option<&DataNode> {
        self.children.iter().find(|c| &c.name == name)
    }

    /// Copy holding the name and text only.
    pub(crate) fn shell(&self) -> Self {
        Self::new_leaf(self.name.clone(), self.text.clone())
    }

    /// Total number of nodes in this sub-tree including itself.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(|c| c.count()).sum::<usize>()
    }
}
