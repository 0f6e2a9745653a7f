// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::JsonDisplay;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
pub enum OrderOperation {
    Create,
    Modify,
    Delete,
}

impl OrderOperation {
    pub const ALL: [Self; 3] = [Self::Create, Self::Modify, Self::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Modify => "modify",
            Self::Delete => "delete",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
pub enum Conjunction {
    Before,
    After,
}

impl Conjunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

/// Performing `operation` on the source node must happen `conjunction`
/// performing `target_operation` on the target node.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub struct OrderingConstraint {
    pub operation: OrderOperation,
    pub conjunction: Conjunction,
    pub target_operation: OrderOperation,
}

impl OrderingConstraint {
    pub fn new(
        operation: OrderOperation,
        conjunction: Conjunction,
        target_operation: OrderOperation,
    ) -> Self {
        Self {
            operation,
            conjunction,
            target_operation,
        }
    }
}

impl std::fmt::Display for OrderingConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.operation.as_str(),
            self.conjunction.as_str(),
            self.target_operation.as_str()
        )
    }
}
