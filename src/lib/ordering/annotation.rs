// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::JsonDisplay;

/// Vendor CLI-diff extension statements declaring ordering between the
/// annotated node and the target node.
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
pub enum AnnotationKeyword {
    CliDiffAfter,
    CliDiffBefore,
    CliDiffCreateAfter,
    CliDiffCreateBefore,
    CliDiffDeleteAfter,
    CliDiffDeleteBefore,
    CliDiffModifyAfter,
    CliDiffModifyBefore,
    CliDiffSetAfter,
    CliDiffSetBefore,
    CliDiffDependency,
}

impl AnnotationKeyword {
    pub fn is_dependency(&self) -> bool {
        self == &Self::CliDiffDependency
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
pub enum AnnotationQualifier {
    CliWhenTargetSet,
    CliWhenTargetCreate,
    CliWhenTargetModify,
    CliWhenTargetDelete,
    CliTriggerOnSet,
    CliTriggerOnDelete,
    CliTriggerOnAll,
}

impl AnnotationQualifier {
    /// The `cli-trigger-on-*` qualifiers belong to `cli-diff-dependency`,
    /// the `cli-when-target-*` ones to every other keyword.
    pub fn is_trigger(&self) -> bool {
        matches!(
            self,
            Self::CliTriggerOnSet
                | Self::CliTriggerOnDelete
                | Self::CliTriggerOnAll
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct OrderingAnnotation {
    pub keyword: AnnotationKeyword,
    /// Schema path of the target node, absolute or relative to the
    /// annotated node.
    pub target: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualifiers: Vec<AnnotationQualifier>,
}

impl OrderingAnnotation {
    pub fn new(keyword: AnnotationKeyword, target: &str) -> Self {
        Self {
            keyword,
            target: target.to_string(),
            qualifiers: Vec::new(),
        }
    }

    pub fn qualifier(mut self, qualifier: AnnotationQualifier) -> Self {
        self.qualifiers.push(qualifier);
        self
    }
}
