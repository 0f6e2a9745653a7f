// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{EditOperation, ErrorKind, JsonDisplay, NcDiffError};

const DEFAULT_RESTCONF_ROOT: &str = "/restconf/data";

/// Tuning of the generated deltas.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
#[non_exhaustive]
pub struct DiffOption {
    /// Operation put on newly created nodes: `merge`, `create` or
    /// `replace`.
    pub preferred_create: EditOperation,
    /// Operation put on leaves whose value changed: `merge` or `replace`.
    pub preferred_replace: EditOperation,
    /// Operation put on removed nodes: `delete` or `remove`.
    pub preferred_delete: EditOperation,
    /// Prefix of every generated RESTCONF URL.
    pub restconf_root: String,
}

impl Default for DiffOption {
    fn default() -> Self {
        Self {
            preferred_create: EditOperation::Merge,
            preferred_replace: EditOperation::Merge,
            preferred_delete: EditOperation::Delete,
            restconf_root: DEFAULT_RESTCONF_ROOT.to_string(),
        }
    }
}

impl DiffOption {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_from_yaml(content: &str) -> Result<Self, NcDiffError> {
        let ret: Self = serde_yaml::from_str(content)?;
        ret.validate()?;
        Ok(ret)
    }

    pub fn preferred_create(mut self, operation: EditOperation) -> Self {
        self.preferred_create = operation;
        self
    }

    pub fn preferred_replace(mut self, operation: EditOperation) -> Self {
        self.preferred_replace = operation;
        self
    }

    pub fn preferred_delete(mut self, operation: EditOperation) -> Self {
        self.preferred_delete = operation;
        self
    }

    pub fn restconf_root(mut self, root: &str) -> Self {
        self.restconf_root = root.to_string();
        self
    }

    pub fn validate(&self) -> Result<(), NcDiffError> {
        check_choice(
            "preferred-create",
            self.preferred_create,
            &[
                EditOperation::Merge,
                EditOperation::Create,
                EditOperation::Replace,
            ],
        )?;
        check_choice(
            "preferred-replace",
            self.preferred_replace,
            &[EditOperation::Merge, EditOperation::Replace],
        )?;
        check_choice(
            "preferred-delete",
            self.preferred_delete,
            &[EditOperation::Delete, EditOperation::Remove],
        )?;
        if !self.restconf_root.starts_with('/') {
            return Err(NcDiffError::new(
                ErrorKind::InvalidArgument,
                format!(
                    "restconf-root should start with '/', got '{}'",
                    self.restconf_root
                ),
            ));
        }
        Ok(())
    }

    /// `restconf_root` without trailing `/`.
    pub(crate) fn restconf_prefix(&self) -> &str {
        self.restconf_root.trim_end_matches('/')
    }

    // The operation attribute is left out when it equals the default
    // `merge`.
    pub(crate) fn create_attr(&self) -> Option<EditOperation> {
        non_merge(self.preferred_create)
    }

    pub(crate) fn replace_attr(&self) -> Option<EditOperation> {
        non_merge(self.preferred_replace)
    }

    pub(crate) fn delete_attr(&self) -> Option<EditOperation> {
        Some(self.preferred_delete)
    }
}

fn non_merge(operation: EditOperation) -> Option<EditOperation> {
    if operation == EditOperation::Merge {
        None
    } else {
        Some(operation)
    }
}

fn check_choice(
    name: &str,
    value: EditOperation,
    choices: &[EditOperation],
) -> Result<(), NcDiffError> {
    if choices.contains(&value) {
        Ok(())
    } else {
        Err(NcDiffError::new(
            ErrorKind::InvalidArgument,
            format!(
                "{name} should be one of {}, got {}",
                choices
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<&str>>()
                    .join(", "),
                value.as_str()
            ),
        ))
    }
}
