// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::JsonDisplay;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Please report this as bug to upstream
    Bug,
    /// Invalid argument
    InvalidArgument,
    /// XML document cannot be parsed or uses unknown namespace
    InvalidXml,
    /// Schema description is malformed
    InvalidSchema,
    /// Config tree does not conform to its schema
    InvalidConfig,
    /// No schema node found for a config node
    SchemaMissing,
    /// Two configs reference the same module with divergent definitions
    ModelIncompatible,
    /// More than one peer found where schema guarantees uniqueness
    Integrity,
    /// Delta is inconsistent with the tree it is applied onto, e.g.
    /// `data-exists`, `data-missing` or an unresolvable insert anchor
    DeltaApplication,
    /// Schema node of this type cannot hold config data
    UnsupportedSchemaType,
}

// Try not implement From for NcDiffError here unless you are sure this
// error should always convert to certain type of ErrorKind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct NcDiffError {
    pub kind: ErrorKind,
    pub msg: String,
}

impl std::fmt::Display for NcDiffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}

impl NcDiffError {
    pub fn new(kind: ErrorKind, msg: String) -> Self {
        Self { kind, msg }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        self.msg.as_str()
    }
}

impl std::error::Error for NcDiffError {}

impl From<serde_json::Error> for NcDiffError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ErrorKind::Bug, format!("serde_json::Error: {e}"))
    }
}

impl From<serde_yaml::Error> for NcDiffError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::new(
            ErrorKind::InvalidArgument,
            format!("Invalid YAML string: {e}"),
        )
    }
}

impl From<std::io::Error> for NcDiffError {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::Bug, format!("std::io::Error: {e}"))
    }
}

impl From<quick_xml::Error> for NcDiffError {
    fn from(e: quick_xml::Error) -> Self {
        Self::new(ErrorKind::InvalidXml, format!("Invalid XML: {e}"))
    }
}

impl From<quick_xml::events::attributes::AttrError> for NcDiffError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::new(
            ErrorKind::InvalidXml,
            format!("Invalid XML attribute: {e}"),
        )
    }
}

impl From<std::string::FromUtf8Error> for NcDiffError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::new(ErrorKind::InvalidXml, format!("Invalid UTF-8: {e}"))
    }
}
