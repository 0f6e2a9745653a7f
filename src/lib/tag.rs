// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{ErrorKind, JsonDisplay, NcDiffError};

pub const NETCONF_BASE_NS: &str = "urn:ietf:params:xml:ns:netconf:base:1.0";
pub const YANG_NS: &str = "urn:ietf:params:xml:ns:yang:1";

/// Namespace qualified name of a config or schema node.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub struct QName {
    /// Namespace URL
    pub namespace: String,
    /// Local name
    pub name: String,
}

impl QName {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    pub fn config_root() -> Self {
        Self::new(NETCONF_BASE_NS, "config")
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.name)
    }
}

/// The notations a node name could be written in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum TagNotation {
    /// `{url}name`
    Clark,
    /// `prefix:name`, the XPath form
    Prefixed,
    /// `module:name`, the RFC 7951 JSON form
    ModuleQualified,
    /// `name` in the default namespace
    Bare,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    pub prefix: String,
    pub namespace: String,
}

/// Lookup between module names, prefixes and namespace URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMap {
    modules: Vec<ModuleInfo>,
    by_url: HashMap<String, usize>,
    by_prefix: HashMap<String, usize>,
    by_module: HashMap<String, usize>,
}

impl NamespaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, info: ModuleInfo) -> Result<(), NcDiffError> {
        if let Some(existing) = self.by_module.get(&info.name) {
            if self.modules[*existing] != info {
                return Err(NcDiffError::new(
                    ErrorKind::InvalidSchema,
                    format!(
                        "Module {} defined twice with different prefix or \
                         namespace",
                        info.name
                    ),
                ));
            }
            return Ok(());
        }
        for (existing, what) in [
            (self.by_url.get(&info.namespace), "namespace"),
            (self.by_prefix.get(&info.prefix), "prefix"),
        ] {
            if let Some(i) = existing {
                return Err(NcDiffError::new(
                    ErrorKind::InvalidSchema,
                    format!(
                        "Module {} uses the same {what} as module {}",
                        info.name, self.modules[*i].name
                    ),
                ));
            }
        }
        let index = self.modules.len();
        self.by_url.insert(info.namespace.clone(), index);
        self.by_prefix.insert(info.prefix.clone(), index);
        self.by_module.insert(info.name.clone(), index);
        self.modules.push(info);
        Ok(())
    }

    pub fn modules(&self) -> &[ModuleInfo] {
        self.modules.as_slice()
    }

    pub fn module_by_url(&self, url: &str) -> Option<&ModuleInfo> {
        self.by_url.get(url).map(|i| &self.modules[*i])
    }

    pub fn module_by_prefix(&self, prefix: &str) -> Option<&ModuleInfo> {
        self.by_prefix.get(prefix).map(|i| &self.modules[*i])
    }

    pub fn module_by_name(&self, name: &str) -> Option<&ModuleInfo> {
        self.by_module.get(name).map(|i| &self.modules[*i])
    }

    fn url_to_module(&self, url: &str) -> Result<&ModuleInfo, NcDiffError> {
        self.module_by_url(url).ok_or_else(|| {
            NcDiffError::new(
                ErrorKind::SchemaMissing,
                format!("No module is using namespace {url}"),
            )
        })
    }

    /// Parse `tag` written in `src` notation and render it in `dst`
    /// notation. Returns the namespace URL of the tag and the converted tag.
    /// Names without qualifier resolve to `default_ns`.
    pub fn convert_tag(
        &self,
        default_ns: &str,
        tag: &str,
        src: TagNotation,
        dst: TagNotation,
    ) -> Result<(String, String), NcDiffError> {
        let qname = self.parse_tag(default_ns, tag, src)?;
        let converted = self.format_qname(default_ns, &qname, dst)?;
        Ok((qname.namespace, converted))
    }

    pub fn parse_tag(
        &self,
        default_ns: &str,
        tag: &str,
        notation: TagNotation,
    ) -> Result<QName, NcDiffError> {
        let invalid = || {
            NcDiffError::new(
                ErrorKind::InvalidArgument,
                format!("Tag '{tag}' is not in {notation} notation"),
            )
        };
        match notation {
            TagNotation::Clark => {
                if let Some(rest) = tag.strip_prefix('{') {
                    let (url, name) = rest.split_once('}').ok_or_else(invalid)?;
                    Ok(QName::new(url, name))
                } else if tag.contains(['{', '}', ':']) {
                    Err(invalid())
                } else {
                    Ok(QName::new(default_ns, tag))
                }
            }
            TagNotation::Prefixed | TagNotation::ModuleQualified => {
                match tag.split_once(':') {
                    Some((qualifier, name)) => {
                        let module = if notation == TagNotation::Prefixed {
                            self.module_by_prefix(qualifier)
                        } else {
                            self.module_by_name(qualifier)
                        };
                        let module = module.ok_or_else(|| {
                            NcDiffError::new(
                                ErrorKind::SchemaMissing,
                                format!(
                                    "Unknown {} '{qualifier}' in tag '{tag}'",
                                    if notation == TagNotation::Prefixed {
                                        "prefix"
                                    } else {
                                        "module"
                                    }
                                ),
                            )
                        })?;
                        Ok(QName::new(&module.namespace, name))
                    }
                    None => Ok(QName::new(default_ns, tag)),
                }
            }
            TagNotation::Bare => {
                if tag.contains(['{', '}', ':']) {
                    Err(invalid())
                } else {
                    Ok(QName::new(default_ns, tag))
                }
            }
        }
    }

    pub fn format_qname(
        &self,
        default_ns: &str,
        qname: &QName,
        notation: TagNotation,
    ) -> Result<String, NcDiffError> {
        Ok(match notation {
            TagNotation::Clark => qname.to_string(),
            TagNotation::Prefixed => format!(
                "{}:{}",
                self.url_to_module(&qname.namespace)?.prefix,
                qname.name
            ),
            TagNotation::ModuleQualified => {
                if qname.namespace == default_ns {
                    qname.name.clone()
                } else {
                    format!(
                        "{}:{}",
                        self.url_to_module(&qname.namespace)?.name,
                        qname.name
                    )
                }
            }
            TagNotation::Bare => qname.name.clone(),
        })
    }
}
