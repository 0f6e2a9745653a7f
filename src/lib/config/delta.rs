// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use super::Config;
use crate::{
    xml::data_node_to_xml, DataNode, DiffOption, GnmiCalculator,
    GnmiSetRequest, NcDiffError, NetconfCalculator, RestconfCalculator,
    RestconfRequest, SchemaTree,
};

/// The change turning the `src` config into the `dst` config.
///
/// Only both ends are stored. The protocol specific renderings are
/// computed on request, hence negating a delta is merely swapping the
/// ends.
#[derive(Debug, Clone)]
pub struct ConfigDelta {
    src: Config,
    dst: Config,
    option: DiffOption,
}

impl ConfigDelta {
    pub fn new(
        src: Config,
        dst: Config,
        option: DiffOption,
    ) -> Result<Self, NcDiffError> {
        option.validate()?;
        src.schema().check_compatible(dst.schema())?;
        Ok(Self { src, dst, option })
    }

    /// Build the delta from a NETCONF `<config>` XML delta which is applied
    /// on `src` to get `dst`.
    pub fn new_from_xml(
        src: &Config,
        delta_xml: &str,
        option: DiffOption,
    ) -> Result<Self, NcDiffError> {
        let dst = src.apply_xml(delta_xml)?;
        Self::new(src.clone(), dst, option)
    }

    pub fn src(&self) -> &Config {
        &self.src
    }

    pub fn dst(&self) -> &Config {
        &self.dst
    }

    pub fn option(&self) -> &DiffOption {
        &self.option
    }

    pub(crate) fn schema(&self) -> &Arc<SchemaTree> {
        self.dst.schema()
    }

    /// NETCONF `edit-config` delta rooted at `<config>`.
    pub fn nc(&self) -> Result<DataNode, NcDiffError> {
        NetconfCalculator::new(self.schema(), &self.option)
            .diff(self.dst.root(), self.src.root())
    }

    pub fn nc_xml(&self) -> Result<String, NcDiffError> {
        data_node_to_xml(&self.nc()?, self.schema().namespaces())
    }

    pub fn restconf(&self) -> Result<Vec<RestconfRequest>, NcDiffError> {
        RestconfCalculator::new(self.schema(), &self.option)
            .diff(self.dst.root(), self.src.root())
    }

    pub fn gnmi(&self) -> Result<GnmiSetRequest, NcDiffError> {
        GnmiCalculator::new(self.schema())
            .diff(self.dst.root(), self.src.root())
    }

    /// Whether `src` and `dst` hold the same config, entry order of user
    /// ordered lists included.
    pub fn is_empty(&self) -> Result<bool, NcDiffError> {
        self.src.is_equal(&self.dst)
    }
}

impl std::ops::Neg for ConfigDelta {
    type Output = ConfigDelta;

    fn neg(self) -> ConfigDelta {
        ConfigDelta {
            src: self.dst,
            dst: self.src,
            option: self.option,
        }
    }
}

impl std::ops::Neg for &ConfigDelta {
    type Output = ConfigDelta;

    fn neg(self) -> ConfigDelta {
        -self.clone()
    }
}

impl PartialEq for ConfigDelta {
    fn eq(&self, other: &Self) -> bool {
        self.src == other.src && self.dst == other.dst
    }
}

impl std::fmt::Display for ConfigDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.nc_xml() {
            Ok(s) => write!(f, "{s}"),
            Err(e) => write!(f, "<!-- {e} -->"),
        }
    }
}
