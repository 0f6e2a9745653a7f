// SPDX-License-Identifier: Apache-2.0

//! Schema aware diff and merge of NETCONF/YANG config trees, with the
//! difference rendered as NETCONF `edit-config`, RESTCONF requests or gNMI
//! `SetRequest`.

mod calculator;
mod config;
mod error;
mod node;
mod option;
mod ordering;
mod path;
mod schema;
mod tag;
mod xml;

#[cfg(test)]
mod unit_tests;

pub use self::calculator::{
    BaseCalculator, GnmiCalculator, GnmiPath, GnmiPathElem, GnmiSetRequest,
    GnmiTypedValue, GnmiUpdate, NetconfCalculator, NodeMatch,
    RestconfCalculator, RestconfMethod, RestconfRequest,
};
pub use self::config::{Config, ConfigDelta};
pub use self::error::{ErrorKind, NcDiffError};
pub use self::node::{DataNode, EditOperation, InsertPosition, ListKeys};
pub use self::option::DiffOption;
pub use self::ordering::{
    AnnotationKeyword, AnnotationQualifier, Conjunction, OrderOperation,
    OrderingAnnotation, OrderingConstraint, OrderingMap, OrderingSolver,
};
pub use self::schema::{
    Access, DataKind, OrderedBy, SchemaConf, SchemaModuleConf, SchemaNode,
    SchemaNodeConf, SchemaNodeId, SchemaNodeType, SchemaTree,
};
pub use self::tag::{
    ModuleInfo, NamespaceMap, QName, TagNotation, NETCONF_BASE_NS, YANG_NS,
};

pub(crate) use ncdiff_derive::JsonDisplay;
