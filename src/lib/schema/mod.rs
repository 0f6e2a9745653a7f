// SPDX-License-Identifier: Apache-2.0

mod conf;
mod node;
mod tree;

pub use self::conf::{SchemaConf, SchemaModuleConf, SchemaNodeConf};
pub use self::node::{
    Access, DataKind, OrderedBy, SchemaNode, SchemaNodeId, SchemaNodeType,
};
pub use self::tree::SchemaTree;
