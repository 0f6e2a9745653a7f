// SPDX-License-Identifier: Apache-2.0

use serde_json::{Map, Value};

use crate::{
    DataKind, DataNode, NcDiffError, QName, SchemaNodeId, SchemaTree,
    TagNotation,
};

// RFC 7951 encoding of config nodes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct JsonEncoder<'a> {
    schema: &'a SchemaTree,
}

impl<'a> JsonEncoder<'a> {
    pub(crate) fn new(schema: &'a SchemaTree) -> Self {
        Self { schema }
    }

    /// Member name, qualified by module name only when the namespace
    /// differs from the one of the parent.
    pub(crate) fn member_name(
        &self,
        parent_ns: &str,
        name: &QName,
    ) -> Result<String, NcDiffError> {
        self.schema.namespaces().format_qname(
            parent_ns,
            name,
            TagNotation::ModuleQualified,
        )
    }

    pub(crate) fn leaf_value(
        &self,
        schema_id: SchemaNodeId,
        text: Option<&str>,
    ) -> Value {
        let datatype = self.schema.node(schema_id).datatype.as_deref();
        let text = match text {
            Some(t) => t,
            None => {
                return match datatype {
                    Some("empty") => Value::Array(vec![Value::Null]),
                    _ => Value::String(String::new()),
                }
            }
        };
        match datatype {
            Some(
                "int8" | "int16" | "int32" | "uint8" | "uint16" | "uint32",
            ) => match text.parse::<i64>() {
                Ok(i) => Value::from(i),
                Err(_) => Value::String(text.to_string()),
            },
            Some("boolean") => match text {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::String(text.to_string()),
            },
            Some("empty") => Value::Array(vec![Value::Null]),
            // int64, uint64 and decimal64 are strings in RFC 7951
            _ => Value::String(text.to_string()),
        }
    }

    /// JSON value of one node: scalar for leaf and leaf-list entry, object
    /// for container and list entry.
    pub(crate) fn node_value(
        &self,
        schema_id: SchemaNodeId,
        node: &DataNode,
    ) -> Result<Value, NcDiffError> {
        Ok(match self.schema.data_kind(schema_id)? {
            DataKind::Leaf | DataKind::LeafList => {
                self.leaf_value(schema_id, node.text())
            }
            DataKind::Container | DataKind::List => {
                Value::Object(self.children_object(schema_id, node)?)
            }
        })
    }

    /// Value of a group of sibling instances of the same schema node:
    /// array for list and leaf-list, single value otherwise.
    pub(crate) fn instances_value(
        &self,
        schema_id: SchemaNodeId,
        nodes: &[&DataNode],
    ) -> Result<Value, NcDiffError> {
        match self.schema.data_kind(schema_id)? {
            DataKind::List | DataKind::LeafList => {
                let mut values = Vec::with_capacity(nodes.len());
                for node in nodes {
                    values.push(self.node_value(schema_id, node)?);
                }
                Ok(Value::Array(values))
            }
            _ => match nodes.first() {
                Some(node) => self.node_value(schema_id, node),
                None => Ok(Value::Null),
            },
        }
    }

    /// Top level JSON document `{"module:name": value}` for `nodes`, all
    /// instances of `schema_id`.
    pub(crate) fn document(
        &self,
        schema_id: SchemaNodeId,
        nodes: &[&DataNode],
    ) -> Result<Value, NcDiffError> {
        let name = &self.schema.node(schema_id).name;
        let mut ret = Map::new();
        ret.insert(
            self.member_name("", name)?,
            self.instances_value(schema_id, nodes)?,
        );
        Ok(Value::Object(ret))
    }

    fn children_object(
        &self,
        schema_id: SchemaNodeId,
        node: &DataNode,
    ) -> Result<Map<String, Value>, NcDiffError> {
        // Siblings of the same name are grouped at their first appearance
        let mut groups: Vec<(SchemaNodeId, Vec<&DataNode>)> = Vec::new();
        for child in node.children.iter() {
            let child_id = self.schema.lookup_child(schema_id, &child.name)?;
            match groups.iter_mut().find(|(id, _)| *id == child_id) {
                Some((_, members)) => members.push(child),
                None => groups.push((child_id, vec![child])),
            }
        }
        let mut ret = Map::new();
        for (child_id, members) in groups {
            ret.insert(
                self.member_name(
                    node.name.namespace.as_str(),
                    &self.schema.node(child_id).name,
                )?,
                self.instances_value(child_id, members.as_slice())?,
            );
        }
        Ok(ret)
    }
}
