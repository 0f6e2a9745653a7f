// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use crate::{
    Access, DataKind, ErrorKind, ModuleInfo, NamespaceMap, NcDiffError,
    OrderedBy, QName, SchemaConf, SchemaModuleConf, SchemaNode, SchemaNodeConf,
    SchemaNodeId, SchemaNodeType, TagNotation,
};

/// Compiled schema: an arena of [SchemaNode] with the lookups the
/// calculators need, all built once at construction.
#[derive(Debug, Clone, Default)]
pub struct SchemaTree {
    modules: Vec<SchemaModuleConf>,
    namespaces: NamespaceMap,
    nodes: Vec<SchemaNode>,
    // Data children of each node with choice/case flattened, in schema
    // order.
    child_lookup: HashMap<(SchemaNodeId, QName), (usize, SchemaNodeId)>,
    paths: Vec<String>,
    path_index: HashMap<String, SchemaNodeId>,
}

impl SchemaTree {
    pub const ROOT: SchemaNodeId = SchemaNodeId(0);

    pub fn new(conf: SchemaConf) -> Result<Self, NcDiffError> {
        let mut ret = Self {
            modules: conf.modules.clone(),
            ..Default::default()
        };
        for module in conf.modules.as_slice() {
            ret.namespaces.add(ModuleInfo {
                name: module.name.clone(),
                prefix: module.prefix.clone(),
                namespace: module.namespace.clone(),
            })?;
        }
        ret.nodes.push(SchemaNode {
            id: Self::ROOT,
            name: QName::config_root(),
            module: String::new(),
            node_type: SchemaNodeType::Container,
            keys: Vec::new(),
            ordered_by: OrderedBy::System,
            access: Access::ReadWrite,
            presence: true,
            mandatory: false,
            datatype: None,
            values: Vec::new(),
            leafref: None,
            annotations: Vec::new(),
            parent: None,
            children: Vec::new(),
        });
        for module in conf.modules.as_slice() {
            for node_conf in module.nodes.as_slice() {
                let id = ret.add_node(Self::ROOT, &module.name, node_conf)?;
                ret.nodes[0].children.push(id);
            }
        }
        ret.build_index()?;
        ret.validate()?;
        log::debug!(
            "Loaded schema of {} modules holding {} nodes",
            ret.modules.len(),
            ret.nodes.len()
        );
        Ok(ret)
    }

    /// Load the schema description from YAML (JSON is valid YAML as well).
    pub fn new_from_yaml(content: &str) -> Result<Self, NcDiffError> {
        let conf: SchemaConf = serde_yaml::from_str(content).map_err(|e| {
            NcDiffError::new(
                ErrorKind::InvalidSchema,
                format!("Invalid schema description: {e}"),
            )
        })?;
        Self::new(conf)
    }

    fn add_node(
        &mut self,
        parent: SchemaNodeId,
        parent_module: &str,
        conf: &SchemaNodeConf,
    ) -> Result<SchemaNodeId, NcDiffError> {
        let module_name = conf.module.as_deref().unwrap_or(parent_module);
        let namespace = self
            .namespaces
            .module_by_name(module_name)
            .map(|m| m.namespace.clone())
            .ok_or_else(|| {
                NcDiffError::new(
                    ErrorKind::InvalidSchema,
                    format!(
                        "Node {} refers to undefined module {module_name}",
                        conf.name
                    ),
                )
            })?;

        let parent_type = self.nodes[parent.0].node_type;
        if !is_valid_child_type(parent == Self::ROOT, parent_type, conf) {
            return Err(NcDiffError::new(
                ErrorKind::InvalidSchema,
                format!(
                    "Node {} of type {} is not allowed under a {}",
                    conf.name, conf.node_type, parent_type
                ),
            ));
        }

        let mut keys = Vec::new();
        for key in conf.key.as_slice() {
            keys.push(self.namespaces.parse_tag(
                &namespace,
                key,
                TagNotation::Prefixed,
            )?);
        }

        let id = SchemaNodeId(self.nodes.len());
        self.nodes.push(SchemaNode {
            id,
            name: QName::new(&namespace, &conf.name),
            module: module_name.to_string(),
            node_type: conf.node_type,
            keys,
            ordered_by: conf.ordered_by,
            access: conf.access,
            presence: conf.presence,
            mandatory: conf.mandatory,
            datatype: conf.datatype.clone(),
            values: conf.values.clone(),
            leafref: conf.leafref.clone(),
            annotations: conf.annotations.clone(),
            parent: Some(parent),
            children: Vec::new(),
        });

        let mut children = Vec::new();
        for child_conf in conf.children.as_slice() {
            children.push(self.add_node(id, module_name, child_conf)?);
        }
        self.nodes[id.0].children = children;
        Ok(id)
    }

    fn build_index(&mut self) -> Result<(), NcDiffError> {
        let mut data_children = Vec::with_capacity(self.nodes.len());
        for node in self.nodes.iter() {
            let mut ids = Vec::new();
            self.collect_data_children(node.id, &mut ids);
            data_children.push(ids);
        }
        for (parent, ids) in data_children.iter().enumerate() {
            for (position, id) in ids.iter().enumerate() {
                let key = (SchemaNodeId(parent), self.nodes[id.0].name.clone());
                if self.child_lookup.insert(key, (position, *id)).is_some() {
                    return Err(NcDiffError::new(
                        ErrorKind::InvalidSchema,
                        format!(
                            "Duplicate data node {} under the same parent",
                            self.nodes[id.0].name
                        ),
                    ));
                }
            }
        }

        self.paths = vec![String::new(); self.nodes.len()];
        self.index_paths(Self::ROOT)
    }

    fn collect_data_children(
        &self,
        id: SchemaNodeId,
        ids: &mut Vec<SchemaNodeId>,
    ) {
        for child in self.nodes[id.0].children.as_slice() {
            if self.nodes[child.0].node_type.is_transparent() {
                self.collect_data_children(*child, ids);
            } else {
                ids.push(*child);
            }
        }
    }

    fn index_paths(&mut self, id: SchemaNodeId) -> Result<(), NcDiffError> {
        let parent_path = self.paths[id.0].clone();
        for child in self.nodes[id.0].children.clone() {
            let node = &self.nodes[child.0];
            let path = if node.node_type.is_transparent() {
                parent_path.clone()
            } else {
                let step = self.namespaces.format_qname(
                    "",
                    &node.name,
                    TagNotation::Prefixed,
                )?;
                let path = format!("{parent_path}/{step}");
                self.path_index.insert(path.clone(), child);
                path
            };
            self.paths[child.0] = path;
            self.index_paths(child)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), NcDiffError> {
        for node in self.nodes.iter().skip(1) {
            if node.is_user_ordered()
                && !matches!(
                    node.node_type,
                    SchemaNodeType::List | SchemaNodeType::LeafList
                )
            {
                return Err(NcDiffError::new(
                    ErrorKind::InvalidSchema,
                    format!(
                        "ordered-by user is only valid on list or leaf-list, \
                         but found on {} {}",
                        node.node_type,
                        self.xpath(node.id)
                    ),
                ));
            }
            if node.presence && node.node_type != SchemaNodeType::Container {
                return Err(NcDiffError::new(
                    ErrorKind::InvalidSchema,
                    format!(
                        "presence is only valid on container, but found on \
                         {} {}",
                        node.node_type,
                        self.xpath(node.id)
                    ),
                ));
            }
            if node.node_type != SchemaNodeType::List {
                if !node.keys.is_empty() {
                    return Err(NcDiffError::new(
                        ErrorKind::InvalidSchema,
                        format!(
                            "Only list could have key: {}",
                            self.xpath(node.id)
                        ),
                    ));
                }
                continue;
            }
            if node.keys.is_empty() && node.is_config() {
                return Err(NcDiffError::new(
                    ErrorKind::InvalidSchema,
                    format!(
                        "Config list {} does not define any key",
                        self.xpath(node.id)
                    ),
                ));
            }
            for key in node.keys.as_slice() {
                match self.data_child(node.id, key) {
                    Some(key_id)
                        if self.nodes[key_id.0].node_type
                            == SchemaNodeType::Leaf => {}
                    _ => {
                        return Err(NcDiffError::new(
                            ErrorKind::InvalidSchema,
                            format!(
                                "Key {} of list {} is not a leaf child of it",
                                key,
                                self.xpath(node.id)
                            ),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn root(&self) -> SchemaNodeId {
        Self::ROOT
    }

    /// The `id` should be generated by this tree, otherwise panic.
    pub fn node(&self, id: SchemaNodeId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaNode> {
        self.nodes.iter().skip(1)
    }

    pub fn namespaces(&self) -> &NamespaceMap {
        &self.namespaces
    }

    pub fn modules(&self) -> &[SchemaModuleConf] {
        self.modules.as_slice()
    }

    pub fn data_child(
        &self,
        parent: SchemaNodeId,
        name: &QName,
    ) -> Option<SchemaNodeId> {
        self.child_lookup
            .get(&(parent, name.clone()))
            .map(|(_, id)| *id)
    }

    /// Position of the child in schema order among the data children of
    /// `parent`.
    pub fn data_child_position(
        &self,
        parent: SchemaNodeId,
        name: &QName,
    ) -> Option<usize> {
        self.child_lookup
            .get(&(parent, name.clone()))
            .map(|(position, _)| *position)
    }

    /// Nearest ancestor which could hold data, skipping choice and case.
    pub fn data_parent(&self, id: SchemaNodeId) -> Option<SchemaNodeId> {
        let mut cur = self.nodes[id.0].parent;
        while let Some(parent) = cur {
            if !self.nodes[parent.0].node_type.is_transparent() {
                return Some(parent);
            }
            cur = self.nodes[parent.0].parent;
        }
        None
    }

    /// Schema node of a config node named `name` whose parent config node
    /// is an instance of `parent`.
    pub fn lookup_child(
        &self,
        parent: SchemaNodeId,
        name: &QName,
    ) -> Result<SchemaNodeId, NcDiffError> {
        self.data_child(parent, name).ok_or_else(|| {
            let parent_path = if parent == Self::ROOT {
                "/".to_string()
            } else {
                self.xpath(parent)
            };
            NcDiffError::new(
                ErrorKind::SchemaMissing,
                format!(
                    "No schema node found for {} under {parent_path}, \
                     is the model loaded?",
                    self.display_qname(name)
                ),
            )
        })
    }

    pub fn data_kind(&self, id: SchemaNodeId) -> Result<DataKind, NcDiffError> {
        let node = &self.nodes[id.0];
        node.node_type.data_kind().ok_or_else(|| {
            NcDiffError::new(
                ErrorKind::UnsupportedSchemaType,
                format!(
                    "Schema node {} of type {} cannot hold config data",
                    self.xpath(id),
                    node.node_type
                ),
            )
        })
    }

    /// Data path in `/prefix:name/prefix:name` form.
    pub fn xpath(&self, id: SchemaNodeId) -> String {
        self.paths[id.0].clone()
    }

    /// Render the name in `prefix:name` form, falling back to the Clark
    /// notation for unknown namespaces.
    pub fn display_qname(&self, name: &QName) -> String {
        self.namespaces
            .format_qname("", name, TagNotation::Prefixed)
            .unwrap_or_else(|_| name.to_string())
    }

    /// Find schema node by data path. Predicates are ignored. Absolute paths
    /// start from the root, relative ones (`../x`) from `start`.
    pub fn resolve_path(
        &self,
        start: SchemaNodeId,
        path: &str,
    ) -> Result<SchemaNodeId, NcDiffError> {
        let path = strip_predicates(path.trim());
        if let Some(id) = self.path_index.get(&path) {
            return Ok(*id);
        }
        let (mut cur, steps) = if let Some(rest) = path.strip_prefix('/') {
            (Self::ROOT, rest)
        } else {
            (start, path.as_str())
        };
        let invalid = |msg: String| {
            NcDiffError::new(
                ErrorKind::InvalidArgument,
                format!("Cannot resolve path '{path}': {msg}"),
            )
        };
        for step in steps.split('/').filter(|s| !s.is_empty()) {
            match step {
                "." | "current()" => continue,
                ".." => {
                    cur = self.data_parent(cur).ok_or_else(|| {
                        invalid("'..' goes beyond the root".to_string())
                    })?;
                }
                _ => {
                    let default_ns = if cur == Self::ROOT {
                        ""
                    } else {
                        self.nodes[cur.0].name.namespace.as_str()
                    };
                    let name = self.namespaces.parse_tag(
                        default_ns,
                        step,
                        TagNotation::Prefixed,
                    )?;
                    cur = self.data_child(cur, &name).ok_or_else(|| {
                        invalid(format!("no schema node for step {step}"))
                    })?;
                }
            }
        }
        Ok(cur)
    }

    pub fn get_by_path(&self, path: &str) -> Option<SchemaNodeId> {
        self.resolve_path(Self::ROOT, path).ok()
    }

    /// Modules shared by both trees must be identical.
    pub fn check_compatible(&self, other: &Self) -> Result<(), NcDiffError> {
        if std::ptr::eq(self, other) {
            return Ok(());
        }
        for module in self.modules.as_slice() {
            for other_module in other.modules.as_slice() {
                let same_name = module.name == other_module.name;
                let same_ns = module.namespace == other_module.namespace;
                if (same_name || same_ns) && module != other_module {
                    return Err(NcDiffError::new(
                        ErrorKind::ModelIncompatible,
                        format!(
                            "Module {} ({}) differs between the two configs",
                            module.name, module.namespace
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn is_valid_child_type(
    parent_is_root: bool,
    parent_type: SchemaNodeType,
    conf: &SchemaNodeConf,
) -> bool {
    use SchemaNodeType::*;
    match (parent_type, conf.node_type) {
        (Leaf | LeafList, _) => false,
        (_, Input | Output) => parent_type == Rpc,
        (Rpc, _) => false,
        (_, Rpc | Notification) => parent_is_root,
        (Choice, Case) => true,
        (Choice, Choice) => false,
        (_, Case) => false,
        _ => true,
    }
}

/// Remove `[...]` predicates from a path, honoring quoted strings.
pub(crate) fn strip_predicates(path: &str) -> String {
    let mut ret = String::with_capacity(path.len());
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for c in path.chars() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '\'' | '"' if depth > 0 => quote = Some(c),
            _ if depth == 0 => ret.push(c),
            _ => (),
        }
    }
    ret
}
