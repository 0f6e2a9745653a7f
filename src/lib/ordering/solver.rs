// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::{
    AnnotationKeyword, AnnotationQualifier, Conjunction, ErrorKind,
    NcDiffError, OrderOperation, OrderingConstraint, SchemaNodeId, SchemaTree,
};

use crate::OrderOperation::{Create, Delete, Modify};

const CSV_HEADER: &str =
    "source,operation,conjunction,target,target_operation";

/// Ordering constraints between pairs of schema nodes, keyed by
/// `(source, target)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderingMap {
    entries:
        BTreeMap<(SchemaNodeId, SchemaNodeId), BTreeSet<OrderingConstraint>>,
    paths: HashMap<SchemaNodeId, String>,
}

impl OrderingMap {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn constraints(
        &self,
        source: SchemaNodeId,
        target: SchemaNodeId,
    ) -> Option<&BTreeSet<OrderingConstraint>> {
        self.entries.get(&(source, target))
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<
        Item = (&(SchemaNodeId, SchemaNodeId), &BTreeSet<OrderingConstraint>),
    > {
        self.entries.iter()
    }

    /// Constraints of `source` grouped by target data path.
    pub fn before_map(
        &self,
        source: SchemaNodeId,
    ) -> BTreeMap<String, Vec<OrderingConstraint>> {
        self.entries
            .range(
                (source, SchemaNodeId(0))..=(source, SchemaNodeId(usize::MAX)),
            )
            .map(|((_, target), constraints)| {
                (
                    self.path(*target),
                    constraints.iter().copied().collect(),
                )
            })
            .collect()
    }

    fn path(&self, id: SchemaNodeId) -> String {
        self.paths.get(&id).cloned().unwrap_or_else(|| id.to_string())
    }

    /// One row per constraint, sorted by source and target path.
    pub fn to_csv(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for ((source, target), constraints) in self.entries.iter() {
            for constraint in constraints {
                rows.push(format!(
                    "{},{},{},{},{}",
                    self.path(*source),
                    constraint.operation.as_str(),
                    constraint.conjunction.as_str(),
                    self.path(*target),
                    constraint.target_operation.as_str(),
                ));
            }
        }
        rows.sort_unstable();
        let mut ret = String::from(CSV_HEADER);
        ret.push('\n');
        for row in rows {
            ret.push_str(&row);
            ret.push('\n');
        }
        ret
    }

    fn insert(
        &mut self,
        schema: &SchemaTree,
        source: SchemaNodeId,
        target: SchemaNodeId,
        constraints: BTreeSet<OrderingConstraint>,
    ) {
        if constraints.is_empty() {
            return;
        }
        self.paths.insert(source, schema.xpath(source));
        self.paths.insert(target, schema.xpath(target));
        self.entries
            .entry((source, target))
            .or_default()
            .extend(constraints);
    }
}

type MirrorPair = (SchemaNodeId, SchemaNodeId, AnnotationKeyword);

// Leafref targets and annotation targets resolved to schema nodes.
#[derive(Debug, Clone)]
struct Relation<'a> {
    source: SchemaNodeId,
    target: SchemaNodeId,
    // None for leafref
    keyword: Option<AnnotationKeyword>,
    qualifiers: &'a [AnnotationQualifier],
}

/// Derives the ordering constraints declared by `leafref` types and CLI-diff
/// annotations of a compiled schema.
#[derive(Debug)]
pub struct OrderingSolver<'a> {
    schema: &'a SchemaTree,
}

impl<'a> OrderingSolver<'a> {
    pub fn new(schema: &'a SchemaTree) -> Self {
        Self { schema }
    }

    pub fn solve(&self) -> Result<OrderingMap, NcDiffError> {
        let relations = self.collect_relations()?;

        let mirror_pairs: HashSet<MirrorPair> = relations
            .iter()
            .filter_map(|r| match r.keyword {
                Some(
                    k @ (AnnotationKeyword::CliDiffCreateAfter
                    | AnnotationKeyword::CliDiffDeleteBefore),
                ) => Some((r.source, r.target, k)),
                _ => None,
            })
            .collect();

        let mut ret = OrderingMap::default();
        for relation in relations.iter() {
            let mut constraints = match relation.keyword {
                Some(keyword) => {
                    annotation_constraints(keyword, relation.qualifiers)
                }
                None => leafref_constraints(),
            };
            if is_symmetric(relation, &mirror_pairs) {
                log::debug!(
                    "Symmetric {:?} between {} and {}, dropping modify \
                     ordering",
                    relation.keyword,
                    self.schema.xpath(relation.source),
                    self.schema.xpath(relation.target)
                );
                constraints.retain(|c| c.target_operation != Modify);
            }
            ret.insert(
                self.schema,
                relation.source,
                relation.target,
                constraints,
            );
        }
        log::debug!(
            "Derived ordering constraints for {} node pairs",
            ret.len()
        );
        Ok(ret)
    }

    fn collect_relations(&self) -> Result<Vec<Relation<'a>>, NcDiffError> {
        let mut ret = Vec::new();
        for node in self.schema.iter() {
            if let Some(path) = node.leafref.as_deref() {
                if let Some(target) = self.resolve(node.id, path) {
                    ret.push(Relation {
                        source: node.id,
                        target,
                        keyword: None,
                        qualifiers: &[],
                    });
                }
            }
            for annotation in node.annotations.as_slice() {
                let keyword = annotation.keyword;
                if let Some(qualifier) = annotation
                    .qualifiers
                    .iter()
                    .find(|q| q.is_trigger() != keyword.is_dependency())
                {
                    return Err(NcDiffError::new(
                        ErrorKind::InvalidSchema,
                        format!(
                            "Qualifier {qualifier} is not allowed in \
                             {keyword} of {}",
                            self.schema.xpath(node.id)
                        ),
                    ));
                }
                if let Some(target) = self.resolve(node.id, &annotation.target)
                {
                    ret.push(Relation {
                        source: node.id,
                        target,
                        keyword: Some(keyword),
                        qualifiers: annotation.qualifiers.as_slice(),
                    });
                }
            }
        }
        Ok(ret)
    }

    fn resolve(
        &self,
        source: SchemaNodeId,
        path: &str,
    ) -> Option<SchemaNodeId> {
        match self.schema.resolve_path(source, path) {
            Ok(target) if target == source => {
                log::warn!(
                    "Ignoring ordering of {} against itself",
                    self.schema.xpath(source)
                );
                None
            }
            Ok(target) => Some(target),
            Err(e) => {
                log::warn!(
                    "Ignoring ordering target {path} of {}: {e}",
                    self.schema.xpath(source)
                );
                None
            }
        }
    }
}

fn is_symmetric(
    relation: &Relation,
    mirror_pairs: &HashSet<MirrorPair>,
) -> bool {
    let (keyword, mirror) = match relation.keyword {
        Some(AnnotationKeyword::CliDiffCreateAfter) => (
            AnnotationKeyword::CliDiffCreateAfter,
            AnnotationKeyword::CliDiffDeleteBefore,
        ),
        Some(AnnotationKeyword::CliDiffDeleteBefore) => (
            AnnotationKeyword::CliDiffDeleteBefore,
            AnnotationKeyword::CliDiffCreateAfter,
        ),
        _ => return false,
    };
    // Only one of the pair toward the target, and the mirror coming back.
    !mirror_pairs.contains(&(relation.source, relation.target, mirror))
        && mirror_pairs.contains(&(relation.target, relation.source, mirror))
        && mirror_pairs.contains(&(relation.source, relation.target, keyword))
}

fn source_operations(
    keyword: AnnotationKeyword,
) -> (&'static [OrderOperation], Conjunction) {
    use AnnotationKeyword::*;
    match keyword {
        CliDiffAfter => (&OrderOperation::ALL, Conjunction::After),
        CliDiffBefore => (&OrderOperation::ALL, Conjunction::Before),
        CliDiffCreateAfter => (&[Create], Conjunction::After),
        CliDiffCreateBefore => (&[Create], Conjunction::Before),
        CliDiffDeleteAfter => (&[Delete], Conjunction::After),
        CliDiffDeleteBefore => (&[Delete], Conjunction::Before),
        CliDiffModifyAfter => (&[Modify], Conjunction::After),
        CliDiffModifyBefore => (&[Modify], Conjunction::Before),
        CliDiffSetAfter => (&[Create, Modify], Conjunction::After),
        CliDiffSetBefore => (&[Create, Modify], Conjunction::Before),
        CliDiffDependency => (&[], Conjunction::After),
    }
}

fn target_operations(
    qualifiers: &[AnnotationQualifier],
) -> BTreeSet<OrderOperation> {
    let mut ret = BTreeSet::new();
    for qualifier in qualifiers {
        match qualifier {
            AnnotationQualifier::CliWhenTargetSet => {
                ret.insert(Create);
                ret.insert(Modify);
            }
            AnnotationQualifier::CliWhenTargetCreate => {
                ret.insert(Create);
            }
            AnnotationQualifier::CliWhenTargetModify => {
                ret.insert(Modify);
            }
            AnnotationQualifier::CliWhenTargetDelete => {
                ret.insert(Delete);
            }
            AnnotationQualifier::CliTriggerOnSet
            | AnnotationQualifier::CliTriggerOnDelete
            | AnnotationQualifier::CliTriggerOnAll => (),
        }
    }
    if ret.is_empty() {
        ret.extend(OrderOperation::ALL);
    }
    ret
}

fn dependency_constraints(
    qualifiers: &[AnnotationQualifier],
) -> BTreeSet<OrderingConstraint> {
    let mut ret: BTreeSet<OrderingConstraint> = [
        OrderingConstraint::new(Create, Conjunction::After, Create),
        OrderingConstraint::new(Delete, Conjunction::Before, Delete),
    ]
    .into();
    let on_set = [
        OrderingConstraint::new(Create, Conjunction::After, Modify),
        OrderingConstraint::new(Modify, Conjunction::After, Create),
        OrderingConstraint::new(Modify, Conjunction::After, Modify),
    ];
    let on_delete = [
        OrderingConstraint::new(Modify, Conjunction::Before, Delete),
        OrderingConstraint::new(Create, Conjunction::After, Delete),
    ];
    for qualifier in qualifiers {
        match qualifier {
            AnnotationQualifier::CliTriggerOnSet => ret.extend(on_set),
            AnnotationQualifier::CliTriggerOnDelete => ret.extend(on_delete),
            AnnotationQualifier::CliTriggerOnAll => {
                ret.extend(on_set);
                ret.extend(on_delete);
            }
            _ => (),
        }
    }
    ret
}

pub(crate) fn annotation_constraints(
    keyword: AnnotationKeyword,
    qualifiers: &[AnnotationQualifier],
) -> BTreeSet<OrderingConstraint> {
    if keyword.is_dependency() {
        return dependency_constraints(qualifiers);
    }
    let (operations, conjunction) = source_operations(keyword);
    let targets = target_operations(qualifiers);
    let mut ret = BTreeSet::new();
    for operation in operations {
        for target_operation in targets.iter() {
            ret.insert(OrderingConstraint::new(
                *operation,
                conjunction,
                *target_operation,
            ));
        }
    }
    ret
}

pub(crate) fn leafref_constraints() -> BTreeSet<OrderingConstraint> {
    [
        OrderingConstraint::new(Create, Conjunction::After, Create),
        OrderingConstraint::new(Modify, Conjunction::After, Create),
        OrderingConstraint::new(Delete, Conjunction::Before, Delete),
    ]
    .into()
}
