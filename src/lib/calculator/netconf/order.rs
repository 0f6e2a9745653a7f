// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeSet, HashMap};

use super::NetconfCalculator;
use crate::{
    DataKind, DataNode, InsertPosition, NcDiffError, NodeMatch, SchemaNodeId,
};

impl<'a> NetconfCalculator<'a> {
    // When applying a delta, entries without `yang:insert` are appended
    // after the existing entries of the same list or leaf-list. Starting
    // from that order, only the target entries outside the longest common
    // subsequence need to be moved by `insert` attributes.
    pub(crate) fn mark_user_order(
        &self,
        target: &DataNode,
        node_match: &NodeMatch,
        changes: &mut [Option<DataNode>],
    ) -> Result<(), NcDiffError> {
        let user_ordered: BTreeSet<SchemaNodeId> = node_match
            .a_schema_ids
            .iter()
            .copied()
            .filter(|id| self.schema().node(*id).is_user_ordered())
            .collect();
        if user_ordered.is_empty() {
            return Ok(());
        }
        let b_to_a: HashMap<usize, usize> =
            node_match.paired.iter().map(|(i, j)| (*j, *i)).collect();

        for schema_id in user_ordered {
            let target_seq: Vec<usize> = indexes_of(
                node_match.a_schema_ids.as_slice(),
                schema_id,
            );
            let mut applied_seq: Vec<usize> = indexes_of(
                node_match.b_schema_ids.as_slice(),
                schema_id,
            )
            .into_iter()
            .filter_map(|j| b_to_a.get(&j).copied())
            .collect();
            applied_seq.extend(
                target_seq
                    .iter()
                    .copied()
                    .filter(|i| node_match.only_in_a.contains(i)),
            );

            let kept = longest_common_subsequence(
                applied_seq.as_slice(),
                target_seq.as_slice(),
            );
            if kept.len() == target_seq.len() {
                continue;
            }
            log::debug!(
                "Moving {} of {} entries of {}",
                target_seq.len() - kept.len(),
                target_seq.len(),
                self.schema().xpath(schema_id)
            );
            for (pos, i) in target_seq.iter().enumerate() {
                if kept.contains(i) {
                    continue;
                }
                if changes[*i].is_none() {
                    changes[*i] =
                        Some(self.move_stub(schema_id, &target.children[*i])?);
                }
                let change = match changes[*i].as_mut() {
                    Some(c) => c,
                    None => continue,
                };
                if pos == 0 {
                    change.insert = Some(InsertPosition::First);
                } else {
                    let anchor = &target.children[target_seq[pos - 1]];
                    change.insert = Some(InsertPosition::After);
                    self.set_anchor(schema_id, change, anchor)?;
                }
            }
        }
        Ok(())
    }

    fn move_stub(
        &self,
        schema_id: SchemaNodeId,
        node: &DataNode,
    ) -> Result<DataNode, NcDiffError> {
        Ok(match self.schema().data_kind(schema_id)? {
            DataKind::List => self.list_entry_stub(schema_id, node),
            _ => node.shell(),
        })
    }

    fn set_anchor(
        &self,
        schema_id: SchemaNodeId,
        change: &mut DataNode,
        anchor: &DataNode,
    ) -> Result<(), NcDiffError> {
        if self.schema().data_kind(schema_id)? == DataKind::List {
            change.key = Some(self.base.list_keys(schema_id, anchor)?);
        } else {
            change.value = anchor.text.clone();
        }
        Ok(())
    }
}

fn indexes_of(schema_ids: &[SchemaNodeId], wanted: SchemaNodeId) -> Vec<usize> {
    schema_ids
        .iter()
        .enumerate()
        .filter(|(_, id)| **id == wanted)
        .map(|(i, _)| i)
        .collect()
}

/// Elements of the longest common subsequence of `a` and `b`.
pub(crate) fn longest_common_subsequence(
    a: &[usize],
    b: &[usize],
) -> BTreeSet<usize> {
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            table[i][j] = if a[i] == b[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }
    let mut ret = BTreeSet::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            ret.insert(a[i]);
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    ret
}
