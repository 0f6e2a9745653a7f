// SPDX-License-Identifier: Apache-2.0

mod diff;
mod merge;
mod order;

use crate::{BaseCalculator, DiffOption, SchemaTree};

/// Computes and applies NETCONF `edit-config` deltas.
#[derive(Debug, Clone, Copy)]
pub struct NetconfCalculator<'a> {
    base: BaseCalculator<'a>,
    option: &'a DiffOption,
}

impl<'a> NetconfCalculator<'a> {
    pub fn new(schema: &'a SchemaTree, option: &'a DiffOption) -> Self {
        Self {
            base: BaseCalculator::new(schema),
            option,
        }
    }

    fn schema(&self) -> &'a SchemaTree {
        self.base.schema
    }
}
