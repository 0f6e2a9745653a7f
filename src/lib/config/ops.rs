// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;

use super::{Config, ConfigDelta};
use crate::NcDiffError;

impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        match self.is_equal(other) {
            Ok(b) => b,
            Err(e) => {
                log::error!("Failed to compare configs: {e}");
                false
            }
        }
    }
}

// Ordered by sub-tree inclusion
impl PartialOrd for Config {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let compare = || -> Result<Option<Ordering>, NcDiffError> {
            let is_subset = self.is_subset_of(other)?;
            let is_superset = self.is_superset_of(other)?;
            Ok(match (is_subset, is_superset) {
                (true, true) => Some(Ordering::Equal),
                (true, false) => Some(Ordering::Less),
                (false, true) => Some(Ordering::Greater),
                (false, false) => None,
            })
        };
        match compare() {
            Ok(o) => o,
            Err(e) => {
                log::error!("Failed to compare configs: {e}");
                None
            }
        }
    }
}

/// `&new - &old` is the delta turning `old` into `new`.
impl std::ops::Sub for &Config {
    type Output = Result<ConfigDelta, NcDiffError>;

    fn sub(self, other: &Config) -> Self::Output {
        self.diff(other)
    }
}

impl std::ops::Add for &Config {
    type Output = Result<Config, NcDiffError>;

    fn add(self, other: &Config) -> Self::Output {
        self.merge(other)
    }
}

impl std::ops::Add<&ConfigDelta> for &Config {
    type Output = Result<Config, NcDiffError>;

    fn add(self, delta: &ConfigDelta) -> Self::Output {
        self.apply(delta)
    }
}
