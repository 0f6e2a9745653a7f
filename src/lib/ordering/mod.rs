// SPDX-License-Identifier: Apache-2.0

mod annotation;
mod constraint;
mod solver;

pub use self::annotation::{
    AnnotationKeyword, AnnotationQualifier, OrderingAnnotation,
};
pub use self::constraint::{Conjunction, OrderOperation, OrderingConstraint};
pub use self::solver::{OrderingMap, OrderingSolver};

#[cfg(test)]
pub(crate) use self::solver::annotation_constraints;
