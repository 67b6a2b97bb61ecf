//! Point groups as sets of symmetry operations closed under composition.

use std::fmt;

use log;
use serde::{Deserialize, Serialize};

use crate::symmetry::symmetry_operation::SymmetryOperation;

#[cfg(test)]
mod group_tests;

/// Safety ceiling on the number of operations the closure generator may
/// produce before giving up. Real point groups have at most a few dozen
/// operations; exceeding this ceiling indicates a misconfigured tolerance or a
/// malformed generating set.
pub const MAX_SYMMOPS: usize = 200;

/// A point group: a Schoenflies symbol together with an ordered set of
/// symmetry operations closed under composition.
///
/// The insertion order of the operations carries no group-theoretic meaning
/// but is preserved for reproducibility.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointGroup {
    /// The Schoenflies symbol of the point group.
    sch_symbol: String,

    /// The symmetry operations of the point group.
    operations: Vec<SymmetryOperation>,

    /// The tolerance used when closing the group and when comparing
    /// operations.
    matrix_threshold: f64,
}

impl PointGroup {
    /// Builds a point group by closing `generators` under composition. It is
    /// sufficient to provide just enough operations to generate the full set.
    ///
    /// # Arguments
    ///
    /// * `sch_symbol` - The Schoenflies symbol of the point group.
    /// * `generators` - A generating set of symmetry operations.
    /// * `thresh` - The tolerance for comparing affine matrices during
    ///     closure.
    #[must_use]
    pub fn from_generators(
        sch_symbol: &str,
        generators: &[SymmetryOperation],
        thresh: f64,
    ) -> Self {
        PointGroup {
            sch_symbol: sch_symbol.to_owned(),
            operations: generate_full_symmops(generators, thresh),
            matrix_threshold: thresh,
        }
    }

    /// The Schoenflies symbol of the point group.
    #[must_use]
    pub fn sch_symbol(&self) -> &str {
        &self.sch_symbol
    }

    /// The order of the point group.
    #[must_use]
    pub fn order(&self) -> usize {
        self.operations.len()
    }

    /// The symmetry operations of the point group.
    #[must_use]
    pub fn operations(&self) -> &[SymmetryOperation] {
        &self.operations
    }

    /// Checks whether an operation equal to `op` within the closure tolerance
    /// belongs to the point group.
    #[must_use]
    pub fn contains(&self, op: &SymmetryOperation) -> bool {
        self.operations
            .iter()
            .any(|member| member.approx_eq(op, self.matrix_threshold))
    }
}

impl fmt::Display for PointGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sch_symbol)
    }
}

/// Closes a generating set of symmetry operations under composition.
///
/// Every pass scans all ordered pairs of known operations; as soon as a
/// product is found that matches no known operation within `thresh`, it is
/// appended and the scan restarts. The single addition per pass keeps the
/// number of passes bounded by the final group order. The identity is seeded
/// into the set when absent, so the result always contains it.
///
/// When the set grows beyond [`MAX_SYMMOPS`], the (non-closed) set accumulated
/// so far is returned and a warning is logged.
///
/// # Arguments
///
/// * `generators` - An initial set of symmetry operations.
/// * `thresh` - The tolerance for comparing affine matrices.
///
/// # Returns
///
/// The full set of symmetry operations generated by `generators`.
#[must_use]
pub fn generate_full_symmops(
    generators: &[SymmetryOperation],
    thresh: f64,
) -> Vec<SymmetryOperation> {
    let mut symmops: Vec<SymmetryOperation> = generators.to_vec();
    let identity = SymmetryOperation::identity();
    if !symmops.iter().any(|op| op.approx_eq(&identity, thresh)) {
        symmops.insert(0, identity);
    }
    loop {
        let mut new_op: Option<SymmetryOperation> = None;
        'scan: for op1 in &symmops {
            for op2 in &symmops {
                let product = op1.compose(op2);
                if !symmops.iter().any(|op| op.approx_eq(&product, thresh)) {
                    new_op = Some(product);
                    break 'scan;
                }
            }
        }
        match new_op {
            Some(op) => {
                symmops.push(op);
                if symmops.len() > MAX_SYMMOPS {
                    log::warn!(
                        "Generation of symmetry operations stopped after exceeding \
                         {MAX_SYMMOPS} operations without reaching closure; the tolerance \
                         is likely misconfigured or the generating set malformed."
                    );
                    return symmops;
                }
            }
            None => return symmops,
        }
    }
}
