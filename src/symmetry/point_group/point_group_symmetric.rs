use itertools::Itertools;
use nalgebra::{Point3, Vector3};

use crate::symmetry::symmetry_operation::SymmetryOperation;

use super::{AnalysisError, AnalysisState, PointGroupAnalyzer, RotationRecord};

impl PointGroupAnalyzer {
    /// Handles symmetric top molecules: the principal axis belonging to the
    /// non-degenerate moment of inertia is the unique candidate for the main
    /// rotation axis, and a two-fold axis perpendicular to it decides between
    /// the cyclic and dihedral families.
    pub(crate) fn analyse_symmetric(
        &self,
        moments: &Vector3<f64>,
        principal_axes: &[Vector3<f64>; 3],
        state: AnalysisState,
    ) -> Result<AnalysisState, AnalysisError> {
        let (i, j) = (0..3_usize)
            .tuple_combinations::<(usize, usize)>()
            .find(|&(i, j)| (moments[i] - moments[j]).abs() < self.moi_threshold)
            .expect("A symmetric top must have two degenerate moments of inertia.");
        let unique_axis = principal_axes[3 - i - j];

        let (state, _) = self.check_rot_sym(&unique_axis, state)?;
        let state = if state.rotations.is_empty() {
            state
        } else {
            self.check_perpendicular_r2(&unique_axis, state)?
        };
        Ok(match state.rotations.len() {
            0 => self.proc_no_rot(principal_axes, state),
            1 => self.proc_cyclic(state),
            _ => self.proc_dihedral(state),
        })
    }

    /// Determines the rotational symmetry about `axis`: candidate orders run
    /// from the size of the smallest off-axis symmetry-equivalent set down to
    /// one, restricted to divisors of that size, and the first valid order
    /// wins. Orders above one are recorded together with their operation.
    ///
    /// # Returns
    ///
    /// The updated state and the order found.
    pub(crate) fn check_rot_sym(
        &self,
        axis: &Vector3<f64>,
        mut state: AnalysisState,
    ) -> Result<(AnalysisState, u32), AnalysisError> {
        let min_set = self.smallest_set_not_on_axis(axis)?;
        let max_sym = u32::try_from(min_set.len()).expect("The set size must fit in a u32.");
        for order in (1..=max_sym).rev() {
            if max_sym % order != 0 {
                continue;
            }
            let op = SymmetryOperation::from_origin_axis_angle(
                &Point3::origin(),
                axis,
                360.0 / f64::from(order),
            );
            if self.is_valid(&op) {
                if order > 1 {
                    state.symmops.push(op);
                    state.rotations.push(RotationRecord { axis: *axis, order });
                }
                return Ok((state, order));
            }
        }
        Ok((state, 1))
    }

    /// Searches for a two-fold axis perpendicular to `axis`. Candidates are
    /// cross products of pair coordinate-differences with the axis; the first
    /// valid one is recorded and the search stops, since a single
    /// perpendicular two-fold axis suffices to establish dihedral character.
    pub(crate) fn check_perpendicular_r2(
        &self,
        axis: &Vector3<f64>,
        mut state: AnalysisState,
    ) -> Result<AnalysisState, AnalysisError> {
        let min_set = self.smallest_set_not_on_axis(axis)?;
        for (i, j) in min_set.iter().copied().tuple_combinations::<(usize, usize)>() {
            let diff = self.molecule.atoms[i].coordinates - self.molecule.atoms[j].coordinates;
            let test_axis = diff.cross(axis);
            if test_axis.norm() <= self.dist_threshold {
                continue;
            }
            let op =
                SymmetryOperation::from_origin_axis_angle(&Point3::origin(), &test_axis, 180.0);
            if self.is_valid(&op) {
                state.symmops.push(op);
                state.rotations.push(RotationRecord {
                    axis: test_axis,
                    order: 2,
                });
                break;
            }
        }
        Ok(state)
    }
}
