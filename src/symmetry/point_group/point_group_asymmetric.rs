use log;
use nalgebra::{Point3, Vector3};

use crate::symmetry::symmetry_operation::SymmetryOperation;

use super::{AnalysisState, PointGroupAnalyzer, RotationRecord};

impl PointGroupAnalyzer {
    /// Handles asymmetric top molecules, which cannot carry rotational
    /// symmetry beyond two-fold. Two-fold axes can only lie along the
    /// principal axes.
    pub(crate) fn analyse_asymmetric(
        &self,
        principal_axes: &[Vector3<f64>; 3],
        state: AnalysisState,
    ) -> AnalysisState {
        let state = self.check_r2_axes_asym(principal_axes, state);
        match state.rotations.len() {
            0 => {
                log::debug!("No rotational symmetry detected.");
                self.proc_no_rot(principal_axes, state)
            }
            3 => {
                log::debug!("Dihedral group detected.");
                self.proc_dihedral(state)
            }
            n => {
                if n == 2 {
                    // Two independent two-fold axes imply a third by closure;
                    // reaching this case indicates borderline tolerances.
                    log::debug!(
                        "Two two-fold axes found for an asymmetric top; treating as cyclic."
                    );
                } else {
                    log::debug!("Cyclic group detected.");
                }
                self.proc_cyclic(state)
            }
        }
    }

    /// Tests the 180-degree rotation about each principal axis.
    fn check_r2_axes_asym(
        &self,
        principal_axes: &[Vector3<f64>; 3],
        mut state: AnalysisState,
    ) -> AnalysisState {
        for axis in principal_axes {
            let op = SymmetryOperation::from_origin_axis_angle(&Point3::origin(), axis, 180.0);
            if self.is_valid(&op) {
                state.symmops.push(op);
                state.rotations.push(RotationRecord {
                    axis: *axis,
                    order: 2,
                });
            }
        }
        state
    }
}
