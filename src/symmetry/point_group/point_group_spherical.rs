use itertools::Itertools;
use log;
use nalgebra::{Point3, Vector3};

use crate::symmetry::symmetry_operation::SymmetryOperation;

use super::{AnalysisError, AnalysisState, PointGroupAnalyzer, RotationRecord};

impl PointGroupAnalyzer {
    /// Handles spherical top molecules, which carry the cubic and icosahedral
    /// groups: T, Th, Td, O, Oh, I or Ih. The highest-order rotation axis
    /// found decides the family; a spherical top without at least a three-fold
    /// axis is accidental and falls back to the symmetric-top procedure.
    pub(crate) fn analyse_spherical(
        &self,
        moments: &Vector3<f64>,
        principal_axes: &[Vector3<f64>; 3],
        state: AnalysisState,
    ) -> Result<AnalysisState, AnalysisError> {
        let state = self.find_spherical_axes(state)?;
        let Some(main) = state.max_rotation().cloned() else {
            log::debug!("Accidental spherical top; falling back to the symmetric-top procedure.");
            return self.analyse_symmetric(moments, principal_axes, state);
        };
        if main.order < 3 {
            log::debug!("Accidental spherical top; falling back to the symmetric-top procedure.");
            return self.analyse_symmetric(moments, principal_axes, state);
        }

        let inversion = SymmetryOperation::inversion();
        let state = match main.order {
            3 => {
                let (mut state, mirror) = self.find_mirror(&main.axis, state);
                if mirror.is_some() {
                    if self.is_valid(&inversion) {
                        state.symmops.push(inversion);
                        state.sch_symbol = "Th".to_owned();
                    } else {
                        state.sch_symbol = "Td".to_owned();
                    }
                } else {
                    state.sch_symbol = "T".to_owned();
                }
                state
            }
            4 => {
                let mut state = state;
                if self.is_valid(&inversion) {
                    state.symmops.push(inversion);
                    state.sch_symbol = "Oh".to_owned();
                } else {
                    state.sch_symbol = "O".to_owned();
                }
                state
            }
            _ => {
                let mut state = state;
                if self.is_valid(&inversion) {
                    state.symmops.push(inversion);
                    state.sch_symbol = "Ih".to_owned();
                } else {
                    state.sch_symbol = "I".to_owned();
                }
                state
            }
        };
        Ok(state)
    }

    /// Searches for R5, R4, R3 and R2 axes from triples of atoms in the
    /// smallest symmetry-equivalent cluster. Sums of coordinate pairs probe
    /// two-fold axes through edge midpoints; cross products of edge vectors
    /// probe higher-order axes through face centres. The search stops early
    /// once a two-fold axis and a four- or five-fold axis are both confirmed,
    /// which suffices to tell the T, O and I families apart.
    fn find_spherical_axes(
        &self,
        mut state: AnalysisState,
    ) -> Result<AnalysisState, AnalysisError> {
        let clustered = self.clustered_sites()?;
        let test_set = clustered
            .smallest_class()
            .expect("At least one class of symmetry-equivalent atoms must exist.")
            .clone();
        let mut rot_present = [false; 6];
        for (s1, s2, s3) in test_set
            .iter()
            .copied()
            .tuple_combinations::<(usize, usize, usize)>()
        {
            let c1 = self.molecule.atoms[s1].coordinates;
            let c2 = self.molecule.atoms[s2].coordinates;
            let c3 = self.molecule.atoms[s3].coordinates;

            if !rot_present[2] {
                for test_axis in [c1.coords + c2.coords, c1.coords + c3.coords] {
                    if rot_present[2] {
                        break;
                    }
                    if test_axis.norm() <= self.dist_threshold {
                        continue;
                    }
                    let op = SymmetryOperation::from_origin_axis_angle(
                        &Point3::origin(),
                        &test_axis,
                        180.0,
                    );
                    if self.is_valid(&op) {
                        rot_present[2] = true;
                        state.symmops.push(op);
                        state.rotations.push(RotationRecord {
                            axis: test_axis,
                            order: 2,
                        });
                    }
                }
            }

            let test_axis = (c2 - c1).cross(&(c3 - c1));
            if test_axis.norm() > self.dist_threshold {
                for order in [3u32, 4, 5] {
                    if rot_present[order as usize] {
                        continue;
                    }
                    let op = SymmetryOperation::from_origin_axis_angle(
                        &Point3::origin(),
                        &test_axis,
                        360.0 / f64::from(order),
                    );
                    if self.is_valid(&op) {
                        rot_present[order as usize] = true;
                        state.symmops.push(op);
                        state.rotations.push(RotationRecord {
                            axis: test_axis,
                            order,
                        });
                        break;
                    }
                }
            }

            if rot_present[2] && (rot_present[4] || rot_present[5]) {
                break;
            }
        }
        Ok(state)
    }
}
