//! Point-group detection for molecules.
//!
//! The analyser classifies the shape of a molecule from the eigenvalues of its
//! normalised inertia tensor and dispatches to shape-specific searches for
//! rotation axes, mirror planes and an inversion centre. The operations
//! collected along the way generate the point group, which is closed under
//! composition by [`crate::group::generate_full_symmops`].

use std::fmt;

use derive_builder::Builder;
use itertools::Itertools;
use log;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auxiliary::geometry;
use crate::auxiliary::molecule::Molecule;
use crate::group::PointGroup;
use crate::rotsym::{self, RotationalSymmetry};
use crate::symmetry::symmetry_operation::SymmetryOperation;

pub mod cluster;
use self::cluster::ClusteredSites;

mod point_group_asymmetric;
mod point_group_linear;
mod point_group_spherical;
mod point_group_symmetric;


/// Default threshold for treating sites as symmetrically equivalent, in the
/// distance units of the molecule.
pub const DEFAULT_DIST_THRESHOLD: f64 = 0.3;

/// Default threshold for comparing eigenvalues of the normalised inertia
/// tensor.
pub const DEFAULT_MOI_THRESHOLD: f64 = 0.01;

/// Default threshold for comparing affine matrices when closing the group.
pub const DEFAULT_MATRIX_THRESHOLD: f64 = 0.1;

/// Schoenflies symbol assigned to centrosymmetric linear molecules. The `*`
/// stands for `∞`.
pub const LINEAR_CENTROSYMMETRIC_SYMBOL: &str = "D*h";

/// Schoenflies symbol assigned to non-centrosymmetric linear molecules. The
/// `*` stands for `∞`.
pub const LINEAR_POLAR_SYMBOL: &str = "C*v";

/// Errors arising during point-group analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// More than one atom coincides with the origin within the distance
    /// threshold; such a molecule is structurally malformed and cannot be
    /// analysed.
    #[error("more than one atom lies within {tolerance} of the origin")]
    CoincidentOriginAtoms { tolerance: f64 },

    /// The molecule contains no atoms.
    #[error("cannot analyse a molecule with no atoms")]
    EmptyMolecule,

    /// Every class of symmetry-equivalent atoms lies on the candidate axis,
    /// leaving nothing to probe for rotational symmetry.
    #[error("no symmetry-equivalent atoms found off the candidate axis")]
    NoOffAxisAtoms,
}

/// A rotation axis paired with the rotational order confirmed about it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RotationRecord {
    /// The rotation axis as recorded by the search probe; not necessarily
    /// normalised.
    pub axis: Vector3<f64>,

    /// The rotational order $n$: rotation by $360/n$ degrees maps the molecule
    /// onto itself.
    pub order: u32,
}

/// The type of a mirror plane relative to a reference axis.
///
/// Horizontal mirrors are perpendicular to the axis; vertical and diagonal
/// mirrors contain it. Vertical mirrors pass through atoms, diagonal mirrors
/// bisect the recorded two-fold axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MirrorKind {
    Horizontal,
    Vertical,
    Diagonal,
}

impl fmt::Display for MirrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorKind::Horizontal => write!(f, "h"),
            MirrorKind::Vertical => write!(f, "v"),
            MirrorKind::Diagonal => write!(f, "d"),
        }
    }
}

/// Working state threaded through one classification run: the operations and
/// rotation records accumulated so far, and the incrementally assigned
/// Schoenflies symbol.
#[derive(Clone, Debug)]
pub(crate) struct AnalysisState {
    pub(crate) sch_symbol: String,
    pub(crate) symmops: Vec<SymmetryOperation>,
    pub(crate) rotations: Vec<RotationRecord>,
}

impl AnalysisState {
    fn new() -> Self {
        AnalysisState {
            sch_symbol: "C1".to_owned(),
            symmops: vec![SymmetryOperation::identity()],
            rotations: vec![],
        }
    }

    /// The first rotation record of maximal order.
    pub(crate) fn max_rotation(&self) -> Option<&RotationRecord> {
        self.rotations.iter().fold(None, |best, record| match best {
            None => Some(record),
            Some(b) if record.order > b.order => Some(record),
            _ => best,
        })
    }
}

/// A struct for configuring and running point-group analyses of a molecule.
#[derive(Builder, Clone, Debug)]
pub struct PointGroupAnalyzer {
    /// The molecule to be analysed. Analysis requires its centre of mass at
    /// the origin; pass `recentre = true` to the builder unless the molecule
    /// is already centred.
    #[builder(setter(custom))]
    molecule: Molecule,

    /// Threshold for treating sites as symmetrically equivalent.
    #[builder(setter(custom), default = "DEFAULT_DIST_THRESHOLD")]
    dist_threshold: f64,

    /// Threshold for comparing eigenvalues of the normalised inertia tensor.
    #[builder(setter(custom), default = "DEFAULT_MOI_THRESHOLD")]
    moi_threshold: f64,

    /// Threshold for comparing affine matrices when closing the group.
    #[builder(setter(custom), default = "DEFAULT_MATRIX_THRESHOLD")]
    matrix_threshold: f64,
}

impl PointGroupAnalyzerBuilder {
    /// Initialises the molecule to be analysed.
    ///
    /// # Arguments
    ///
    /// * `molecule` - The molecule to be analysed.
    /// * `recentre` - A flag indicating if the molecule shall be recentred so
    ///     that its centre of mass lies at the origin.
    pub fn molecule(&mut self, molecule: &Molecule, recentre: bool) -> &mut Self {
        if recentre {
            // The analyzer owns a recentred copy of `molecule`.
            self.molecule = Some(molecule.recentre());
        } else {
            self.molecule = Some(molecule.clone());
        }
        self
    }

    /// Initialises the threshold for symmetry-equivalence of sites.
    pub fn dist_threshold(&mut self, thresh: f64) -> &mut Self {
        if thresh >= f64::EPSILON {
            self.dist_threshold = Some(thresh);
        } else {
            log::error!(
                "Distance threshold {thresh} is invalid. Thresholds must be at least the machine epsilon."
            );
            self.dist_threshold = None;
        }
        self
    }

    /// Initialises the threshold for moment-of-inertia comparisons.
    pub fn moi_threshold(&mut self, thresh: f64) -> &mut Self {
        if thresh >= f64::EPSILON {
            self.moi_threshold = Some(thresh);
        } else {
            log::error!(
                "Moment-of-inertia threshold {thresh} is invalid. Thresholds must be at least the machine epsilon."
            );
            self.moi_threshold = None;
        }
        self
    }

    /// Initialises the threshold for affine-matrix comparisons.
    pub fn matrix_threshold(&mut self, thresh: f64) -> &mut Self {
        if thresh >= f64::EPSILON {
            self.matrix_threshold = Some(thresh);
        } else {
            log::error!(
                "Matrix threshold {thresh} is invalid. Thresholds must be at least the machine epsilon."
            );
            self.matrix_threshold = None;
        }
        self
    }
}

impl PointGroupAnalyzer {
    /// Returns a builder to construct a new point-group analyzer.
    #[must_use]
    pub fn builder() -> PointGroupAnalyzerBuilder {
        PointGroupAnalyzerBuilder::default()
    }

    /// The molecule under analysis.
    #[must_use]
    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    /// Performs the point-group classification.
    ///
    /// # Returns
    ///
    /// The detection outcome: the Schoenflies symbol, the generating symmetry
    /// operations, and the rotation records collected during the search.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::EmptyMolecule`] for a molecule with no atoms, and
    /// [`AnalysisError::CoincidentOriginAtoms`] when clustering finds more
    /// than one atom at the origin.
    pub fn analyse(&self) -> Result<PointGroupDetection, AnalysisError> {
        if self.molecule.atoms.is_empty() {
            return Err(AnalysisError::EmptyMolecule);
        }
        let mut state = AnalysisState::new();

        // A single atom has the full rotation-reflection symmetry of the
        // sphere.
        if self.molecule.atoms.len() == 1 {
            state.sch_symbol = "Kh".to_owned();
            return Ok(self.into_detection(state, None));
        }

        let inertia_tensor = rotsym::normalised_inertia_tensor(&self.molecule);
        let eigen = inertia_tensor.symmetric_eigen();
        let moments = eigen.eigenvalues;
        let principal_axes = [
            eigen.eigenvectors.column(0).into_owned(),
            eigen.eigenvectors.column(1).into_owned(),
            eigen.eigenvectors.column(2).into_owned(),
        ];
        let shape = rotsym::calc_rotational_symmetry(&moments, self.moi_threshold);
        log::debug!("Rotational symmetry found: {shape}");

        let state = match shape {
            RotationalSymmetry::Linear => self.analyse_linear(state),
            RotationalSymmetry::AsymmetricTop => self.analyse_asymmetric(&principal_axes, state),
            RotationalSymmetry::SymmetricTop => {
                self.analyse_symmetric(&moments, &principal_axes, state)?
            }
            RotationalSymmetry::SphericalTop => {
                self.analyse_spherical(&moments, &principal_axes, state)?
            }
        };
        Ok(self.into_detection(state, Some(shape)))
    }

    /// Runs the analysis and closes the resulting operations into a
    /// [`PointGroup`].
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::analyse`].
    pub fn get_point_group(&self) -> Result<PointGroup, AnalysisError> {
        Ok(self.analyse()?.to_point_group())
    }

    fn into_detection(
        &self,
        state: AnalysisState,
        shape: Option<RotationalSymmetry>,
    ) -> PointGroupDetection {
        PointGroupDetection {
            sch_symbol: state.sch_symbol,
            operations: state.symmops,
            rotations: state.rotations,
            rotational_symmetry: shape,
            matrix_threshold: self.matrix_threshold,
        }
    }

    pub(crate) fn is_valid(&self, op: &SymmetryOperation) -> bool {
        is_valid_op(op, &self.molecule, self.dist_threshold)
    }

    pub(crate) fn clustered_sites(&self) -> Result<ClusteredSites, AnalysisError> {
        cluster::cluster_sites(&self.molecule, self.dist_threshold)
    }

    /// The smallest class of symmetry-equivalent atoms not lying on `axis`.
    /// Atoms on the axis are irrelevant when probing rotations about it, and
    /// the size of the smallest off-axis class bounds the possible rotational
    /// orders.
    pub(crate) fn smallest_set_not_on_axis(
        &self,
        axis: &Vector3<f64>,
    ) -> Result<Vec<usize>, AnalysisError> {
        let clustered = self.clustered_sites()?;
        let mut smallest: Option<Vec<usize>> = None;
        for class in clustered.classes.values() {
            let off_axis: Vec<usize> = class
                .iter()
                .copied()
                .filter(|&i| {
                    self.molecule.atoms[i]
                        .coordinates
                        .coords
                        .cross(axis)
                        .norm()
                        > self.dist_threshold
                })
                .collect();
            if off_axis.is_empty() {
                continue;
            }
            if smallest.as_ref().map_or(true, |s| off_axis.len() < s.len()) {
                smallest = Some(off_axis);
            }
        }
        smallest.ok_or(AnalysisError::NoOffAxisAtoms)
    }

    /// Searches for a mirror plane about `axis` and classifies its type.
    ///
    /// The axis itself is first tested as the normal of a mirror plane, which
    /// gives a horizontal mirror. Otherwise the coordinate differences of
    /// same-species atom pairs with near-zero projection onto the axis are
    /// tested as plane normals; a hit is vertical when at most one rotation
    /// axis has been recorded, or when some other recorded axis lies in the
    /// plane, and diagonal otherwise.
    pub(crate) fn find_mirror(
        &self,
        axis: &Vector3<f64>,
        mut state: AnalysisState,
    ) -> (AnalysisState, Option<MirrorKind>) {
        let axis_hat = axis.normalize();

        let sigma_h = SymmetryOperation::reflection(axis);
        if self.is_valid(&sigma_h) {
            state.symmops.push(sigma_h);
            return (state, Some(MirrorKind::Horizontal));
        }

        let mut found_normal: Option<Vector3<f64>> = None;
        for (i, j) in (0..self.molecule.atoms.len()).tuple_combinations::<(usize, usize)>() {
            let (atom_i, atom_j) = (&self.molecule.atoms[i], &self.molecule.atoms[j]);
            if !atom_i.same_species(atom_j) {
                continue;
            }
            let normal = atom_i.coordinates - atom_j.coordinates;
            if normal.norm() <= self.dist_threshold {
                continue;
            }
            if normal.dot(&axis_hat).abs() >= self.dist_threshold {
                continue;
            }
            let sigma = SymmetryOperation::reflection(&normal);
            if self.is_valid(&sigma) {
                state.symmops.push(sigma);
                found_normal = Some(normal);
                break;
            }
        }
        let Some(normal) = found_normal else {
            return (state, None);
        };
        if state.rotations.len() <= 1 {
            return (state, Some(MirrorKind::Vertical));
        }
        let normal_hat = normal.normalize();
        let vertical = state.rotations.iter().any(|record| {
            let axis_other = record.axis.normalize();
            (axis_other - axis_hat).norm() >= self.dist_threshold
                && axis_other.dot(&normal_hat).abs() < self.dist_threshold
        });
        let kind = if vertical {
            MirrorKind::Vertical
        } else {
            MirrorKind::Diagonal
        };
        (state, Some(kind))
    }

    /// Resolves molecules without rotational symmetry: C1, Ci or Cs.
    pub(crate) fn proc_no_rot(
        &self,
        principal_axes: &[Vector3<f64>; 3],
        mut state: AnalysisState,
    ) -> AnalysisState {
        state.sch_symbol = "C1".to_owned();
        let inversion = SymmetryOperation::inversion();
        if self.is_valid(&inversion) {
            state.sch_symbol = "Ci".to_owned();
            state.symmops.push(inversion);
            return state;
        }
        for axis in principal_axes {
            let (new_state, mirror) = self.find_mirror(axis, state);
            state = new_state;
            if mirror.is_some() {
                state.sch_symbol = "Cs".to_owned();
                break;
            }
        }
        state
    }

    /// Resolves cyclic group molecules: Cn, Cnh, Cnv, or S2n when the only
    /// improper element is a rotoreflection.
    pub(crate) fn proc_cyclic(&self, state: AnalysisState) -> AnalysisState {
        let main = state
            .max_rotation()
            .expect("The cyclic branch requires at least one rotation record.")
            .clone();
        let (mut state, mirror) = self.find_mirror(&main.axis, state);
        state.sch_symbol = format!("C{}", main.order);
        match mirror {
            Some(MirrorKind::Horizontal) => state.sch_symbol.push('h'),
            Some(MirrorKind::Vertical) => state.sch_symbol.push('v'),
            Some(MirrorKind::Diagonal) => {
                log::debug!(
                    "Diagonal mirror found for a cyclic group; the symbol stays {}.",
                    state.sch_symbol
                );
            }
            None => {
                let rotoreflection =
                    SymmetryOperation::rotoreflection(&main.axis, 180.0 / f64::from(main.order));
                if self.is_valid(&rotoreflection) {
                    state.sch_symbol = format!("S{}", 2 * main.order);
                    state.symmops.push(rotoreflection);
                }
            }
        }
        state
    }

    /// Resolves dihedral group molecules: Dn, Dnh or Dnd.
    pub(crate) fn proc_dihedral(&self, state: AnalysisState) -> AnalysisState {
        let main = state
            .max_rotation()
            .expect("The dihedral branch requires at least one rotation record.")
            .clone();
        let (mut state, mirror) = self.find_mirror(&main.axis, state);
        state.sch_symbol = format!("D{}", main.order);
        match mirror {
            Some(MirrorKind::Horizontal) => state.sch_symbol.push('h'),
            Some(_) => state.sch_symbol.push('d'),
            None => {}
        }
        state
    }
}

/// The read-only outcome of one classification run.
#[derive(Clone, Debug)]
pub struct PointGroupDetection {
    sch_symbol: String,
    operations: Vec<SymmetryOperation>,
    rotations: Vec<RotationRecord>,
    rotational_symmetry: Option<RotationalSymmetry>,
    matrix_threshold: f64,
}

impl PointGroupDetection {
    /// The Schoenflies symbol assigned to the molecule.
    #[must_use]
    pub fn sch_symbol(&self) -> &str {
        &self.sch_symbol
    }

    /// The symmetry operations collected during the search. These generate
    /// the point group but are not closed under composition; see
    /// [`Self::to_point_group`].
    #[must_use]
    pub fn operations(&self) -> &[SymmetryOperation] {
        &self.operations
    }

    /// The rotation records collected during the search. Records from
    /// different probes may duplicate one another.
    #[must_use]
    pub fn rotations(&self) -> &[RotationRecord] {
        &self.rotations
    }

    /// The shape classification of the molecule, absent for a single-atom
    /// molecule.
    #[must_use]
    pub fn rotational_symmetry(&self) -> Option<RotationalSymmetry> {
        self.rotational_symmetry
    }

    /// Closes the collected operations under composition into an immutable
    /// [`PointGroup`] snapshot.
    #[must_use]
    pub fn to_point_group(&self) -> PointGroup {
        PointGroup::from_generators(&self.sch_symbol, &self.operations, self.matrix_threshold)
    }
}

/// Checks whether `op` is a valid symmetry operation for `molecule`, i.e.
/// whether it maps every atom onto an atom of the same species and occupancy
/// within `tol`.
#[must_use]
pub fn is_valid_op(op: &SymmetryOperation, molecule: &Molecule, tol: f64) -> bool {
    symmetry_permutation(op, molecule, tol).is_some()
}

/// The permutation of atom indices induced by `op` on `molecule`: entry `i`
/// holds the index of the atom onto which atom `i` is mapped. Returns [`None`]
/// when some atom is not mapped onto exactly one atom of its own species
/// within `tol`.
#[must_use]
pub fn symmetry_permutation(
    op: &SymmetryOperation,
    molecule: &Molecule,
    tol: f64,
) -> Option<Vec<usize>> {
    let coords: Vec<Point3<f64>> = molecule
        .atoms
        .iter()
        .map(|atom| atom.coordinates)
        .collect();
    let mut image = Vec::with_capacity(coords.len());
    for atom in &molecule.atoms {
        let mapped = op.apply(&atom.coordinates);
        let matches = geometry::find_in_coord_list(&coords, &mapped, tol);
        if matches.len() != 1 {
            return None;
        }
        let target = matches[0];
        if !molecule.atoms[target].same_species(atom) {
            return None;
        }
        image.push(target);
    }
    Some(image)
}
