//! Rotational symmetry based on moments of inertia.

use std::fmt;

use nalgebra::{Matrix3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::auxiliary::molecule::Molecule;

#[cfg(test)]
#[path = "rotsym_tests.rs"]
mod rotsym_tests;

/// Enumerated type to classify the types of rotational symmetry of a molecular
/// system based on the eigenvalues of its normalised inertia tensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationalSymmetry {
    /// One principal moment of inertia vanishes; the molecule is linear.
    Linear,
    /// All three principal moments of inertia are mutually distinct.
    AsymmetricTop,
    /// Exactly two principal moments of inertia are equal; the axis belonging
    /// to the remaining moment is the unique principal axis.
    SymmetricTop,
    /// All three principal moments of inertia are equal.
    SphericalTop,
}

impl fmt::Display for RotationalSymmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationalSymmetry::Linear => write!(f, "Linear"),
            RotationalSymmetry::AsymmetricTop => write!(f, "Asymmetric top"),
            RotationalSymmetry::SymmetricTop => write!(f, "Symmetric top"),
            RotationalSymmetry::SphericalTop => write!(f, "Spherical top"),
        }
    }
}

/// Computes the inertia tensor of a centred molecule, normalised by the total
/// moment $\sum_i m_i \lVert \boldsymbol{r}_i \rVert^2$ so that its
/// eigenvalues do not scale with the size of the system. This permits a single
/// comparison threshold across molecules.
///
/// # Arguments
///
/// * `molecule` - A molecule with its centre of mass at the origin.
///
/// # Returns
///
/// The normalised inertia tensor as a $3 \times 3$ matrix.
#[must_use]
pub fn normalised_inertia_tensor(molecule: &Molecule) -> Matrix3<f64> {
    let origin = Point3::origin();
    let inertia_tensor = molecule.calc_inertia_tensor(&origin);
    let total_inertia: f64 = molecule
        .atoms
        .iter()
        .map(|atom| atom.atomic_mass * (atom.coordinates - origin).norm_squared())
        .sum();
    inertia_tensor / total_inertia
}

/// Determines the rotational symmetry given the eigenvalues of the normalised
/// inertia tensor.
///
/// # Arguments
///
/// * `moments` - The three eigenvalues of the normalised inertia tensor.
/// * `thresh` - A threshold for comparing moments of inertia.
///
/// # Returns
///
/// The rotational symmetry as one of the [`RotationalSymmetry`] variants.
#[must_use]
pub fn calc_rotational_symmetry(moments: &Vector3<f64>, thresh: f64) -> RotationalSymmetry {
    let (v1, v2, v3) = (moments[0], moments[1], moments[2]);
    if (v1 * v2 * v3).abs() < thresh.powi(3) {
        return RotationalSymmetry::Linear;
    }
    if (v1 - v2).abs() < thresh && (v1 - v3).abs() < thresh {
        return RotationalSymmetry::SphericalTop;
    }
    if (v1 - v2).abs() > thresh && (v1 - v3).abs() > thresh && (v2 - v3).abs() > thresh {
        return RotationalSymmetry::AsymmetricTop;
    }
    RotationalSymmetry::SymmetricTop
}
