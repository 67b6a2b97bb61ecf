//! Clustering of atoms into classes of symmetry-equivalent sites.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::auxiliary::molecule::Molecule;

use super::AnalysisError;

#[cfg(test)]
#[path = "cluster_tests.rs"]
mod cluster_tests;

/// A class of symmetry-equivalent sites: a representative distance from the
/// origin paired with a species.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SiteClass {
    /// The mean distance from the origin of the atoms in the class.
    pub distance: OrderedFloat<f64>,

    /// The atomic number shared by the atoms in the class.
    pub atomic_number: u32,
}

/// The outcome of clustering the sites of a molecule by distance from the
/// origin and species.
#[derive(Clone, Debug)]
pub struct ClusteredSites {
    /// The index of the (at most one) atom lying at the origin.
    pub origin_atom: Option<usize>,

    /// Atom indices grouped by (representative distance, species), in order
    /// of increasing distance.
    pub classes: IndexMap<SiteClass, Vec<usize>>,
}

impl ClusteredSites {
    /// The smallest non-origin class, if any.
    #[must_use]
    pub fn smallest_class(&self) -> Option<&Vec<usize>> {
        self.classes.values().min_by_key(|class| class.len())
    }
}

/// Groups the atoms of a centred molecule into equivalence classes by
/// (distance from origin, species).
///
/// The one-dimensional distance values are clustered by single linkage: the
/// sorted distances are split wherever a consecutive gap exceeds `tol`, so
/// floating-point noise does not split one shell into several. Atoms of one
/// distance shell are then subdivided by species.
///
/// # Errors
///
/// [`AnalysisError::CoincidentOriginAtoms`] when more than one atom lies
/// within `tol` of the origin; such a molecule is malformed.
pub fn cluster_sites(molecule: &Molecule, tol: f64) -> Result<ClusteredSites, AnalysisError> {
    let dists: Vec<f64> = molecule
        .atoms
        .iter()
        .map(|atom| atom.coordinates.coords.norm())
        .collect();
    let mut order: Vec<usize> = (0..dists.len()).collect();
    order.sort_by(|&i, &j| {
        dists[i]
            .partial_cmp(&dists[j])
            .expect("Atomic distances must be comparable.")
    });

    let mut shells: Vec<Vec<usize>> = vec![];
    let mut prev_dist = f64::NEG_INFINITY;
    for idx in order {
        if dists[idx] - prev_dist > tol {
            shells.push(vec![]);
        }
        shells
            .last_mut()
            .expect("A shell has just been started.")
            .push(idx);
        prev_dist = dists[idx];
    }

    let mut origin_atom: Option<usize> = None;
    let mut classes: IndexMap<SiteClass, Vec<usize>> = IndexMap::new();
    for shell in shells {
        let mean_dist = shell.iter().map(|&i| dists[i]).sum::<f64>() / shell.len() as f64;
        if mean_dist < tol {
            if shell.len() > 1 {
                return Err(AnalysisError::CoincidentOriginAtoms { tolerance: tol });
            }
            origin_atom = Some(shell[0]);
        } else {
            for &i in &shell {
                let key = SiteClass {
                    distance: OrderedFloat(mean_dist),
                    atomic_number: molecule.atoms[i].atomic_number,
                };
                classes.entry(key).or_default().push(i);
            }
        }
    }
    Ok(ClusteredSites {
        origin_atom,
        classes,
    })
}
