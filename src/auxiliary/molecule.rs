use std::fs;

use nalgebra::{Matrix3, Point3, Vector3};
use thiserror::Error;

use crate::auxiliary::atom::{Atom, ElementMap};

#[cfg(test)]
#[path = "molecule_tests.rs"]
mod molecule_tests;

/// Errors arising when constructing a [`Molecule`] from external input.
#[derive(Debug, Error)]
pub enum MoleculeError {
    /// The input file could not be read.
    #[error("unable to read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The input file is not valid `xyz` content.
    #[error("malformed xyz content in `{path}`: {reason}")]
    Xyz { path: String, reason: String },
}

/// A struct containing the atoms constituting a molecule.
#[derive(Clone, Debug)]
pub struct Molecule {
    /// The atoms constituting this molecule.
    pub atoms: Vec<Atom>,

    /// A threshold for approximate equality comparisons.
    pub threshold: f64,
}

impl Molecule {
    /// Constructs a molecule from a slice of atoms.
    #[must_use]
    pub fn from_atoms(atoms: &[Atom], thresh: f64) -> Molecule {
        Molecule {
            atoms: atoms.to_vec(),
            threshold: thresh,
        }
    }

    /// Parses an `xyz` file to construct a molecule.
    ///
    /// # Arguments
    ///
    /// * `filename` - The `xyz` file to be parsed.
    /// * `thresh` - A threshold for approximate equality comparisons.
    ///
    /// # Returns
    ///
    /// The parsed [`Molecule`], or a [`MoleculeError`] when the file cannot be
    /// read or its content is not valid `xyz`.
    pub fn from_xyz(filename: &str, thresh: f64) -> Result<Molecule, MoleculeError> {
        let contents = fs::read_to_string(filename).map_err(|err| MoleculeError::Io {
            path: filename.to_owned(),
            source: err,
        })?;

        let xyz_error = |reason: String| MoleculeError::Xyz {
            path: filename.to_owned(),
            reason,
        };

        let mut lines = contents.lines();
        let n_atoms = lines
            .next()
            .ok_or_else(|| xyz_error("missing atom-count line".to_owned()))?
            .trim()
            .parse::<usize>()
            .map_err(|_| xyz_error("invalid atom-count line".to_owned()))?;
        let _ = lines.next();

        let emap = ElementMap::new();
        let mut atoms: Vec<Atom> = Vec::with_capacity(n_atoms);
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let atom = Atom::from_xyz(line, &emap, thresh)
                .ok_or_else(|| xyz_error(format!("invalid atom line `{line}`")))?;
            atoms.push(atom);
        }
        if atoms.len() != n_atoms {
            return Err(xyz_error(format!(
                "expected {} atoms, found {}",
                n_atoms,
                atoms.len()
            )));
        }
        Ok(Molecule {
            atoms,
            threshold: thresh,
        })
    }

    /// Calculates the centre of mass of the molecule.
    ///
    /// # Returns
    ///
    /// The centre of mass.
    #[must_use]
    pub fn calc_com(&self) -> Point3<f64> {
        let mut com: Point3<f64> = Point3::origin();
        let mut tot_m: f64 = 0.0;
        for atom in &self.atoms {
            let m = atom.atomic_mass;
            com += atom.coordinates.coords * m;
            tot_m += m;
        }
        com *= 1.0 / tot_m;
        com
    }

    /// Calculates the inertia tensor of the molecule.
    ///
    /// # Arguments
    ///
    /// * `origin` - An origin about which the inertia tensor is evaluated.
    ///
    /// # Returns
    ///
    /// The inertia tensor as a $3 \times 3$ matrix.
    #[must_use]
    pub fn calc_inertia_tensor(&self, origin: &Point3<f64>) -> Matrix3<f64> {
        let mut inertia_tensor = Matrix3::zeros();
        for atom in &self.atoms {
            let rel_coordinates: Vector3<f64> = atom.coordinates - origin;
            for i in 0..3 {
                for j in 0..=i {
                    if i == j {
                        inertia_tensor[(i, j)] += atom.atomic_mass
                            * (rel_coordinates.norm_squared()
                                - rel_coordinates[i] * rel_coordinates[j]);
                    } else {
                        inertia_tensor[(i, j)] -=
                            atom.atomic_mass * rel_coordinates[i] * rel_coordinates[j];
                        inertia_tensor[(j, i)] -=
                            atom.atomic_mass * rel_coordinates[j] * rel_coordinates[i];
                    }
                }
            }
        }
        inertia_tensor
    }

    /// Translates in-place so that the centre of mass lies at the origin.
    pub fn recentre_mut(&mut self) {
        let com = self.calc_com();
        for atom in &mut self.atoms {
            atom.coordinates -= com.coords;
        }
    }

    /// Clones and recentres to put the centre of mass at the origin.
    ///
    /// # Returns
    ///
    /// A recentred copy.
    #[must_use]
    pub fn recentre(&self) -> Molecule {
        let mut recentred_mol = self.clone();
        recentred_mol.recentre_mut();
        recentred_mol
    }
}
