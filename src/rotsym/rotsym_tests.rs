use nalgebra::Point3;

use crate::auxiliary::atom::{Atom, ElementMap};
use crate::auxiliary::molecule::Molecule;
use crate::auxiliary::template_molecules;
use crate::rotsym::{self, RotationalSymmetry};

fn classify(mol: &Molecule, thresh: f64) -> RotationalSymmetry {
    let inertia = rotsym::normalised_inertia_tensor(&mol.recentre());
    let moments = inertia.symmetric_eigen().eigenvalues;
    rotsym::calc_rotational_symmetry(&moments, thresh)
}

#[test]
fn test_rotsym_linear() {
    let emap = ElementMap::new();
    let atoms = [
        Atom::new("N", Point3::new(0.0, 0.0, 0.55), &emap, 1e-7),
        Atom::new("N", Point3::new(0.0, 0.0, -0.55), &emap, 1e-7),
    ];
    let mol = Molecule::from_atoms(&atoms, 1e-7);
    assert_eq!(classify(&mol, 1e-2), RotationalSymmetry::Linear);
}

#[test]
fn test_rotsym_spherical() {
    let mol = template_molecules::gen_tetrahedron("H", 1.0);
    assert_eq!(classify(&mol, 1e-2), RotationalSymmetry::SphericalTop);
}

#[test]
fn test_rotsym_symmetric() {
    // A planar regular ring has two equal in-plane moments and a distinct
    // out-of-plane one.
    let ring = template_molecules::gen_ring("C", 6, 1.4, 0.0);
    let mol = Molecule::from_atoms(&ring, 1e-7);
    assert_eq!(classify(&mol, 1e-2), RotationalSymmetry::SymmetricTop);
}

#[test]
fn test_rotsym_asymmetric() {
    let emap = ElementMap::new();
    let atoms = [
        Atom::new("O", Point3::new(0.0, 0.0, 0.1173), &emap, 1e-7),
        Atom::new("H", Point3::new(0.0, 0.7572, -0.4696), &emap, 1e-7),
        Atom::new("H", Point3::new(0.0, -0.7572, -0.4696), &emap, 1e-7),
    ];
    let mol = Molecule::from_atoms(&atoms, 1e-7);
    assert_eq!(classify(&mol, 1e-2), RotationalSymmetry::AsymmetricTop);
}
