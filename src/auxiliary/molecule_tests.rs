use approx;
use nalgebra::{Point3, Vector3};

use crate::auxiliary::atom::{Atom, ElementMap};
use crate::auxiliary::molecule::Molecule;

fn gen_ho_molecule() -> Molecule {
    let emap = ElementMap::new();
    let atoms = [
        Atom::new("O", Point3::new(0.0, 0.0, 0.0), &emap, 1e-7),
        Atom::new("H", Point3::new(0.0, 0.0, 1.0), &emap, 1e-7),
    ];
    Molecule::from_atoms(&atoms, 1e-7)
}

#[test]
fn test_molecule_calc_com() {
    let mol = gen_ho_molecule();
    let com = mol.calc_com();
    let m_o = mol.atoms[0].atomic_mass;
    let m_h = mol.atoms[1].atomic_mass;
    approx::assert_relative_eq!(com[0], 0.0);
    approx::assert_relative_eq!(com[1], 0.0);
    approx::assert_relative_eq!(com[2], m_h / (m_o + m_h), epsilon = 1e-12);
}

#[test]
fn test_molecule_recentre() {
    let mol = gen_ho_molecule().recentre();
    let com = mol.calc_com();
    approx::assert_abs_diff_eq!(com, Point3::origin(), epsilon = 1e-12);
}

#[test]
fn test_molecule_inertia_tensor_diatomic() {
    // Two unit masses at z = ±1: I_xx = I_yy = 2, I_zz = 0, off-diagonals vanish.
    let emap = ElementMap::new();
    let atoms = [
        Atom::new("H", Point3::new(0.0, 0.0, 1.0), &emap, 1e-7),
        Atom::new("H", Point3::new(0.0, 0.0, -1.0), &emap, 1e-7),
    ];
    let mol = Molecule::from_atoms(&atoms, 1e-7);
    let inertia = mol.calc_inertia_tensor(&Point3::origin());
    let m_h = atoms[0].atomic_mass;
    approx::assert_relative_eq!(inertia[(0, 0)], 2.0 * m_h, epsilon = 1e-12);
    approx::assert_relative_eq!(inertia[(1, 1)], 2.0 * m_h, epsilon = 1e-12);
    approx::assert_abs_diff_eq!(inertia[(2, 2)], 0.0, epsilon = 1e-12);
    approx::assert_abs_diff_eq!(inertia[(0, 1)], 0.0, epsilon = 1e-12);
    approx::assert_abs_diff_eq!(inertia[(0, 2)], 0.0, epsilon = 1e-12);
    approx::assert_abs_diff_eq!(inertia[(1, 2)], 0.0, epsilon = 1e-12);
}

#[test]
fn test_molecule_inertia_tensor_off_diagonal() {
    // A single unit mass at (1, 1, 0) couples x and y.
    let emap = ElementMap::new();
    let atoms = [Atom::new("H", Point3::new(1.0, 1.0, 0.0), &emap, 1e-7)];
    let mol = Molecule::from_atoms(&atoms, 1e-7);
    let inertia = mol.calc_inertia_tensor(&Point3::origin());
    let m_h = atoms[0].atomic_mass;
    approx::assert_relative_eq!(inertia[(0, 1)], -m_h, epsilon = 1e-12);
    approx::assert_relative_eq!(inertia[(1, 0)], -m_h, epsilon = 1e-12);
    approx::assert_relative_eq!(inertia[(2, 2)], 2.0 * m_h, epsilon = 1e-12);
}

#[test]
fn test_molecule_from_xyz() {
    let path = std::env::temp_dir().join("molsym_test_h2.xyz");
    std::fs::write(&path, "2\nhydrogen molecule\nH 0.0 0.0 0.35\nH 0.0 0.0 -0.35\n")
        .expect("Unable to write the test xyz file.");
    let mol = Molecule::from_xyz(path.to_str().expect("Invalid path."), 1e-7)
        .expect("Unable to parse the test xyz file.");
    assert_eq!(mol.atoms.len(), 2);
    assert_eq!(mol.atoms[0].atomic_symbol, "H");
    approx::assert_relative_eq!(
        mol.atoms[1].coordinates - Point3::origin(),
        Vector3::new(0.0, 0.0, -0.35)
    );
}

#[test]
fn test_molecule_from_xyz_malformed() {
    let path = std::env::temp_dir().join("molsym_test_bad.xyz");
    std::fs::write(&path, "3\ntruncated\nH 0.0 0.0 0.35\n").expect("Unable to write the test file.");
    assert!(Molecule::from_xyz(path.to_str().expect("Invalid path."), 1e-7).is_err());
}
