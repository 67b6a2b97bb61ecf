use nalgebra::Point3;
use ordered_float::OrderedFloat;

use crate::auxiliary::atom::{Atom, ElementMap};
use crate::auxiliary::molecule::Molecule;
use crate::auxiliary::template_molecules;
use crate::symmetry::point_group::cluster::{cluster_sites, SiteClass};
use crate::symmetry::point_group::AnalysisError;

#[test]
fn test_cluster_sites_two_shells_with_origin() {
    let emap = ElementMap::new();
    let mut atoms = vec![Atom::new("N", Point3::new(0.001, 0.0, 0.0), &emap, 1e-7)];
    atoms.extend(template_molecules::gen_ring("H", 3, 1.0, 0.0));
    atoms.push(Atom::new("O", Point3::new(2.5, 0.0, 0.0), &emap, 1e-7));
    atoms.push(Atom::new("O", Point3::new(-2.5, 0.0, 0.0), &emap, 1e-7));
    let mol = Molecule::from_atoms(&atoms, 1e-7);

    let clustered = cluster_sites(&mol, 0.3).unwrap();
    assert_eq!(clustered.origin_atom, Some(0));
    assert_eq!(clustered.classes.len(), 2);
    let sizes: Vec<usize> = clustered.classes.values().map(Vec::len).collect();
    assert_eq!(sizes, vec![3, 2]);
    assert_eq!(clustered.smallest_class().map(Vec::len), Some(2));
}

#[test]
fn test_cluster_sites_species_split_same_shell() {
    // Atoms of two species sharing one distance shell form two classes.
    let emap = ElementMap::new();
    let atoms = [
        Atom::new("H", Point3::new(1.0, 0.0, 0.0), &emap, 1e-7),
        Atom::new("H", Point3::new(-1.0, 0.0, 0.0), &emap, 1e-7),
        Atom::new("O", Point3::new(0.0, 1.0, 0.0), &emap, 1e-7),
        Atom::new("O", Point3::new(0.0, -1.0, 0.0), &emap, 1e-7),
    ];
    let mol = Molecule::from_atoms(&atoms, 1e-7);

    let clustered = cluster_sites(&mol, 0.3).unwrap();
    assert!(clustered.origin_atom.is_none());
    assert_eq!(clustered.classes.len(), 2);
    let h_class = SiteClass {
        distance: OrderedFloat(1.0),
        atomic_number: 1,
    };
    assert_eq!(clustered.classes[&h_class], vec![0, 1]);
}

#[test]
fn test_cluster_sites_merges_numerical_noise() {
    // Distances 0.995, 1.0 and 1.005 belong to one shell well within the
    // tolerance.
    let emap = ElementMap::new();
    let atoms = [
        Atom::new("H", Point3::new(1.0, 0.0, 0.0), &emap, 1e-7),
        Atom::new("H", Point3::new(0.0, 1.005, 0.0), &emap, 1e-7),
        Atom::new("H", Point3::new(0.0, 0.0, 0.995), &emap, 1e-7),
    ];
    let mol = Molecule::from_atoms(&atoms, 1e-7);

    let clustered = cluster_sites(&mol, 0.3).unwrap();
    assert_eq!(clustered.classes.len(), 1);
    assert_eq!(clustered.smallest_class().map(Vec::len), Some(3));
}

#[test]
fn test_cluster_sites_coincident_origin_atoms() {
    let emap = ElementMap::new();
    let mut atoms = template_molecules::gen_ring("H", 4, 1.0, 0.0);
    atoms.push(Atom::new("N", Point3::new(0.005, 0.0, 0.0), &emap, 1e-7));
    atoms.push(Atom::new("N", Point3::new(-0.005, 0.0, 0.0), &emap, 1e-7));
    let mol = Molecule::from_atoms(&atoms, 1e-7);

    assert!(matches!(
        cluster_sites(&mol, 0.3),
        Err(AnalysisError::CoincidentOriginAtoms { .. })
    ));
}
