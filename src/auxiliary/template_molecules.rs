//! Generators for simple molecular geometries used across the test suites.

use std::f64::consts::PI;

use nalgebra::Point3;

use crate::auxiliary::atom::{Atom, ElementMap};
use crate::auxiliary::molecule::Molecule;

const THRESH: f64 = 1e-7;

/// Generates a planar regular ring of `n` atoms of element `symbol` with the
/// given `radius`, lying in the plane at height `z`.
#[must_use]
pub fn gen_ring(symbol: &str, n: u32, radius: f64, z: f64) -> Vec<Atom> {
    let emap = ElementMap::new();
    (0..n)
        .map(|i| {
            let theta = f64::from(i) * 2.0 * PI / f64::from(n);
            Atom::new(
                symbol,
                Point3::new(radius * theta.cos(), radius * theta.sin(), z),
                &emap,
                THRESH,
            )
        })
        .collect()
}

/// Generates a regular tetrahedron of four `symbol` atoms centred on the
/// origin, placed on alternating vertices of the cube with half-edge `scale`.
#[must_use]
pub fn gen_tetrahedron(symbol: &str, scale: f64) -> Molecule {
    let emap = ElementMap::new();
    let vertices = [
        (1.0, 1.0, 1.0),
        (1.0, -1.0, -1.0),
        (-1.0, 1.0, -1.0),
        (-1.0, -1.0, 1.0),
    ];
    let atoms: Vec<Atom> = vertices
        .iter()
        .map(|&(x, y, z)| {
            Atom::new(
                symbol,
                Point3::new(x * scale, y * scale, z * scale),
                &emap,
                THRESH,
            )
        })
        .collect();
    Molecule::from_atoms(&atoms, THRESH)
}

/// Generates a regular octahedron of six `symbol` atoms at distance `dist`
/// along the positive and negative Cartesian axes.
#[must_use]
pub fn gen_octahedron(symbol: &str, dist: f64) -> Molecule {
    let emap = ElementMap::new();
    let vertices = [
        (1.0, 0.0, 0.0),
        (-1.0, 0.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, -1.0, 0.0),
        (0.0, 0.0, 1.0),
        (0.0, 0.0, -1.0),
    ];
    let atoms: Vec<Atom> = vertices
        .iter()
        .map(|&(x, y, z)| {
            Atom::new(
                symbol,
                Point3::new(x * dist, y * dist, z * dist),
                &emap,
                THRESH,
            )
        })
        .collect();
    Molecule::from_atoms(&atoms, THRESH)
}

/// Generates a regular icosahedron of twelve `symbol` atoms centred on the
/// origin, using the cyclic permutations of $(0, \pm 1, \pm \varphi)$ scaled
/// by `scale`.
#[must_use]
pub fn gen_icosahedron(symbol: &str, scale: f64) -> Molecule {
    let emap = ElementMap::new();
    let phi = 0.5 * (1.0 + 5.0_f64.sqrt());
    let mut atoms: Vec<Atom> = vec![];
    for (a, b) in [(1.0, phi), (1.0, -phi), (-1.0, phi), (-1.0, -phi)] {
        atoms.push(Atom::new(
            symbol,
            Point3::new(0.0, a * scale, b * scale),
            &emap,
            THRESH,
        ));
        atoms.push(Atom::new(
            symbol,
            Point3::new(a * scale, b * scale, 0.0),
            &emap,
            THRESH,
        ));
        atoms.push(Atom::new(
            symbol,
            Point3::new(b * scale, 0.0, a * scale),
            &emap,
            THRESH,
        ));
    }
    Molecule::from_atoms(&atoms, THRESH)
}
