//! # molsym
//!
//! Point-group detection for molecules: given a set of atomic coordinates and
//! species, determine the Schoenflies symbol of the molecular point group and
//! the symmetry operations that generate it, then close the generating set
//! under composition to obtain the full group.
//!
//! The classification proceeds from the eigenvalues of the normalised inertia
//! tensor: linear, asymmetric-top, symmetric-top and spherical-top molecules
//! are dispatched to shape-specific searches for rotation axes, mirror planes
//! and an inversion centre.
//!
//! ```no_run
//! use molsym::auxiliary::molecule::Molecule;
//! use molsym::symmetry::point_group::PointGroupAnalyzer;
//!
//! let mol = Molecule::from_xyz("h2o.xyz", 1e-7)?;
//! let analyzer = PointGroupAnalyzer::builder()
//!     .molecule(&mol, true)
//!     .build()?;
//! let point_group = analyzer.get_point_group()?;
//! assert_eq!(point_group.sch_symbol(), "C2v");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod auxiliary;
pub mod group;
pub mod rotsym;
pub mod symmetry;
