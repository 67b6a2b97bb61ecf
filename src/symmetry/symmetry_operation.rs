use std::fmt;

use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};
use serde::{Deserialize, Serialize};

use crate::auxiliary::geometry;

#[cfg(test)]
#[path = "symmetry_operation_tests.rs"]
mod symmetry_operation_tests;

/// An affine symmetry operation over homogeneous coordinates.
///
/// Operations are immutable once constructed. Two operations are considered
/// equivalent when their affine matrices agree entry-wise within a tolerance;
/// see [`Self::approx_eq`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SymmetryOperation {
    /// The $4 \times 4$ affine matrix of this operation.
    affine_matrix: Matrix4<f64>,
}

impl SymmetryOperation {
    /// Wraps a raw $4 \times 4$ affine matrix.
    #[must_use]
    pub fn new(affine_matrix: Matrix4<f64>) -> Self {
        Self { affine_matrix }
    }

    fn from_linear(linear: Matrix3<f64>) -> Self {
        let mut affine_matrix = Matrix4::identity();
        affine_matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(&linear);
        Self { affine_matrix }
    }

    /// The identity operation.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            affine_matrix: Matrix4::identity(),
        }
    }

    /// Inversion through the origin.
    #[must_use]
    pub fn inversion() -> Self {
        Self::from_linear(-Matrix3::identity())
    }

    /// Reflection through the plane through the origin with the given normal.
    ///
    /// # Arguments
    ///
    /// * `normal` - The normal of the mirror plane; need not be normalised.
    #[must_use]
    pub fn reflection(normal: &Vector3<f64>) -> Self {
        Self::from_linear(geometry::reflection_matrix(normal))
    }

    /// Rotation through `angle` degrees about the axis through `origin` along
    /// `axis`.
    ///
    /// # Arguments
    ///
    /// * `origin` - A point on the axis of rotation.
    /// * `axis` - The direction of the axis of rotation; need not be
    ///     normalised.
    /// * `angle` - The angle of rotation in degrees.
    #[must_use]
    pub fn from_origin_axis_angle(origin: &Point3<f64>, axis: &Vector3<f64>, angle: f64) -> Self {
        let rotation = geometry::proper_rotation_matrix(angle.to_radians(), axis);
        let translation = origin.coords - rotation * origin.coords;
        let mut affine_matrix = Matrix4::identity();
        affine_matrix
            .fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&rotation);
        affine_matrix
            .fixed_view_mut::<3, 1>(0, 3)
            .copy_from(&translation);
        Self { affine_matrix }
    }

    /// Rotoreflection: rotation through `angle` degrees about `axis` followed
    /// by reflection through the plane perpendicular to it, both through the
    /// origin.
    ///
    /// # Arguments
    ///
    /// * `axis` - The axis of the improper rotation; need not be normalised.
    /// * `angle` - The angle of rotation in degrees.
    #[must_use]
    pub fn rotoreflection(axis: &Vector3<f64>, angle: f64) -> Self {
        Self::from_linear(geometry::improper_rotation_matrix(angle.to_radians(), axis))
    }

    /// The affine matrix of this operation.
    #[must_use]
    pub fn affine_matrix(&self) -> &Matrix4<f64> {
        &self.affine_matrix
    }

    /// Applies this operation to a point.
    #[must_use]
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        let mapped = self.affine_matrix * Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(mapped.x, mapped.y, mapped.z)
    }

    /// The composition of this operation with `other`: the resulting operation
    /// applies `other` first and this operation second.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            affine_matrix: self.affine_matrix * other.affine_matrix,
        }
    }

    /// Checks whether the affine matrices of the two operations agree
    /// entry-wise within `tol`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        approx::abs_diff_eq!(self.affine_matrix, other.affine_matrix, epsilon = tol)
    }
}

impl fmt::Display for SymmetryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.affine_matrix)
    }
}
