//! Geometric primitives shared by the symmetry operators and the search
//! routines.

use nalgebra::{ClosedMul, Matrix3, Point3, Rotation3, Scalar, UnitVector3, Vector3};

/// Computes the outer product between two three-dimensional vectors.
///
/// # Arguments
///
/// * `vec1` - The first vector, $\boldsymbol{v}_1$.
/// * `vec2` - The second vector, $\boldsymbol{v}_2$.
///
/// # Returns
///
/// The outer product $\boldsymbol{v}_1 \otimes \boldsymbol{v}_2$.
fn outer<T: Scalar + ClosedMul + Copy>(vec1: &Vector3<T>, vec2: &Vector3<T>) -> Matrix3<T> {
    let outer_product_iter: Vec<T> = vec2
        .iter()
        .flat_map(|&item_x| vec1.iter().map(move |&item_y| item_x * item_y))
        .collect();
    Matrix3::from_iterator(outer_product_iter)
}

/// Returns a $3 \times 3$ rotation matrix in $\mathbb{R}^3$ corresponding to a
/// rotation through `angle` about `axis`.
///
/// # Arguments
///
/// * `angle` - The angle of rotation in radians.
/// * `axis` - The axis of rotation; need not be normalised.
///
/// # Returns
///
/// The rotation matrix.
#[must_use]
pub fn proper_rotation_matrix(angle: f64, axis: &Vector3<f64>) -> Matrix3<f64> {
    let normalised_axis = UnitVector3::new_normalize(*axis);
    Rotation3::from_axis_angle(&normalised_axis, angle).into_inner()
}

/// Returns the $3 \times 3$ Householder matrix reflecting through the plane
/// through the origin with the given normal.
///
/// # Arguments
///
/// * `normal` - The normal of the mirror plane; need not be normalised.
///
/// # Returns
///
/// The reflection matrix.
#[must_use]
pub fn reflection_matrix(normal: &Vector3<f64>) -> Matrix3<f64> {
    let normalised_normal = UnitVector3::new_normalize(*normal).into_inner();
    Matrix3::identity() - 2.0 * outer(&normalised_normal, &normalised_normal)
}

/// Returns a $3 \times 3$ transformation matrix in $\mathbb{R}^3$ corresponding
/// to an improper rotation through `angle` about `axis` in the mirror-plane
/// convention: a rotation followed by a reflection through the plane
/// perpendicular to the rotation axis.
///
/// # Arguments
///
/// * `angle` - The angle of rotation in radians.
/// * `axis` - The axis of rotation; need not be normalised.
///
/// # Returns
///
/// The transformation matrix.
#[must_use]
pub fn improper_rotation_matrix(angle: f64, axis: &Vector3<f64>) -> Matrix3<f64> {
    reflection_matrix(axis) * proper_rotation_matrix(angle, axis)
}

/// Returns the indices of all entries of `coords` lying within `tol` of
/// `point`.
#[must_use]
pub fn find_in_coord_list(coords: &[Point3<f64>], point: &Point3<f64>, tol: f64) -> Vec<usize> {
    coords
        .iter()
        .enumerate()
        .filter_map(|(i, coord)| ((coord - point).norm() < tol).then_some(i))
        .collect()
}
