use nalgebra::{Matrix3, Matrix4, Point3};

pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (b - a).norm()
}

/// Angle at vertex `b` between the rays b->a and b->c, in degrees.
///
/// Callers must guarantee both rays have non-zero length. The acos argument
/// is clamped to [-1, 1] to tolerate floating-point overshoot.
pub fn angle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    let u = a - b;
    let v = c - b;
    let cos = (u.dot(&v) / (u.norm() * v.norm())).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Dihedral angle over the four points, in degrees.
///
/// Computed from the two plane normals n1 = (a-b) x (c-b) and
/// n2 = (b-c) x (d-c). Degenerate configurations (either normal or their
/// cross product has zero magnitude) return exactly 0.0.
///
/// Sign convention: the sign is taken from dot(n1, b-c); a positive dot
/// product maps to negative degrees. This does NOT match the IUPAC torsion
/// convention. It is preserved from the legacy table generator because
/// downstream topology files depend on the existing sign behavior.
pub fn dihedral(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, d: &Point3<f64>) -> f64 {
    let n1 = (a - b).cross(&(c - b));
    let bc = b - c;
    let n2 = bc.cross(&(d - c));
    let cross = n1.cross(&n2);

    let m1 = n1.norm();
    let m2 = n2.norm();
    if m1 == 0.0 || m2 == 0.0 || cross.norm() == 0.0 {
        return 0.0;
    }

    let cos = (n1.dot(&n2) / (m1 * m2)).clamp(-1.0, 1.0);
    let phi = cos.acos().to_degrees();

    if n1.dot(&bc) <= 0.0 { phi } else { -phi }
}

/// Rotation matrix for intrinsic Z-Y-X Euler angles (gamma about z, then
/// beta about y, then alpha about x), all in radians.
pub fn euler_rotation_matrix(alpha: f64, beta: f64, gamma: f64) -> Matrix3<f64> {
    let (sa, ca) = alpha.sin_cos();
    let (sb, cb) = beta.sin_cos();
    let (sg, cg) = gamma.sin_cos();

    Matrix3::new(
        cb * cg,
        cb * sg,
        -sb,
        sa * sb * cg - ca * sg,
        sa * sb * sg + ca * cg,
        sa * cb,
        ca * sb * cg + sa * sg,
        ca * sb * sg - sa * cg,
        ca * cb,
    )
}

pub fn apply_rotation(matrix: &Matrix3<f64>, point: &Point3<f64>) -> Point3<f64> {
    Point3::from(matrix * point.coords)
}

/// Embeds a 3x3 rotation into a homogeneous 4x4 transform with zero
/// translation, the form persisted to rotation-matrix files.
pub fn homogeneous(matrix: &Matrix3<f64>) -> Matrix4<f64> {
    matrix.to_homogeneous()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn distance_of_3_4_triangle_is_5() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 0.0);
        assert!((distance(&a, &b) - 5.0).abs() < TOL);
    }

    #[test]
    fn angle_of_perpendicular_rays_is_90() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let b = Point3::new(0.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        assert!((angle(&a, &b, &c) - 90.0).abs() < TOL);
    }

    #[test]
    fn angle_clamps_acos_argument_for_collinear_rays() {
        let a = Point3::new(2.0, 0.0, 0.0);
        let b = Point3::new(0.0, 0.0, 0.0);
        let c = Point3::new(1.0, 0.0, 0.0);
        assert!((angle(&a, &b, &c) - 0.0).abs() < TOL);

        let d = Point3::new(-1.0, 0.0, 0.0);
        assert!((angle(&a, &b, &d) - 180.0).abs() < TOL);
    }

    #[test]
    fn dihedral_golden_case_matches_sign_convention() {
        // Hard-coded golden value for the legacy signDot convention:
        // signDot == 0 here, which takes the non-negated branch.
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(1.0, 1.0, 0.0);
        let d = Point3::new(1.0, 1.0, 1.0);
        assert!((dihedral(&a, &b, &c, &d) - 90.0).abs() < TOL);
    }

    #[test]
    fn dihedral_of_oblique_quadruple_is_135() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(1.0, 1.0, 0.0);
        let d = Point3::new(2.0, 1.0, 1.0);
        assert!((dihedral(&a, &b, &c, &d) - 135.0).abs() < TOL);
    }

    #[test]
    fn dihedral_of_collinear_atoms_is_zero() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(2.0, 0.0, 0.0);
        let d = Point3::new(3.0, 0.0, 0.0);
        assert_eq!(dihedral(&a, &b, &c, &d), 0.0);
    }

    #[test]
    fn dihedral_of_parallel_planes_is_zero() {
        // Both normals are well-defined but parallel, so their cross product
        // vanishes and the degenerate branch applies.
        let a = Point3::new(0.0, 1.0, 0.0);
        let b = Point3::new(0.0, 0.0, 0.0);
        let c = Point3::new(1.0, 0.0, 0.0);
        let d = Point3::new(1.0, 1.0, 0.0);
        assert_eq!(dihedral(&a, &b, &c, &d), 0.0);
    }

    #[test]
    fn euler_matrix_with_zero_angles_is_identity() {
        let m = euler_rotation_matrix(0.0, 0.0, 0.0);
        assert!((m - Matrix3::identity()).norm() < TOL);
    }

    #[test]
    fn euler_matrix_is_orthonormal() {
        let m = euler_rotation_matrix(0.3, -1.2, 2.5);
        assert!((m * m.transpose() - Matrix3::identity()).norm() < TOL);
        assert!((m.determinant() - 1.0).abs() < TOL);
    }

    #[test]
    fn apply_rotation_matches_matrix_product() {
        let m = euler_rotation_matrix(0.5, 0.25, -0.75);
        let p = Point3::new(1.0, -2.0, 3.0);
        let rotated = apply_rotation(&m, &p);
        assert!((rotated.coords - m * p.coords).norm() < TOL);
    }

    #[test]
    fn homogeneous_embedding_has_identity_fourth_row_and_column() {
        let m = euler_rotation_matrix(1.0, 2.0, 3.0);
        let h = homogeneous(&m);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(h[(i, j)], m[(i, j)]);
            }
            assert_eq!(h[(3, i)], 0.0);
            assert_eq!(h[(i, 3)], 0.0);
        }
        assert_eq!(h[(3, 3)], 1.0);
    }
}
