use crate::core::geometry::{distance, euler_rotation_matrix};
use crate::core::models::structure::Structure;
use nalgebra::Matrix3;
use rand::Rng;
use std::f64::consts::TAU;

/// Minimum Euclidean distance over every atom pair between the two clouds,
/// computed by exhaustive O(|A|*|B|) scan. Returns `None` when either cloud
/// is empty.
pub fn min_distance(a: &Structure, b: &Structure) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }

    let mut min = f64::INFINITY;
    for atom_a in a.iter() {
        for atom_b in b.iter() {
            let dist = distance(&atom_a.position, &atom_b.position);
            if dist < min {
                min = dist;
            }
        }
    }
    Some(min)
}

/// An endless stream of random rigid-body orientations of a movable cloud.
///
/// Each pulled candidate pivots the cloud about its first atom: the cloud is
/// translated so the pivot sits at the origin, rotated by three
/// independently drawn Euler angles (each uniform over [0, 2pi), composed
/// Z-Y-X), and translated back. Rotations accumulate across pulls. The
/// applied rotation matrix is yielded so callers can persist it.
///
/// Expressing candidates as an iterator leaves the retry policy to the
/// caller: pull until a constraint is satisfied, up to a bound, or not at
/// all.
pub struct RotationCandidates<'a, R: Rng> {
    movable: &'a mut Structure,
    rng: &'a mut R,
}

impl<'a, R: Rng> RotationCandidates<'a, R> {
    pub fn new(movable: &'a mut Structure, rng: &'a mut R) -> Self {
        Self { movable, rng }
    }
}

impl<R: Rng> Iterator for RotationCandidates<'_, R> {
    type Item = Matrix3<f64>;

    fn next(&mut self) -> Option<Matrix3<f64>> {
        let pivot = self.movable.position(0)?;

        let alpha = self.rng.gen_range(0.0..TAU);
        let beta = self.rng.gen_range(0.0..TAU);
        let gamma = self.rng.gen_range(0.0..TAU);
        let rotation = euler_rotation_matrix(alpha, beta, gamma);

        self.movable.translate(-pivot.coords);
        self.movable.rotate(&rotation);
        self.movable.translate(pivot.coords);

        Some(rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    fn cloud(points: &[[f64; 3]]) -> Structure {
        Structure::from_atoms(
            points
                .iter()
                .map(|p| Atom::new("C", Point3::new(p[0], p[1], p[2])))
                .collect(),
        )
    }

    #[test]
    fn min_distance_finds_the_closest_pair() {
        let a = cloud(&[[0.0, 0.0, 0.0]]);
        let b = cloud(&[[1.0, 0.0, 0.0], [10.0, 10.0, 10.0]]);
        assert_eq!(min_distance(&a, &b), Some(1.0));
    }

    #[test]
    fn min_distance_of_empty_cloud_is_none() {
        let a = cloud(&[[0.0, 0.0, 0.0]]);
        let empty = Structure::new();
        assert_eq!(min_distance(&a, &empty), None);
        assert_eq!(min_distance(&empty, &a), None);
    }

    #[test]
    fn candidates_of_empty_cloud_yield_nothing() {
        let mut movable = Structure::new();
        let mut rng = StepRng::new(0, 0);
        assert!(RotationCandidates::new(&mut movable, &mut rng)
            .next()
            .is_none());
    }

    #[test]
    fn zeroed_generator_draws_zero_angles_and_leaves_the_cloud_in_place() {
        // Angle draws are an injected dependency: a mock generator pinned at
        // zero must produce the identity rotation.
        let mut movable = cloud(&[[5.0, 5.0, 5.0], [6.0, 5.0, 5.0]]);
        let original = movable.clone();
        let mut rng = StepRng::new(0, 0);

        let rotation = RotationCandidates::new(&mut movable, &mut rng)
            .next()
            .unwrap();

        assert!((rotation - Matrix3::identity()).norm() < 1e-12);
        for (a, b) in movable.iter().zip(original.iter()) {
            assert!((a.position - b.position).norm() < 1e-12);
        }
    }

    #[test]
    fn candidate_rotation_keeps_the_pivot_fixed() {
        let mut movable = cloud(&[[3.0, -2.0, 7.0], [4.0, -2.0, 7.0], [3.0, 0.0, 9.0]]);
        let pivot = movable.position(0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for rotation in RotationCandidates::new(&mut movable, &mut rng).take(5) {
            assert!((rotation.determinant() - 1.0).abs() < 1e-9);
        }
        assert!((movable.position(0).unwrap() - pivot).norm() < 1e-9);
    }

    #[test]
    fn candidate_rotation_preserves_internal_distances() {
        let mut movable = cloud(&[[1.0, 2.0, 3.0], [2.0, 2.0, 3.0], [1.0, 4.0, 0.0]]);
        let before: Vec<Point3<f64>> = movable.iter().map(|a| a.position).collect();
        let mut rng = StdRng::seed_from_u64(7);

        RotationCandidates::new(&mut movable, &mut rng).next().unwrap();

        for i in 0..before.len() {
            for j in (i + 1)..before.len() {
                let original = (before[i] - before[j]).norm();
                let rotated =
                    (movable.position(i).unwrap() - movable.position(j).unwrap()).norm();
                assert!((original - rotated).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn applying_the_transpose_restores_the_original_coordinates() {
        let mut movable = cloud(&[[0.0, 1.0, 2.0], [3.0, 4.0, 5.0], [-1.0, -2.0, -3.0]]);
        let original = movable.clone();
        let mut rng = StdRng::seed_from_u64(1234);

        let rotation = RotationCandidates::new(&mut movable, &mut rng)
            .next()
            .unwrap();

        // Rotation matrices are orthonormal, so the transpose inverts the
        // rotation about the same pivot.
        let pivot = movable.position(0).unwrap();
        movable.translate(-pivot.coords);
        movable.rotate(&rotation.transpose());
        movable.translate(pivot.coords);

        for (restored, first) in movable.iter().zip(original.iter()) {
            assert!((restored.position - first.position).norm() < 1e-6);
        }
    }
}
