use crate::core::geometry::homogeneous;
use crate::core::io::traits::StructureFile;
use crate::core::io::xyz::XyzFile;
use crate::engine::config::PlacementConfig;
use crate::engine::error::EngineError;
use crate::engine::placement::{RotationCandidates, min_distance};
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::Matrix3;
use rand::Rng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Summary of a completed placement run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementReport {
    /// Number of rotations applied before the threshold was satisfied.
    pub rotations: usize,
    /// The accepted minimum inter-cloud distance.
    pub min_distance: f64,
}

/// Runs the placement retry loop over two point-cloud files.
///
/// Each pass computes the minimum distance between the fixed and movable
/// clouds. Once it strictly exceeds the configured threshold the current
/// configuration is accepted and the loop stops. Otherwise the movable cloud
/// is re-oriented by the next random candidate, and both the applied
/// rotation matrix (as a homogeneous 4x4) and the rewritten cloud file are
/// persisted before the distance is checked again.
///
/// Acceptance happens before any rotation is drawn, so a run whose first
/// distance check already passes performs zero rotations and never creates
/// the matrix file. Without a configured rotation cap the loop retains the
/// legacy behavior of retrying indefinitely.
#[instrument(skip_all, name = "placement_workflow")]
pub fn run<R: Rng>(
    fixed_path: &Path,
    movable_path: &Path,
    matrix_path: &Path,
    config: &PlacementConfig,
    rng: &mut R,
    reporter: &ProgressReporter,
) -> Result<PlacementReport, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Reading clouds",
    });

    let format = XyzFile::with_max_atoms(config.max_atoms);
    let (fixed, _) = format.read_from_path(fixed_path)?;
    let (mut movable, metadata) = format.read_from_path(movable_path)?;

    if let Some(backup_path) = &config.backup_path {
        format.write_to_path(&movable, &metadata, backup_path)?;
        debug!(path = %backup_path.display(), "wrote initial-coordinates backup");
    }

    reporter.report(Progress::PhaseFinish);
    reporter.report(Progress::PhaseStart { name: "Placing" });

    let mut rotations = 0usize;
    loop {
        let min = min_distance(&fixed, &movable).ok_or(EngineError::EmptyCloud {
            which: if fixed.is_empty() { "fixed" } else { "movable" },
        })?;
        debug!(min_distance = min, rotations, "distance check");
        reporter.report(Progress::Attempt {
            rotations: rotations as u64,
            min_distance: min,
        });

        if min > config.threshold {
            reporter.report(Progress::PhaseFinish);
            info!(
                rotations,
                min_distance = min,
                "minimum distance exceeds threshold, placement accepted"
            );
            return Ok(PlacementReport {
                rotations,
                min_distance: min,
            });
        }

        if let Some(cap) = config.max_rotations {
            if rotations >= cap {
                return Err(EngineError::Convergence {
                    iterations: rotations,
                });
            }
        }

        let rotation = RotationCandidates::new(&mut movable, rng)
            .next()
            .ok_or(EngineError::EmptyCloud { which: "movable" })?;

        write_matrix(matrix_path, &rotation)?;
        format.write_to_path(&movable, &metadata, movable_path)?;
        rotations += 1;
    }
}

/// Persists the rotation as a homogeneous 4x4 transform, four rows of four
/// space-separated values.
fn write_matrix(path: &Path, rotation: &Matrix3<f64>) -> Result<(), EngineError> {
    let transform = homogeneous(rotation);
    let mut writer = BufWriter::new(File::create(path)?);
    for row in 0..4 {
        writeln!(
            writer,
            "{} {} {} {}",
            transform[(row, 0)],
            transform[(row, 1)],
            transform[(row, 2)],
            transform[(row, 3)]
        )?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::PlacementConfigBuilder;
    use crate::engine::rng::Ran3;
    use rand::rngs::mock::StepRng;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_cloud(path: &Path, atoms: &[[f64; 3]]) {
        let mut content = format!("{}\ngenerated for testing\n", atoms.len());
        for p in atoms {
            content.push_str(&format!("C {} {} {}\n", p[0], p[1], p[2]));
        }
        fs::write(path, content).unwrap();
    }

    fn paths(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
        (
            dir.join("capsid.xyz"),
            dir.join("drug.xyz"),
            dir.join("rotation_matrix.txt"),
        )
    }

    #[test]
    fn satisfied_threshold_accepts_without_rotating_or_writing() {
        let dir = tempdir().unwrap();
        let (fixed, movable, matrix) = paths(dir.path());
        write_cloud(&fixed, &[[0.0, 0.0, 0.0]]);
        write_cloud(&movable, &[[10.0, 0.0, 0.0], [11.0, 0.0, 0.0]]);
        let before = fs::read_to_string(&movable).unwrap();

        let config = PlacementConfigBuilder::new().threshold(0.5).build().unwrap();
        let mut rng = StepRng::new(0, 0);
        let report = run(
            &fixed,
            &movable,
            &matrix,
            &config,
            &mut rng,
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(report.rotations, 0);
        assert!((report.min_distance - 10.0).abs() < 1e-9);
        assert!(!matrix.exists());
        assert_eq!(fs::read_to_string(&movable).unwrap(), before);
    }

    #[test]
    fn rejected_candidates_rotate_until_the_threshold_is_met() {
        let dir = tempdir().unwrap();
        let (fixed, movable, matrix) = paths(dir.path());
        write_cloud(&fixed, &[[0.0, 0.0, 0.0]]);
        // The pivot sits 10 units out; the second atom starts inside the
        // threshold and must be rotated away from the fixed cloud.
        write_cloud(&movable, &[[10.0, 0.0, 0.0], [9.0, 0.0, 0.0]]);

        let config = PlacementConfigBuilder::new()
            .threshold(9.5)
            .max_rotations(1000)
            .build()
            .unwrap();
        let mut rng = Ran3::new(config.seed);
        let report = run(
            &fixed,
            &movable,
            &matrix,
            &config,
            &mut rng,
            &ProgressReporter::new(),
        )
        .unwrap();

        assert!(report.rotations >= 1);
        assert!(report.min_distance > 9.5);

        // The matrix file holds the last applied rotation in homogeneous form.
        let matrix_text = fs::read_to_string(&matrix).unwrap();
        let rows: Vec<Vec<f64>> = matrix_text
            .lines()
            .map(|l| l.split_whitespace().map(|v| v.parse().unwrap()).collect())
            .collect();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.len() == 4));
        assert_eq!(rows[3], vec![0.0, 0.0, 0.0, 1.0]);

        // The movable file was rewritten in the same format, pivot unmoved.
        let rewritten = fs::read_to_string(&movable).unwrap();
        let mut lines = rewritten.lines();
        assert_eq!(lines.next().unwrap(), "2");
        assert_eq!(lines.next().unwrap(), "generated for testing");
        let pivot_line = lines.next().unwrap();
        let fields: Vec<f64> = pivot_line
            .split_whitespace()
            .skip(1)
            .map(|v| v.parse().unwrap())
            .collect();
        assert!((fields[0] - 10.0).abs() < 1e-6);
        assert!(fields[1].abs() < 1e-6);
        assert!(fields[2].abs() < 1e-6);
    }

    #[test]
    fn rotation_cap_reports_a_convergence_error() {
        let dir = tempdir().unwrap();
        let (fixed, movable, matrix) = paths(dir.path());
        // The pivot coincides with the fixed atom, so the minimum distance
        // is zero forever: rotations about the pivot cannot move it.
        write_cloud(&fixed, &[[0.0, 0.0, 0.0]]);
        write_cloud(&movable, &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);

        let config = PlacementConfigBuilder::new()
            .threshold(0.5)
            .max_rotations(3)
            .build()
            .unwrap();
        let mut rng = Ran3::new(config.seed);
        let result = run(
            &fixed,
            &movable,
            &matrix,
            &config,
            &mut rng,
            &ProgressReporter::new(),
        );

        assert!(matches!(
            result,
            Err(EngineError::Convergence { iterations: 3 })
        ));
    }

    #[test]
    fn empty_fixed_cloud_is_rejected() {
        let dir = tempdir().unwrap();
        let (fixed, movable, matrix) = paths(dir.path());
        write_cloud(&fixed, &[]);
        write_cloud(&movable, &[[1.0, 0.0, 0.0]]);

        let config = PlacementConfigBuilder::new().threshold(0.5).build().unwrap();
        let mut rng = StepRng::new(0, 0);
        let result = run(
            &fixed,
            &movable,
            &matrix,
            &config,
            &mut rng,
            &ProgressReporter::new(),
        );

        assert!(matches!(
            result,
            Err(EngineError::EmptyCloud { which: "fixed" })
        ));
    }

    #[test]
    fn missing_input_aborts_with_an_io_error() {
        let dir = tempdir().unwrap();
        let (fixed, movable, matrix) = paths(dir.path());
        write_cloud(&movable, &[[1.0, 0.0, 0.0]]);

        let config = PlacementConfigBuilder::new().threshold(0.5).build().unwrap();
        let mut rng = StepRng::new(0, 0);
        let result = run(
            &fixed,
            &movable,
            &matrix,
            &config,
            &mut rng,
            &ProgressReporter::new(),
        );

        assert!(matches!(result, Err(EngineError::PointCloud { .. })));
        assert!(!matrix.exists());
    }

    #[test]
    fn backup_path_receives_the_untouched_coordinates() {
        let dir = tempdir().unwrap();
        let (fixed, movable, matrix) = paths(dir.path());
        let backup = dir.path().join("initial_coordinates.xyz");
        write_cloud(&fixed, &[[0.0, 0.0, 0.0]]);
        write_cloud(&movable, &[[10.0, 0.0, 0.0]]);

        let config = PlacementConfigBuilder::new()
            .threshold(0.5)
            .backup_path(backup.clone())
            .build()
            .unwrap();
        let mut rng = StepRng::new(0, 0);
        run(
            &fixed,
            &movable,
            &matrix,
            &config,
            &mut rng,
            &ProgressReporter::new(),
        )
        .unwrap();

        let content = fs::read_to_string(&backup).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), "1");
        assert_eq!(lines.next().unwrap(), "generated for testing");
        assert!(lines.next().unwrap().starts_with("C "));
    }
}
