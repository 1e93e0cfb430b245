use crate::cli::PlaceArgs;
use crate::error::Result;
use crate::progress::CliProgressHandler;
use icplace::engine::config::{DEFAULT_THRESHOLD, PlacementConfigBuilder, PlacementConfigFile};
use icplace::engine::progress::ProgressReporter;
use icplace::engine::rng::Ran3;
use icplace::workflows::place;
use tracing::info;

pub fn run(args: PlaceArgs) -> Result<()> {
    let file = match &args.config {
        Some(path) => PlacementConfigFile::load(path)?,
        None => PlacementConfigFile::default(),
    };
    let file_has_threshold = file.threshold.is_some();

    let mut builder = PlacementConfigBuilder::from_file(file);
    match args.threshold {
        Some(threshold) => builder = builder.threshold(threshold),
        None if !file_has_threshold => builder = builder.threshold(DEFAULT_THRESHOLD),
        None => {}
    }
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    if let Some(cap) = args.max_rotations {
        builder = builder.max_rotations(cap);
    }
    if let Some(max_atoms) = args.max_atoms {
        builder = builder.max_atoms(max_atoms);
    }
    if let Some(backup) = &args.backup {
        builder = builder.backup_path(backup.clone());
    }
    let config = builder.build()?;

    info!(
        threshold = config.threshold,
        seed = config.seed,
        max_rotations = ?config.max_rotations,
        "running placement"
    );

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());
    let mut rng = Ran3::new(config.seed);
    let report = place::run(
        &args.fixed,
        &args.movable,
        &args.matrix,
        &config,
        &mut rng,
        &reporter,
    )?;
    handler.finish();

    if report.rotations == 0 {
        println!(
            "Placement accepted as-is (min distance {:.3} > {:.3}); no rotation applied",
            report.min_distance, config.threshold
        );
    } else {
        println!(
            "Placement accepted after {} rotation(s); min distance {:.3}, matrix written to {}",
            report.rotations,
            report.min_distance,
            args.matrix.display()
        );
    }
    Ok(())
}
