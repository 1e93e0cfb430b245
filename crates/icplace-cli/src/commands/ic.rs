use crate::cli::IcArgs;
use crate::error::Result;
use crate::progress::CliProgressHandler;
use icplace::engine::config::IcConfig;
use icplace::engine::progress::ProgressReporter;
use icplace::workflows::ic_table;
use tracing::{info, warn};

pub fn run(args: IcArgs) -> Result<()> {
    let mut config = IcConfig::default();
    if let Some(cutoff) = args.cutoff {
        config = config.with_bond_cutoff(cutoff);
    }
    if let Some(max_atoms) = args.max_atoms {
        config = config.with_max_atoms(max_atoms);
    }
    info!(
        cutoff = config.bond_cutoff,
        max_atoms = config.max_atoms,
        "running internal-coordinate table generation"
    );

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());
    let report = ic_table::run(
        &args.structure,
        &args.topology,
        &args.target,
        &config,
        &reporter,
    )?;
    handler.finish();

    if report.truncated {
        warn!(
            max_atoms = config.max_atoms,
            "structure input was truncated at the atom capacity"
        );
    }
    if report.skipped_lines > 0 {
        warn!(
            skipped = report.skipped_lines,
            "unparseable atom records were skipped"
        );
    }

    println!(
        "Inserted {} internal-coordinate entries ({} atoms, {} topology lines) into {}",
        report.entries,
        report.atoms,
        report.topology_lines,
        args.target.display()
    );
    Ok(())
}
