use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::StructureFile;
use crate::core::models::structure::Structure;
use crate::engine::config::IcConfig;
use crate::engine::error::EngineError;
use crate::engine::internal_coords::{
    InternalCoordinate, InternalCoordinates, MIN_ATOMS, read_topology_block, write_table,
};
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, instrument, warn};

/// Summary of a completed table-insertion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcTableReport {
    /// Atoms read from the structure file (after any truncation).
    pub atoms: usize,
    /// Table entries that passed the proximity filter and were written.
    pub entries: usize,
    /// Structure lines that could not be parsed and were skipped.
    pub skipped_lines: usize,
    /// Whether the structure input was truncated at the atom capacity.
    pub truncated: bool,
    /// Lines copied verbatim from the topology companion file.
    pub topology_lines: usize,
}

/// Generates the internal-coordinate table for `structure_path` and splices
/// it, together with the topology block from `topology_path`, into
/// `target_path` in place of its terminal `END` marker.
///
/// The target is replaced atomically: everything is written to a scratch
/// file in the target's directory, which replaces the original only on full
/// success. On any error the original target is left untouched.
#[instrument(skip_all, name = "ic_table_workflow")]
pub fn run(
    structure_path: &Path,
    topology_path: &Path,
    target_path: &Path,
    config: &IcConfig,
    reporter: &ProgressReporter,
) -> Result<IcTableReport, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Reading inputs",
    });

    let format = PdbFile::with_max_atoms(config.max_atoms);
    let (structure, metadata) = format.read_from_path(structure_path)?;
    if metadata.skipped_lines > 0 {
        warn!(
            skipped = metadata.skipped_lines,
            "skipped unparseable atom records in structure input"
        );
    }
    if structure.len() < MIN_ATOMS {
        return Err(EngineError::TooFewAtoms {
            found: structure.len(),
        });
    }

    let topology = {
        let file = File::open(topology_path)?;
        read_topology_block(&mut BufReader::new(file))?
    };
    if topology.is_empty() {
        warn!("no topology block found in companion file");
    }

    reporter.report(Progress::PhaseFinish);
    reporter.report(Progress::PhaseStart {
        name: "Writing table",
    });

    let entries = InternalCoordinates::new(&structure, config.bond_cutoff);
    let written = splice_into_target(target_path, &topology, &structure, entries)?;

    reporter.report(Progress::PhaseFinish);
    info!(
        atoms = structure.len(),
        entries = written,
        "internal-coordinate table inserted"
    );

    Ok(IcTableReport {
        atoms: structure.len(),
        entries: written,
        skipped_lines: metadata.skipped_lines,
        truncated: metadata.truncated,
        topology_lines: topology.len(),
    })
}

/// Streams the spliced file: target content up to its terminal marker, the
/// topology block, the freshly generated table (whose own `END` line becomes
/// the new marker), then the remaining target content verbatim.
fn splice_into_target(
    target_path: &Path,
    topology: &[String],
    structure: &Structure,
    entries: impl IntoIterator<Item = InternalCoordinate>,
) -> Result<usize, EngineError> {
    let dir = target_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut scratch = NamedTempFile::new_in(dir)?;

    let written;
    {
        let mut writer = BufWriter::new(scratch.as_file_mut());
        let reader = BufReader::new(File::open(target_path)?);
        let mut lines = reader.lines();

        for line_res in lines.by_ref() {
            let line = line_res?;
            if line.contains("END") {
                break;
            }
            writeln!(writer, "{}", line)?;
        }

        for line in topology {
            writeln!(writer, "{}", line)?;
        }
        written = write_table(structure, entries, &mut writer)?;

        for line_res in lines {
            writeln!(writer, "{}", line_res?)?;
        }
        writer.flush()?;
    }

    scratch
        .persist(target_path)
        .map_err(|e| EngineError::Io(e.error))?;
    Ok(written)
}
