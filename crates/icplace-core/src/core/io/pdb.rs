use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::warn;

/// Default atom capacity for structure reads.
pub const DEFAULT_MAX_ATOMS: usize = 1000;

/// Read-side bookkeeping for a structure parse.
///
/// Unparseable atom records are skipped rather than treated as fatal; the
/// skip count and the truncation flag let callers report what happened
/// without failing the read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdbMetadata {
    /// Number of atom-tagged lines that could not be parsed and were skipped.
    pub skipped_lines: usize,
    /// Set when the input held more atom records than the configured
    /// capacity; parsing stopped deterministically at the cap.
    pub truncated: bool,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// The positional-column structure format.
///
/// A line is an atom record when columns 1-6 hold one of the two recognized
/// tags (`ATOM`, `HETATM`). The atom label occupies columns 13-16 and the
/// three coordinates are the first whitespace-separated floats starting at
/// column 31. All other lines are ignored.
#[derive(Debug, Clone, Copy)]
pub struct PdbFile {
    /// Maximum number of atoms to read before truncating.
    pub max_atoms: usize,
}

impl Default for PdbFile {
    fn default() -> Self {
        Self {
            max_atoms: DEFAULT_MAX_ATOMS,
        }
    }
}

impl PdbFile {
    pub fn with_max_atoms(max_atoms: usize) -> Self {
        Self { max_atoms }
    }

    fn parse_atom_line(line: &str) -> Option<Atom> {
        let name = slice_and_trim(line, 12, 16);
        if name.is_empty() {
            return None;
        }

        let mut fields = line.get(30..)?.split_whitespace();
        let x: f64 = fields.next()?.parse().ok()?;
        let y: f64 = fields.next()?.parse().ok()?;
        let z: f64 = fields.next()?.parse().ok()?;

        Some(Atom::new(name, Point3::new(x, y, z)))
    }
}

impl StructureFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(
        &self,
        reader: &mut impl BufRead,
    ) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut structure = Structure::new();
        let mut metadata = PdbMetadata::default();

        for line_res in reader.lines() {
            let line = line_res?;

            let record_type = slice_and_trim(&line, 0, 6);
            if record_type != "ATOM" && record_type != "HETATM" {
                continue;
            }

            if structure.len() >= self.max_atoms {
                warn!(
                    max_atoms = self.max_atoms,
                    "atom capacity reached, truncating structure input"
                );
                metadata.truncated = true;
                break;
            }

            match Self::parse_atom_line(&line) {
                Some(atom) => structure.push(atom),
                None => metadata.skipped_lines += 1,
            }
        }

        Ok((structure, metadata))
    }

    fn write_to(
        &self,
        structure: &Structure,
        _metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        for (index, atom) in structure.iter().enumerate() {
            writeln!(
                writer,
                "ATOM  {:>5} {:<4}{:>22.3}{:>8.3}{:>8.3}",
                index + 1,
                atom.name,
                atom.position.x,
                atom.position.y,
                atom.position.z
            )?;
        }
        writeln!(writer, "END")?;
        Ok(())
    }
}
