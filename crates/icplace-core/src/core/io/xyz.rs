use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Default atom capacity for point-cloud reads.
pub const DEFAULT_MAX_ATOMS: usize = 399_999;

/// Metadata preserved across a point-cloud rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XyzMetadata {
    /// The free-text comment from the second header line.
    pub comment: String,
}

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Missing atom-count header line")]
    MissingAtomCount,
    #[error("Invalid atom count '{value}'")]
    InvalidAtomCount { value: String },
    #[error("Declared atom count {declared} exceeds the capacity limit {limit}")]
    CapacityExceeded { declared: usize, limit: usize },
    #[error("File ended after {found} of {expected} atom records")]
    UnexpectedEof { expected: usize, found: usize },
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("Invalid float format (value: '{value}')")]
    InvalidFloat { value: String },
    #[error("Atom record requires a label and three coordinates")]
    MissingField,
}

/// The point-cloud format: an atom-count line, a free-text comment line,
/// then one `label x y z` record per atom.
///
/// The declared count governs how many records are read; trailing content is
/// ignored. Unlike the structure format, reads are strict: a malformed or
/// missing record aborts with an error, and a declared count above the
/// capacity limit is rejected before any atom is read.
#[derive(Debug, Clone, Copy)]
pub struct XyzFile {
    /// Maximum declared atom count accepted by reads.
    pub max_atoms: usize,
}

impl Default for XyzFile {
    fn default() -> Self {
        Self {
            max_atoms: DEFAULT_MAX_ATOMS,
        }
    }
}

impl XyzFile {
    pub fn with_max_atoms(max_atoms: usize) -> Self {
        Self { max_atoms }
    }

    fn parse_atom_line(line: &str, line_num: usize) -> Result<Atom, XyzError> {
        let mut fields = line.split_whitespace();
        let label = fields.next().ok_or(XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::MissingField,
        })?;

        let mut coord = || -> Result<f64, XyzError> {
            let field = fields.next().ok_or(XyzError::Parse {
                line: line_num,
                kind: XyzParseErrorKind::MissingField,
            })?;
            field.parse().map_err(|_| XyzError::Parse {
                line: line_num,
                kind: XyzParseErrorKind::InvalidFloat {
                    value: field.to_string(),
                },
            })
        };

        let x = coord()?;
        let y = coord()?;
        let z = coord()?;
        Ok(Atom::new(label, Point3::new(x, y, z)))
    }
}

impl StructureFile for XyzFile {
    type Metadata = XyzMetadata;
    type Error = XyzError;

    fn read_from(
        &self,
        reader: &mut impl BufRead,
    ) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut lines = reader.lines();

        let count_line = lines.next().ok_or(XyzError::MissingAtomCount)??;
        let declared: usize =
            count_line
                .trim()
                .parse()
                .map_err(|_| XyzError::InvalidAtomCount {
                    value: count_line.trim().to_string(),
                })?;
        if declared > self.max_atoms {
            return Err(XyzError::CapacityExceeded {
                declared,
                limit: self.max_atoms,
            });
        }

        let comment = lines
            .next()
            .transpose()?
            .ok_or(XyzError::UnexpectedEof {
                expected: declared,
                found: 0,
            })?;

        let mut structure = Structure::new();
        for i in 0..declared {
            let line = lines
                .next()
                .transpose()?
                .ok_or(XyzError::UnexpectedEof {
                    expected: declared,
                    found: i,
                })?;
            structure.push(Self::parse_atom_line(&line, i + 3)?);
        }

        Ok((structure, XyzMetadata { comment }))
    }

    fn write_to(
        &self,
        structure: &Structure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(writer, "{}", structure.len())?;
        writeln!(writer, "{}", metadata.comment)?;
        for atom in structure.iter() {
            writeln!(
                writer,
                "{:<2} {:>14.6} {:>14.6} {:>14.6}",
                atom.name, atom.position.x, atom.position.y, atom.position.z
            )?;
        }
        Ok(())
    }
}
