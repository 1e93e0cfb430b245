use crate::core::io::pdb::PdbError;
use crate::core::io::xyz::XyzError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Structure file error: {source}")]
    Structure {
        #[from]
        source: PdbError,
    },

    #[error("Point-cloud file error: {source}")]
    PointCloud {
        #[from]
        source: XyzError,
    },

    #[error("Structure has {found} atoms, but internal-coordinate enumeration requires at least 4")]
    TooFewAtoms { found: usize },

    #[error("Cannot compute distances against the {which} cloud: it has no atoms")]
    EmptyCloud { which: &'static str },

    #[error("Placement did not satisfy the distance threshold after {iterations} rotations")]
    Convergence { iterations: usize },
}
