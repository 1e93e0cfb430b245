use crate::core::io::{pdb, xyz};
use crate::engine::rng;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Bond-length cutoff applied to both the (i,j) and (k,l) pairs of an
/// internal-coordinate quadruple, in Angstroms.
pub const DEFAULT_BOND_CUTOFF: f64 = 2.0;

/// Minimum inter-cloud distance accepted by the placement loop, in Angstroms.
pub const DEFAULT_THRESHOLD: f64 = 0.50;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Parameters for the internal-coordinate table workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct IcConfig {
    /// Keep a quadruple only when both bracketing bond lengths are at or
    /// below this cutoff.
    pub bond_cutoff: f64,
    /// Structure reads truncate deterministically at this many atoms.
    pub max_atoms: usize,
}

impl Default for IcConfig {
    fn default() -> Self {
        Self {
            bond_cutoff: DEFAULT_BOND_CUTOFF,
            max_atoms: pdb::DEFAULT_MAX_ATOMS,
        }
    }
}

impl IcConfig {
    pub fn with_bond_cutoff(mut self, cutoff: f64) -> Self {
        self.bond_cutoff = cutoff;
        self
    }

    pub fn with_max_atoms(mut self, max_atoms: usize) -> Self {
        self.max_atoms = max_atoms;
        self
    }
}

/// Parameters for the placement workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementConfig {
    /// The placement is accepted once the minimum inter-cloud distance
    /// strictly exceeds this threshold.
    pub threshold: f64,
    /// Seed for the default `Ran3` generator.
    pub seed: i32,
    /// Optional safety bound on the number of rotations. `None` retains the
    /// legacy behavior of retrying indefinitely.
    pub max_rotations: Option<usize>,
    /// Point-cloud reads reject inputs declaring more atoms than this.
    pub max_atoms: usize,
    /// When set, the movable cloud's untouched coordinates are written here
    /// before the retry loop starts.
    pub backup_path: Option<PathBuf>,
}

#[derive(Default)]
pub struct PlacementConfigBuilder {
    threshold: Option<f64>,
    seed: Option<i32>,
    max_rotations: Option<usize>,
    max_atoms: Option<usize>,
    backup_path: Option<PathBuf>,
}

impl PlacementConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the builder from a parsed config file. Values set through the
    /// builder afterwards take precedence.
    pub fn from_file(file: PlacementConfigFile) -> Self {
        Self {
            threshold: file.threshold,
            seed: file.seed,
            max_rotations: file.max_rotations,
            max_atoms: file.max_atoms,
            backup_path: file.backup_path,
        }
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn seed(mut self, seed: i32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn max_rotations(mut self, cap: usize) -> Self {
        self.max_rotations = Some(cap);
        self
    }

    pub fn max_atoms(mut self, max_atoms: usize) -> Self {
        self.max_atoms = Some(max_atoms);
        self
    }

    pub fn backup_path(mut self, path: PathBuf) -> Self {
        self.backup_path = Some(path);
        self
    }

    pub fn build(self) -> Result<PlacementConfig, ConfigError> {
        Ok(PlacementConfig {
            threshold: self
                .threshold
                .ok_or(ConfigError::MissingParameter("threshold"))?,
            seed: self.seed.unwrap_or(rng::DEFAULT_SEED),
            max_rotations: self.max_rotations,
            max_atoms: self.max_atoms.unwrap_or(xyz::DEFAULT_MAX_ATOMS),
            backup_path: self.backup_path,
        })
    }
}

/// The TOML representation of a placement configuration file.
///
/// Every field is optional; command-line flags override file values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacementConfigFile {
    pub threshold: Option<f64>,
    pub seed: Option<i32>,
    pub max_rotations: Option<usize>,
    pub max_atoms: Option<usize>,
    pub backup_path: Option<PathBuf>,
}

impl PlacementConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigLoadError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
