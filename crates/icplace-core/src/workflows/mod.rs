//! # Workflows Module
//!
//! High-level, file-to-file entry points tying the engine and core layers
//! together.
//!
//! ## Overview
//!
//! Workflows are the top-level API of the library. Each one handles input
//! parsing, engine execution, progress reporting, and output persistence,
//! and returns a small report of what was done.
//!
//! - **Internal-Coordinate Table** ([`ic_table`]) - Generates the filtered
//!   table for a structure and splices it, with a topology block, into a
//!   target file atomically.
//! - **Placement** ([`place`]) - The rotation retry loop: checks the
//!   minimum inter-cloud distance and re-orients the movable cloud until the
//!   threshold is satisfied, persisting each applied rotation.

pub mod ic_table;
pub mod place;
