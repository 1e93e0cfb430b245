//! # icplace Core Library
//!
//! A library for generating CHARMM-style internal-coordinate tables and for
//! random rigid-body placement of molecular structures under a
//! minimum-distance constraint.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Structure`),
//!   pure geometric computations (`distance`, `angle`, `dihedral`, rotation
//!   matrices), and I/O for the supported structure file formats.
//!
//! - **[`engine`]: The Logic Core.** Contains the two numeric engines (the
//!   internal-coordinate enumerator and the rotation-candidate generator)
//!   together with their configuration, the `Ran3` random number generator,
//!   and progress reporting.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing
//!   layer. It ties the `engine` and `core` together to execute the complete
//!   file-to-file operations: internal-coordinate table insertion and the
//!   placement retry loop.

pub mod core;
pub mod engine;
pub mod workflows;
