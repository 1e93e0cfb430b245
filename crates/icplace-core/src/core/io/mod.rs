//! Provides input/output functionality for the supported structure formats.
//!
//! Two formats are implemented behind a unified trait-based interface: the
//! positional-column structure format consumed by the internal-coordinate
//! engine ([`pdb`]), and the count-plus-comment point-cloud format consumed
//! by the placement engine ([`xyz`]). The two formats deliberately differ in
//! their failure policy: structure reads skip unparseable atom lines and
//! truncate at capacity, while point-cloud reads are strict and abort.

pub mod pdb;
pub mod traits;
pub mod xyz;
