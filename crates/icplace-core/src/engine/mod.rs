//! # Engine Module
//!
//! The two numeric engines and their supporting machinery.
//!
//! ## Overview
//!
//! This layer holds the algorithmic core of the library: exhaustive
//! internal-coordinate enumeration over ordered atom quadruples, and the
//! rotation-candidate generator used by the placement retry loop. Everything
//! here is single-threaded and synchronous; long-running operations surface
//! their state through the callback-based progress reporter rather than
//! through shared state.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Engine parameters, builders, and TOML loading
//! - **Randomness** ([`rng`]) - The `Ran3` lagged-Fibonacci generator
//! - **Internal Coordinates** ([`internal_coords`]) - Quadruple enumeration and table output
//! - **Placement** ([`placement`]) - Minimum distance and rotation candidates
//! - **Progress Monitoring** ([`progress`]) - Progress reporting callbacks
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub mod error;
pub mod internal_coords;
pub mod placement;
pub mod progress;
pub mod rng;
