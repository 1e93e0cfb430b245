//! # Core Models Module
//!
//! Data structures representing molecular structures as ordered point clouds.
//!
//! ## Overview
//!
//! The models here are deliberately minimal: an atom is a label plus a 3D
//! position, and a structure is an ordered sequence of atoms. No bonding
//! graph, residue grouping, or chain organization is tracked; atom identity
//! is its position in the sequence plus its label. That ordering is
//! semantically significant: it defines the combinatorial indices used by
//! internal-coordinate enumeration, and it defines the "first atom" used as
//! the rotation pivot during placement.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom representation: label and coordinates
//! - [`structure`] - Ordered atom sequence with rigid-body transform operations

pub mod atom;
pub mod structure;
