//! Commutator synthesis for NxN cubes: 3-cycle move sequences that relocate
//! blocks of stickers between faces while restoring everything else, plus
//! the greedy block searches solvers drive it with.

pub mod engine;
pub mod search;

use cube_core::{Color, FaceId};
use cube_geometry::{Block, GeometryError};
use thiserror::Error;

pub use engine::{CommutatorEngine, CommutatorPlan};
pub use search::{RankedBlock, find_unsolved_target_regions, largest_block};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommutatorError {
    /// Recoverable: no translation exists for the requested face pair. The
    /// solver should pick a different source or target.
    #[error("No commutator between source {source:?} and target {target:?}")]
    UnsupportedFacePair { source: FaceId, target: FaceId },
    /// Recoverable: a block does not line up with the natural source
    /// material, dimensionally or by rotation. The solver should fall back
    /// to single-cell moves.
    #[error("Block {actual:?} does not match the shape of {expected:?}")]
    ShapeMismatch { expected: Block, actual: Block },
    /// A logic defect in the geometry model or its inputs; aborts the solve
    /// step rather than being retried.
    #[error("Geometry inconsistency: {0}")]
    GeometryInconsistency(GeometryError),
    /// Routine search miss: no rotation of the source face puts material of
    /// the wanted color on the natural source cells.
    #[error("No {color:?} material on {source:?} feeds the target block on {target:?}")]
    NoValidSource {
        source: FaceId,
        target: FaceId,
        color: Color,
    },
}

impl From<GeometryError> for CommutatorError {
    fn from(error: GeometryError) -> CommutatorError {
        match error {
            GeometryError::UnsupportedFacePair { a, b } => CommutatorError::UnsupportedFacePair {
                source: b,
                target: a,
            },
            inconsistency @ GeometryError::RotationInconsistency { .. } => {
                CommutatorError::GeometryInconsistency(inconsistency)
            }
        }
    }
}
