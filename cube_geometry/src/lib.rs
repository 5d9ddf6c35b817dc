//! Face-to-face coordinate geometry for NxN cubes: the static adjacency
//! model, the coordinate translator, and rectangular block geometry.
//!
//! Everything here is a pure function of the face orientation conventions
//! fixed in `cube_core`; no cube state is consulted.

pub mod adjacency;
pub mod block;
pub mod translate;

use cube_core::{Axis, FaceId, Point};
use thiserror::Error;

pub use adjacency::{EdgeSide, SharedEdge, connecting_axes, shared_axis, shared_edge};
pub use block::Block;
pub use cube_core::Rotation;
pub use translate::{Translation, natural_source_point, required_face_rotation, translate};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// Recoverable: the caller asked about a face pair with no translation
    /// (currently only the degenerate same-face pair).
    #[error("No translation is defined between {a:?} and {b:?}")]
    UnsupportedFacePair { a: FaceId, b: FaceId },
    /// A programming-logic defect, not a runtime condition: both quarter-turn
    /// directions of a supposedly valid block self-intersect. Carries the
    /// full offending coordinates for diagnosis.
    #[error(
        "Block {start:?}..{end:?} on {face:?} self-intersects under both quarter turns \
         along {axis:?} (grid size {n})"
    )]
    RotationInconsistency {
        face: FaceId,
        axis: Axis,
        start: Point,
        end: Point,
        n: i32,
    },
}
