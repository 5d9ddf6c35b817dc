//! Face/color scheme model and the BOY validity check.
//!
//! The canonical reference scheme is white up, yellow down, green front,
//! blue back, orange left, red fixed-centre right. A scheme is valid iff it
//! is a whole-cube reorientation of the reference; the 24 reorientations are
//! computed once and membership-tested, which accepts every cyclic ring
//! rotation and rejects every mirrored layout.

use crate::{Axis, Color, FaceId};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemeError {
    #[error("Scheme is not a bijection: color {0:?} appears more than once")]
    DuplicateColor(Color),
    #[error("Scheme is not a bijection: face {0:?} is assigned twice")]
    DuplicateFace(FaceId),
}

/// A bijective assignment of the six colors to the six faces.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FaceColorScheme {
    colors: [Color; 6],
}

/// All 24 whole-cube orientations of the canonical scheme, generated by
/// closing over the three axis rotations.
static ORIENTATIONS: LazyLock<Vec<FaceColorScheme>> = LazyLock::new(|| {
    let mut found = vec![FaceColorScheme::canonical()];
    let mut frontier = found.clone();
    while let Some(scheme) = frontier.pop() {
        for axis in Axis::ALL {
            let rotated = scheme.rotated(axis);
            if !found.contains(&rotated) {
                found.push(rotated);
                frontier.push(rotated);
            }
        }
    }
    debug_assert_eq!(found.len(), 24);
    found
});

impl FaceColorScheme {
    #[must_use]
    pub fn canonical() -> FaceColorScheme {
        FaceColorScheme {
            // Indexed by FaceId: U, D, F, B, L, R.
            colors: [
                Color::White,
                Color::Yellow,
                Color::Green,
                Color::Blue,
                Color::Orange,
                Color::Red,
            ],
        }
    }

    /// Build a scheme from explicit per-face assignments.
    ///
    /// # Errors
    ///
    /// If the assignment is not a bijection.
    pub fn from_assignments(assignments: [(FaceId, Color); 6]) -> Result<FaceColorScheme, SchemeError> {
        let mut colors = [None; 6];
        for (face, color) in assignments {
            if colors.iter().flatten().any(|&c| c == color) {
                return Err(SchemeError::DuplicateColor(color));
            }
            if colors[face.index()].is_some() {
                return Err(SchemeError::DuplicateFace(face));
            }
            colors[face.index()] = Some(color);
        }
        // Six distinct faces and colors over six slots: every slot is filled.
        Ok(FaceColorScheme {
            colors: colors.map(|c| c.expect("bijection fills every face")),
        })
    }

    #[must_use]
    pub fn color_of(&self, face: FaceId) -> Color {
        self.colors[face.index()]
    }

    #[must_use]
    pub fn face_of(&self, color: Color) -> FaceId {
        FaceId::ALL
            .into_iter()
            .find(|&face| self.color_of(face) == color)
            .expect("scheme is a bijection over all six colors")
    }

    /// The color opposite `color` in this scheme.
    #[must_use]
    pub fn opposite_color(&self, color: Color) -> Color {
        self.color_of(self.face_of(color).opposite())
    }

    /// This scheme as seen after one positive whole-cube quarter turn about
    /// `axis`: each ring face takes the color of its predecessor.
    #[must_use]
    pub fn rotated(&self, axis: Axis) -> FaceColorScheme {
        let ring = axis.ring();
        let mut colors = self.colors;
        for (i, &face) in ring.iter().enumerate() {
            let next = ring[(i + 1) % 4];
            colors[next.index()] = self.colors[face.index()];
        }
        FaceColorScheme { colors }
    }

    /// Whether this scheme is a reorientation of the canonical reference
    /// (the "BOY" condition). Mirrored layouts fail.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        ORIENTATIONS.contains(self)
    }
}
