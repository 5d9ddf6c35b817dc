//! Fundamental value types for NxN cube manipulation: faces, axes, colors,
//! face-local points, the quarter-turn rotation group, the move/algorithm
//! model, and the facelet cube state the rest of the workspace executes
//! against.
//!
//! Coordinate conventions (fixed, never mutated at runtime):
//!
//! - Every face is an `n`×`n` grid of centre stickers, `n` being the number of
//!   inner slice layers (physical edge length minus two). Row 0 is the top of
//!   the face as seen from outside the cube, column 0 the left.
//! - Face orientations: U is viewed with B at the top; D with F at the top;
//!   F, L and R with U at the top; B with U at the top and R to the left.
//!   Consequently column 0 of U, D and F borders L, column 0 of B borders R,
//!   column 0 of L borders B and column 0 of R borders F.
//! - Axis X points through R, Y through U, Z through F. A positive quarter
//!   turn about an axis is clockwise as seen from the axis's positive end,
//!   so it agrees with the R, U and F face turns respectively.

pub mod moves;
pub mod rotation;
pub mod scheme;
pub mod state;

use thiserror::Error;

pub use moves::{Algorithm, LayerRange, Move};
pub use rotation::Rotation;
pub use scheme::FaceColorScheme;
pub use state::{FaceletCube, MarkerTag};

/// One of the six sticker colors. Identity semantics only; any ordering below
/// is an implementation artifact of using the discriminant as an array index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Color {
    White,
    Yellow,
    Green,
    Blue,
    Orange,
    Red,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Orange,
        Color::Red,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One of the six faces of the cube. The topology accessors (`opposite`,
/// `adjacent`, `axis`) are pure functions of the fixed cube layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum FaceId {
    Up,
    Down,
    Front,
    Back,
    Left,
    Right,
}

/// Face name lookup used by move notation parsing.
pub static FACE_NAMES: phf::Map<&'static str, FaceId> = phf::phf_map! {
    "U" => FaceId::Up,
    "D" => FaceId::Down,
    "F" => FaceId::Front,
    "B" => FaceId::Back,
    "L" => FaceId::Left,
    "R" => FaceId::Right,
};

impl FaceId {
    pub const ALL: [FaceId; 6] = [
        FaceId::Up,
        FaceId::Down,
        FaceId::Front,
        FaceId::Back,
        FaceId::Left,
        FaceId::Right,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FaceId::Up => "U",
            FaceId::Down => "D",
            FaceId::Front => "F",
            FaceId::Back => "B",
            FaceId::Left => "L",
            FaceId::Right => "R",
        }
    }

    #[must_use]
    pub fn opposite(self) -> FaceId {
        match self {
            FaceId::Up => FaceId::Down,
            FaceId::Down => FaceId::Up,
            FaceId::Front => FaceId::Back,
            FaceId::Back => FaceId::Front,
            FaceId::Left => FaceId::Right,
            FaceId::Right => FaceId::Left,
        }
    }

    /// The four faces sharing an edge with this one, in the ring order of the
    /// axis this face lies on.
    #[must_use]
    pub fn adjacent(self) -> [FaceId; 4] {
        self.axis().ring()
    }

    /// The axis this face is an end of.
    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            FaceId::Right | FaceId::Left => Axis::X,
            FaceId::Up | FaceId::Down => Axis::Y,
            FaceId::Front | FaceId::Back => Axis::Z,
        }
    }

    /// Whether this face sits at the positive end of its axis (R, U, F).
    #[must_use]
    pub fn is_positive(self) -> bool {
        matches!(self, FaceId::Right | FaceId::Up | FaceId::Front)
    }
}

/// One of the three rotation axes of the cube. X points through R, Y through
/// U, Z through F.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The four side faces of this axis in positive-turn cycle order: a
    /// positive quarter turn of any slice on this axis carries each ring
    /// face's strip onto the next one's.
    #[must_use]
    pub fn ring(self) -> [FaceId; 4] {
        match self {
            Axis::X => [FaceId::Front, FaceId::Up, FaceId::Back, FaceId::Down],
            Axis::Y => [FaceId::Front, FaceId::Left, FaceId::Back, FaceId::Right],
            Axis::Z => [FaceId::Up, FaceId::Right, FaceId::Down, FaceId::Left],
        }
    }

    #[must_use]
    pub fn positive_face(self) -> FaceId {
        match self {
            Axis::X => FaceId::Right,
            Axis::Y => FaceId::Up,
            Axis::Z => FaceId::Front,
        }
    }

    #[must_use]
    pub fn negative_face(self) -> FaceId {
        self.positive_face().opposite()
    }

    /// The slice layer (0 at the axis-positive face) that `p` on `face`
    /// belongs to, or `None` if `face` is an end of this axis and therefore
    /// not cut by its slices.
    #[must_use]
    pub fn slice_layer(self, face: FaceId, p: Point, n: i32) -> Option<i32> {
        if face.axis() == self {
            return None;
        }
        Some(match (self, face) {
            // X slices cut every ring face into columns.
            (Axis::X, FaceId::Front | FaceId::Up | FaceId::Down) => n - 1 - p.col,
            (Axis::X, FaceId::Back) => p.col,
            // Y slices cut every ring face into rows, layer 0 at the top.
            (Axis::Y, _) => p.row,
            // Z slices alternate between rows and columns around the ring.
            (Axis::Z, FaceId::Up) => n - 1 - p.row,
            (Axis::Z, FaceId::Right) => p.col,
            (Axis::Z, FaceId::Down) => p.row,
            (Axis::Z, FaceId::Left) => n - 1 - p.col,
            _ => unreachable!("end faces handled above"),
        })
    }

    /// The cells of `face`'s strip in slice layer `layer`, ordered by the
    /// free coordinate. Inverse of [`Axis::slice_layer`].
    #[must_use]
    pub fn strip_cells(self, face: FaceId, layer: i32, n: i32) -> Vec<Point> {
        (0..n)
            .filter_map(|free| {
                let p = match (self, face) {
                    (Axis::X, FaceId::Front | FaceId::Up | FaceId::Down) => {
                        Point::new(free, n - 1 - layer)
                    }
                    (Axis::X, FaceId::Back) => Point::new(free, layer),
                    (Axis::Y, _) => Point::new(layer, free),
                    (Axis::Z, FaceId::Up) => Point::new(n - 1 - layer, free),
                    (Axis::Z, FaceId::Right) => Point::new(free, layer),
                    (Axis::Z, FaceId::Down) => Point::new(layer, free),
                    (Axis::Z, FaceId::Left) => Point::new(free, n - 1 - layer),
                    _ => return None,
                };
                Some(p)
            })
            .collect()
    }

    /// Where a sticker at `p` on ring face `from` lands on the next ring face
    /// after one positive quarter turn of its slice.
    ///
    /// The per-step maps are forced by the face orientation conventions in
    /// the crate docs; composing the four steps of a ring is the identity.
    #[must_use]
    pub fn ring_step(self, from: FaceId, p: Point, n: i32) -> Point {
        match self {
            Axis::X => match from {
                // F -> U and D -> F keep coordinates; crossing over the back
                // of the cube flips both.
                FaceId::Front | FaceId::Down => p,
                FaceId::Up | FaceId::Back => Point::new(n - 1 - p.row, n - 1 - p.col),
                _ => unreachable!("{from:?} is not on the X ring"),
            },
            Axis::Y => p,
            Axis::Z => Point::new(p.col, n - 1 - p.row),
        }
    }
}

/// A face-local grid position. Invariant: `0 <= row, col < n` for the grid
/// size `n` in play.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    #[must_use]
    pub fn new(row: i32, col: i32) -> Point {
        Point { row, col }
    }

    #[must_use]
    pub fn in_bounds(self, n: i32) -> bool {
        (0..n).contains(&self.row) && (0..n).contains(&self.col)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NotationError {
    #[error("Unknown face name in move notation: {0:?}")]
    UnknownFace(String),
    #[error("Malformed move token: {0:?}")]
    MalformedMove(String),
    #[error("Layer numbers in slice notation are 2-based and ascending, got {0:?}")]
    BadLayerRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposites_are_involutive() {
        for face in FaceId::ALL {
            assert_eq!(face.opposite().opposite(), face);
            assert_ne!(face.opposite(), face);
        }
    }

    #[test]
    fn rings_close_up() {
        for axis in Axis::ALL {
            let ring = axis.ring();
            for face in ring {
                assert_ne!(face.axis(), axis);
            }
            // Four ring steps bring every cell back to where it started.
            let n = 5;
            for layer in 0..n {
                for start in ring {
                    for p in axis.strip_cells(start, layer, n) {
                        let mut face = start;
                        let mut q = p;
                        for _ in 0..4 {
                            q = axis.ring_step(face, q, n);
                            let pos = ring.iter().position(|&f| f == face).unwrap();
                            face = ring[(pos + 1) % 4];
                        }
                        assert_eq!((face, q), (start, p));
                    }
                }
            }
        }
    }

    #[test]
    fn ring_steps_stay_in_layer() {
        let n = 4;
        for axis in Axis::ALL {
            let ring = axis.ring();
            for layer in 0..n {
                for (i, &face) in ring.iter().enumerate() {
                    for p in axis.strip_cells(face, layer, n) {
                        let next = ring[(i + 1) % 4];
                        let q = axis.ring_step(face, p, n);
                        assert_eq!(axis.slice_layer(next, q, n), Some(layer));
                    }
                }
            }
        }
    }

    #[test]
    fn slice_layer_roundtrips_strip_cells() {
        let n = 6;
        for axis in Axis::ALL {
            for face in axis.ring() {
                for layer in 0..n {
                    for p in axis.strip_cells(face, layer, n) {
                        assert_eq!(axis.slice_layer(face, p, n), Some(layer));
                    }
                }
            }
        }
    }

    #[test]
    fn face_names_roundtrip() {
        for face in FaceId::ALL {
            assert_eq!(FACE_NAMES.get(face.name()).copied(), Some(face));
        }
    }
}
