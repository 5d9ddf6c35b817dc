//! The canonical cube-state collaborator: six centre-sticker grids, move
//! application, and the typed sticker marker table that face trackers ride
//! on.

use crate::{Algorithm, Axis, Color, FaceColorScheme, FaceId, Move, Point, Rotation};
use fxhash::FxHashMap;
use thiserror::Error;

/// A small opaque key for a tracked sticker. Tags are allocated by a
/// per-solve registry, never globally.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MarkerTag(pub u32);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StateError {
    #[error("Marker tag {0:?} is already planted")]
    TagInUse(MarkerTag),
    #[error("Point {point:?} is out of bounds for a grid of size {n}")]
    OutOfBounds { point: Point, n: i32 },
}

/// An NxN cube reduced to its six centre-sticker grids. `n` is the inner
/// slice count (physical edge length minus two), so face turns rotate only
/// their own grid and slice turns never touch a face grid.
///
/// Markers ride stickers: every move updates marker positions through the
/// same coordinate maps as sticker contents, which is what lets a tracker
/// find its sticker again on whatever face it migrated to.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FaceletCube {
    n: i32,
    faces: [Vec<Color>; 6],
    markers: FxHashMap<MarkerTag, (FaceId, Point)>,
}

impl FaceletCube {
    /// A solved cube colored by the canonical scheme.
    ///
    /// # Panics
    ///
    /// Panics if `n < 2`; a centre grid needs at least one inner slice pair.
    #[must_use]
    pub fn solved(n: i32) -> FaceletCube {
        FaceletCube::solved_with_scheme(n, &FaceColorScheme::canonical())
    }

    #[must_use]
    pub fn solved_with_scheme(n: i32, scheme: &FaceColorScheme) -> FaceletCube {
        assert!(n >= 2, "centre grid size must be at least 2, got {n}");
        let faces = FaceId::ALL.map(|face| vec![scheme.color_of(face); (n * n) as usize]);
        FaceletCube {
            n,
            faces,
            markers: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn n(&self) -> i32 {
        self.n
    }

    fn cell(&self, p: Point) -> usize {
        debug_assert!(p.in_bounds(self.n));
        (p.row * self.n + p.col) as usize
    }

    #[must_use]
    pub fn sticker(&self, face: FaceId, p: Point) -> Color {
        self.faces[face.index()][self.cell(p)]
    }

    /// Direct sticker write. Test and diagnostics support; regular state
    /// changes go through [`FaceletCube::apply_move`].
    pub fn set_sticker(&mut self, face: FaceId, p: Point, color: Color) {
        let cell = self.cell(p);
        self.faces[face.index()][cell] = color;
    }

    #[must_use]
    pub fn count_color(&self, face: FaceId, color: Color) -> usize {
        self.faces[face.index()].iter().filter(|&&c| c == color).count()
    }

    #[must_use]
    pub fn color_histogram(&self, face: FaceId) -> [usize; 6] {
        let mut histogram = [0; 6];
        for &color in &self.faces[face.index()] {
            histogram[color.index()] += 1;
        }
        histogram
    }

    /// Whether every face is a single color.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.faces
            .iter()
            .all(|face| face.iter().all(|&c| c == face[0]))
    }

    /// Plant `tag` on the sticker at `(face, p)`.
    ///
    /// # Errors
    ///
    /// If the tag is already planted or the point is out of bounds.
    pub fn mark(&mut self, tag: MarkerTag, face: FaceId, p: Point) -> Result<(), StateError> {
        if !p.in_bounds(self.n) {
            return Err(StateError::OutOfBounds { point: p, n: self.n });
        }
        if self.markers.contains_key(&tag) {
            return Err(StateError::TagInUse(tag));
        }
        self.markers.insert(tag, (face, p));
        Ok(())
    }

    #[must_use]
    pub fn find_tag(&self, tag: MarkerTag) -> Option<(FaceId, Point)> {
        self.markers.get(&tag).copied()
    }

    pub fn unmark(&mut self, tag: MarkerTag) -> Option<(FaceId, Point)> {
        self.markers.remove(&tag)
    }

    pub fn apply_algorithm(&mut self, algorithm: &Algorithm) {
        for move_ in algorithm {
            self.apply_move(move_);
        }
    }

    /// # Panics
    ///
    /// Panics if a slice turn names a layer outside `0..n`. Layer ranges are
    /// produced from in-bounds points by the geometry layer, so this is a
    /// programmer error, not a runtime condition.
    pub fn apply_move(&mut self, move_: &Move) {
        match *move_ {
            Move::Face {
                face,
                quarter_turns,
            } => {
                for _ in 0..quarter_turns {
                    self.rotate_face_grid(face);
                }
            }
            Move::Slice {
                axis,
                layers,
                quarter_turns,
            } => {
                assert!(
                    layers.first() >= 0 && layers.last() < self.n,
                    "slice layers {layers:?} out of bounds for n = {}",
                    self.n
                );
                for layer in layers.iter() {
                    for _ in 0..quarter_turns {
                        self.rotate_slice_quarter(axis, layer);
                    }
                }
            }
        }
    }

    /// One clockwise quarter turn of a single face grid.
    fn rotate_face_grid(&mut self, face: FaceId) {
        let n = self.n;
        let old = self.faces[face.index()].clone();
        for row in 0..n {
            for col in 0..n {
                let from = Point::new(row, col);
                let to = Rotation::Cw.apply(from, n);
                let from_cell = self.cell(from);
                let to_cell = self.cell(to);
                self.faces[face.index()][to_cell] = old[from_cell];
            }
        }
        for position in self.markers.values_mut() {
            if position.0 == face {
                position.1 = Rotation::Cw.apply(position.1, n);
            }
        }
    }

    /// One positive quarter turn of a single inner slice layer: each ring
    /// face's strip moves onto the next ring face through the per-step
    /// coordinate map.
    fn rotate_slice_quarter(&mut self, axis: Axis, layer: i32) {
        let n = self.n;
        let ring = axis.ring();
        let strips: Vec<Vec<(Point, Color)>> = ring
            .iter()
            .map(|&face| {
                axis.strip_cells(face, layer, n)
                    .into_iter()
                    .map(|p| (p, self.sticker(face, p)))
                    .collect()
            })
            .collect();
        for (i, &face) in ring.iter().enumerate() {
            let next = ring[(i + 1) % 4];
            for &(p, color) in &strips[i] {
                let dest = axis.ring_step(face, p, n);
                let cell = self.cell(dest);
                self.faces[next.index()][cell] = color;
            }
        }
        for position in self.markers.values_mut() {
            let (face, p) = *position;
            if let Some(i) = ring.iter().position(|&f| f == face)
                && axis.slice_layer(face, p, n) == Some(layer)
            {
                *position = (ring[(i + 1) % 4], axis.ring_step(face, p, n));
            }
        }
    }

    /// Scramble with `move_count` random face and slice turns, returning the
    /// applied sequence. Randomness comes from `fastrand`; seed the thread
    /// rng for reproducibility. A utility for tests and demos, not optimized.
    pub fn scramble(&mut self, move_count: u32) -> Algorithm {
        let mut algorithm = Algorithm::new();
        for _ in 0..move_count {
            let quarter_turns = fastrand::i32(1..=3);
            let move_ = if fastrand::bool() {
                Move::face(*fastrand::choice(FaceId::ALL.iter()).unwrap(), quarter_turns)
            } else {
                let axis = *fastrand::choice(Axis::ALL.iter()).unwrap();
                let layer = fastrand::i32(0..self.n);
                Move::slice(axis, crate::LayerRange::single(layer), quarter_turns)
            };
            self.apply_move(&move_);
            algorithm.push(move_);
        }
        algorithm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayerRange;

    #[test]
    fn four_quarter_turns_are_identity() {
        let mut cube = FaceletCube::solved(4);
        let pristine = cube.clone();
        cube.set_sticker(FaceId::Front, Point::new(1, 2), Color::Red);
        let dirty = cube.clone();

        for move_ in [
            Move::face(FaceId::Front, 1),
            Move::slice(Axis::X, LayerRange::new(1, 2), 1),
        ] {
            for _ in 0..4 {
                cube.apply_move(&move_);
            }
            assert_eq!(cube, dirty);
        }
        assert_ne!(cube, pristine);
    }

    #[test]
    fn move_then_inverse_restores_state() {
        fastrand::seed(7);
        let mut cube = FaceletCube::solved(5);
        let scramble = cube.scramble(30);
        cube.apply_algorithm(&scramble.inverted());
        assert_eq!(cube, FaceletCube::solved(5));
    }

    #[test]
    fn face_turn_touches_only_its_own_grid() {
        let mut cube = FaceletCube::solved(4);
        // Make every face distinguishable cell-by-cell.
        fastrand::seed(11);
        cube.scramble(40);
        let before = cube.clone();
        cube.apply_move(&Move::face(FaceId::Up, 1));
        for face in FaceId::ALL {
            if face == FaceId::Up {
                continue;
            }
            for row in 0..4 {
                for col in 0..4 {
                    let p = Point::new(row, col);
                    assert_eq!(cube.sticker(face, p), before.sticker(face, p));
                }
            }
        }
    }

    #[test]
    fn slice_turn_carries_front_strip_up() {
        // X layer 0 is the column next to R; a positive (R-direction) quarter
        // turn carries F's strip onto U with coordinates preserved.
        let n = 3;
        let mut cube = FaceletCube::solved(n);
        cube.set_sticker(FaceId::Front, Point::new(1, n - 1), Color::Red);
        cube.apply_move(&Move::slice(Axis::X, LayerRange::single(0), 1));
        assert_eq!(cube.sticker(FaceId::Up, Point::new(1, n - 1)), Color::Red);
        // The strip that arrived on F came from D.
        assert_eq!(
            cube.sticker(FaceId::Front, Point::new(1, n - 1)),
            FaceColorScheme::canonical().color_of(FaceId::Down)
        );
    }

    #[test]
    fn markers_ride_stickers() {
        let n = 4;
        let tag = MarkerTag(1);
        let mut cube = FaceletCube::solved(n);
        cube.mark(tag, FaceId::Front, Point::new(0, 0)).unwrap();

        // A Y slice through row 0 carries F -> L with coordinates preserved.
        cube.apply_move(&Move::slice(Axis::Y, LayerRange::single(0), 1));
        assert_eq!(cube.find_tag(tag), Some((FaceId::Left, Point::new(0, 0))));

        // Rotating L carries the marker within the face.
        cube.apply_move(&Move::face(FaceId::Left, 1));
        assert_eq!(
            cube.find_tag(tag),
            Some((FaceId::Left, Point::new(0, n - 1)))
        );

        assert_eq!(cube.unmark(tag), Some((FaceId::Left, Point::new(0, n - 1))));
        assert_eq!(cube.find_tag(tag), None);
    }

    #[test]
    fn duplicate_tags_are_rejected() {
        let mut cube = FaceletCube::solved(3);
        let tag = MarkerTag(9);
        cube.mark(tag, FaceId::Up, Point::new(0, 0)).unwrap();
        assert_eq!(
            cube.mark(tag, FaceId::Down, Point::new(1, 1)),
            Err(StateError::TagInUse(tag))
        );
    }
}
