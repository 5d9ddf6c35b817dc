//! Face trackers and the per-solve registry that owns their marker tags.
//!
//! A tracker answers "which physical face is my logical face on right now".
//! Odd cubes get the trivial fixed-centre answer; even cubes get a marked
//! sticker that the cube state carries along through every move. Trackers
//! hold no reference into cube storage, only a color or a tag to look up
//! with, so they tolerate the sticker migrating between queries.

pub mod assignment;

use cube_core::{Color, FaceId, FaceletCube, MarkerTag, Point, state::StateError};
use enum_dispatch::enum_dispatch;
use thiserror::Error;

pub use assignment::{AssignmentError, AssignmentState, FaceColorAssigner};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TrackerError {
    #[error("No face currently has a centre sticker of color {0:?}")]
    CenterNotFound(Color),
    #[error("Marker {0:?} is not planted on any sticker (already released?)")]
    MarkerMissing(MarkerTag),
    #[error("A centre tracker needs an odd grid, got size {0}")]
    EvenGrid(i32),
    #[error(transparent)]
    State(#[from] StateError),
}

/// The face-locating interface. Implementations form a closed set, so this
/// dispatches over an enum rather than a trait object.
#[enum_dispatch]
pub trait Tracker {
    /// The face this tracker currently identifies.
    ///
    /// # Errors
    ///
    /// If the tracked sticker or centre color cannot be found.
    fn face(&self, cube: &FaceletCube) -> Result<FaceId, TrackerError>;

    /// Remove any marker this tracker planted. Centre trackers have nothing
    /// to clean up.
    fn release(&self, cube: &mut FaceletCube);
}

/// Odd-grid tracker: the centre sticker of a face never leaves it under
/// face turns, so the face holding the centre of a given color is the
/// logical face.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CenterTracker {
    color: Color,
    n: i32,
}

impl Tracker for CenterTracker {
    fn face(&self, cube: &FaceletCube) -> Result<FaceId, TrackerError> {
        let centre = Point::new(self.n / 2, self.n / 2);
        FaceId::ALL
            .into_iter()
            .find(|&face| cube.sticker(face, centre) == self.color)
            .ok_or(TrackerError::CenterNotFound(self.color))
    }

    fn release(&self, _cube: &mut FaceletCube) {}
}

/// Even-grid tracker: a uniquely tagged sticker planted on the face when the
/// tracker was created; the logical face is wherever that sticker is now.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MarkerTracker {
    tag: MarkerTag,
}

impl MarkerTracker {
    #[must_use]
    pub fn tag(&self) -> MarkerTag {
        self.tag
    }
}

impl Tracker for MarkerTracker {
    fn face(&self, cube: &FaceletCube) -> Result<FaceId, TrackerError> {
        cube.find_tag(self.tag)
            .map(|(face, _)| face)
            .ok_or(TrackerError::MarkerMissing(self.tag))
    }

    fn release(&self, cube: &mut FaceletCube) {
        cube.unmark(self.tag);
    }
}

#[enum_dispatch(Tracker)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FaceTracker {
    CenterTracker,
    MarkerTracker,
}

/// Per-solve tag allocator and tracker factory. Owned by the calling
/// context; there is deliberately no global registry or counter.
#[derive(Debug, Default)]
pub struct TrackerRegistry {
    next_tag: u32,
    issued: Vec<MarkerTag>,
}

impl TrackerRegistry {
    #[must_use]
    pub fn new() -> TrackerRegistry {
        TrackerRegistry::default()
    }

    /// A fixed-centre tracker for the face holding `color`'s centre.
    ///
    /// # Errors
    ///
    /// `EvenGrid` when the cube has no centre cell.
    pub fn track_center(
        &mut self,
        cube: &FaceletCube,
        color: Color,
    ) -> Result<FaceTracker, TrackerError> {
        if cube.n() % 2 == 0 {
            return Err(TrackerError::EvenGrid(cube.n()));
        }
        Ok(CenterTracker { color, n: cube.n() }.into())
    }

    /// Plant a fresh marker on `(face, p)` and return the tracker following
    /// it.
    ///
    /// # Errors
    ///
    /// If the point is out of bounds (tag collisions cannot happen; the
    /// registry owns the counter).
    pub fn track_sticker(
        &mut self,
        cube: &mut FaceletCube,
        face: FaceId,
        p: Point,
    ) -> Result<FaceTracker, TrackerError> {
        let tag = MarkerTag(self.next_tag);
        self.next_tag += 1;
        cube.mark(tag, face, p)?;
        self.issued.push(tag);
        Ok(MarkerTracker { tag }.into())
    }

    /// Release a tracker, removing its marker from whichever sticker holds
    /// it now.
    pub fn release(&mut self, cube: &mut FaceletCube, tracker: &FaceTracker) {
        tracker.release(cube);
        if let FaceTracker::MarkerTracker(inner) = tracker {
            self.issued.retain(|&tag| tag != inner.tag());
        }
    }

    /// End-of-solve cleanup: remove every marker this registry ever planted,
    /// wherever its sticker has migrated to.
    pub fn release_all(&mut self, cube: &mut FaceletCube) {
        for tag in self.issued.drain(..) {
            cube.unmark(tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::{Axis, LayerRange, Move};

    #[test]
    fn center_tracker_follows_face_turns() {
        let cube = FaceletCube::solved(5);
        let mut registry = TrackerRegistry::new();
        let tracker = registry.track_center(&cube, Color::Green).unwrap();
        assert_eq!(tracker.face(&cube), Ok(FaceId::Front));
    }

    #[test]
    fn center_tracker_rejects_even_grids() {
        let cube = FaceletCube::solved(4);
        let mut registry = TrackerRegistry::new();
        assert_eq!(
            registry.track_center(&cube, Color::Green),
            Err(TrackerError::EvenGrid(4))
        );
    }

    #[test]
    fn marker_tracker_follows_slice_moves() {
        let mut cube = FaceletCube::solved(4);
        let mut registry = TrackerRegistry::new();
        let tracker = registry
            .track_sticker(&mut cube, FaceId::Front, Point::new(0, 1))
            .unwrap();
        assert_eq!(tracker.face(&cube), Ok(FaceId::Front));

        // Row 0 of F rides the Y-axis layer 0 slice onto L.
        cube.apply_move(&Move::slice(Axis::Y, LayerRange::single(0), 1));
        assert_eq!(tracker.face(&cube), Ok(FaceId::Left));

        registry.release(&mut cube, &tracker);
        assert_eq!(
            tracker.face(&cube),
            Err(TrackerError::MarkerMissing(match tracker {
                FaceTracker::MarkerTracker(inner) => inner.tag(),
                FaceTracker::CenterTracker(_) => unreachable!(),
            }))
        );
    }

    #[test]
    fn release_all_sweeps_every_marker() {
        let mut cube = FaceletCube::solved(4);
        let mut registry = TrackerRegistry::new();
        let trackers: Vec<FaceTracker> = (0..3)
            .map(|col| {
                registry
                    .track_sticker(&mut cube, FaceId::Front, Point::new(0, col))
                    .unwrap()
            })
            .collect();
        cube.apply_move(&Move::slice(Axis::Y, LayerRange::single(0), 1));
        registry.release_all(&mut cube);
        for tracker in trackers {
            assert!(tracker.face(&cube).is_err());
        }
    }

    #[test]
    fn registry_tags_are_unique() {
        let mut cube = FaceletCube::solved(4);
        let mut registry = TrackerRegistry::new();
        let a = registry
            .track_sticker(&mut cube, FaceId::Up, Point::new(0, 0))
            .unwrap();
        let b = registry
            .track_sticker(&mut cube, FaceId::Up, Point::new(0, 0))
            .unwrap();
        // Two markers may share a sticker; their tags must still differ.
        assert_ne!(a, b);
    }
}
