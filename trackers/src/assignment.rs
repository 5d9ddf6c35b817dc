//! Even-cube face/color assignment: majority voting under the global scheme
//! validity constraint.
//!
//! An even cube has no fixed centres, so "which color belongs on this face"
//! is a decision, not an observation. The assigner makes that decision in
//! three steps: two majority-vote face pairs, then the forced completion of
//! the last pair, keeping whichever of the two candidate completions yields
//! a valid scheme. Every step records a tracker rather than a raw face id,
//! because solver moves between steps can migrate the stickers a step was
//! based on.

use crate::{FaceTracker, Tracker, TrackerError, TrackerRegistry};
use cube_core::{
    Color, FaceColorScheme, FaceId, FaceletCube, Point, scheme::SchemeError, state::StateError,
};
use itertools::Itertools;
use log::debug;
use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AssignmentState {
    Unassigned,
    /// The number of faces fixed so far (2 or 4).
    PartiallyAssigned(u8),
    FullyAssigned,
}

#[derive(Error, Debug)]
pub enum AssignmentError {
    #[error("Assignment is already complete")]
    AlreadyComplete,
    #[error("Assignment has not reached {0:?} yet")]
    ColorUnassigned(Color),
    #[error("Assignment is not complete; {0} of 6 faces fixed")]
    Incomplete(usize),
    #[error("Neither completion of the last two faces yields a valid scheme")]
    NoValidCompletion,
    #[error("An odd cube's centres form an invalid scheme; the state is not a legal cube")]
    InvalidCenterScheme,
    #[error(transparent)]
    Scheme(#[from] SchemeError),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    State(#[from] StateError),
}

/// The stepwise face/color assigner. Create once per solve, drive with
/// [`FaceColorAssigner::step`] (or [`FaceColorAssigner::assign_all`] when no
/// moves happen in between), then consult [`FaceColorAssigner::target_face`]
/// for the rest of the solve.
#[derive(Debug)]
pub struct FaceColorAssigner {
    original: FaceColorScheme,
    assigned: Vec<(FaceTracker, Color)>,
    state: AssignmentState,
}

impl FaceColorAssigner {
    #[must_use]
    pub fn new(original: FaceColorScheme) -> FaceColorAssigner {
        FaceColorAssigner {
            original,
            assigned: vec![],
            state: AssignmentState::Unassigned,
        }
    }

    #[must_use]
    pub fn state(&self) -> AssignmentState {
        self.state
    }

    #[must_use]
    pub fn assignments(&self) -> &[(FaceTracker, Color)] {
        &self.assigned
    }

    /// The physical face currently assigned to `color`.
    ///
    /// # Errors
    ///
    /// If `color` has not been assigned yet or its tracker lost its sticker.
    pub fn target_face(
        &self,
        cube: &FaceletCube,
        color: Color,
    ) -> Result<FaceId, AssignmentError> {
        let (tracker, _) = self
            .assigned
            .iter()
            .find(|(_, c)| *c == color)
            .ok_or(AssignmentError::ColorUnassigned(color))?;
        Ok(tracker.face(cube)?)
    }

    /// The currently assigned scheme, built from live tracker positions.
    ///
    /// # Errors
    ///
    /// If trackers collided onto one face (possible when interleaved moves
    /// migrated markers) or a tracker lost its sticker.
    pub fn scheme(&self, cube: &FaceletCube) -> Result<FaceColorScheme, AssignmentError> {
        if self.assigned.len() != 6 {
            return Err(AssignmentError::Incomplete(self.assigned.len()));
        }
        let mut assignments = [(FaceId::Up, Color::White); 6];
        for (slot, (tracker, color)) in assignments.iter_mut().zip(&self.assigned) {
            *slot = (tracker.face(cube)?, *color);
        }
        Ok(FaceColorScheme::from_assignments(assignments)?)
    }

    /// Run the full assignment in one go: the odd-cube shortcut, or all
    /// three even-cube steps back to back.
    ///
    /// # Errors
    ///
    /// See [`FaceColorAssigner::step`].
    pub fn assign_all(
        &mut self,
        cube: &mut FaceletCube,
        registry: &mut TrackerRegistry,
    ) -> Result<FaceColorScheme, AssignmentError> {
        while self.state != AssignmentState::FullyAssigned {
            self.step(cube, registry)?;
        }
        self.scheme(cube)
    }

    /// Advance the assignment by one transition.
    ///
    /// # Errors
    ///
    /// `AlreadyComplete` when fully assigned; `NoValidCompletion` when the
    /// final pair cannot complete a valid scheme (only possible when moves
    /// between steps disturbed earlier assignments); tracker/state errors
    /// propagated.
    pub fn step(
        &mut self,
        cube: &mut FaceletCube,
        registry: &mut TrackerRegistry,
    ) -> Result<AssignmentState, AssignmentError> {
        if self.state == AssignmentState::FullyAssigned {
            return Err(AssignmentError::AlreadyComplete);
        }
        if cube.n() % 2 == 1 {
            self.assign_odd(cube, registry)?;
            self.state = AssignmentState::FullyAssigned;
            return Ok(self.state);
        }

        let (taken_faces, taken_colors) = self.taken(cube)?;
        let remaining_faces: Vec<FaceId> = FaceId::ALL
            .into_iter()
            .filter(|f| !taken_faces.contains(f))
            .collect();
        let remaining_colors: Vec<Color> = Color::ALL
            .into_iter()
            .filter(|c| !taken_colors.contains(c))
            .collect();

        if remaining_faces.len() == 2 {
            self.complete_final_pair(cube, registry, &remaining_faces, &remaining_colors)?;
            self.state = AssignmentState::FullyAssigned;
            return Ok(self.state);
        }

        // Majority vote over every remaining (face, color) combination.
        // Iteration order is the deterministic tie-break.
        let (&face, &color) = remaining_faces
            .iter()
            .cartesian_product(&remaining_colors)
            .max_by_key(|&(&face, &color)| cube.count_color(face, color))
            .expect("at least four faces remain");
        debug!(
            "majority vote: {} of {:?} on {:?}",
            cube.count_color(face, color),
            color,
            face
        );
        self.assign_pair(cube, registry, face, color)?;

        self.state = AssignmentState::PartiallyAssigned(self.assigned.len() as u8);
        Ok(self.state)
    }

    /// Assign `color` to `face` and the forced opposite color to the
    /// physically opposite face, planting a tracker for each.
    fn assign_pair(
        &mut self,
        cube: &mut FaceletCube,
        registry: &mut TrackerRegistry,
        face: FaceId,
        color: Color,
    ) -> Result<(), AssignmentError> {
        for (face, color) in [(face, color), (face.opposite(), self.original.opposite_color(color))]
        {
            let anchor = anchor_cell(cube, face, color);
            let tracker = registry.track_sticker(cube, face, anchor)?;
            self.assigned.push((tracker, color));
        }
        Ok(())
    }

    /// Exactly two faces and two colors left: exactly one of the two
    /// pairings completes a valid scheme, by the structure of the color
    /// group. Test the first, fall back to the second.
    fn complete_final_pair(
        &mut self,
        cube: &mut FaceletCube,
        registry: &mut TrackerRegistry,
        faces: &[FaceId],
        colors: &[Color],
    ) -> Result<(), AssignmentError> {
        let mut fixed = [(FaceId::Up, Color::White); 4];
        for (slot, (tracker, color)) in fixed.iter_mut().zip(&self.assigned) {
            *slot = (tracker.face(cube)?, *color);
        }
        let candidates = [
            [(faces[0], colors[0]), (faces[1], colors[1])],
            [(faces[0], colors[1]), (faces[1], colors[0])],
        ];
        for candidate in candidates {
            let assignments = [
                fixed[0], fixed[1], fixed[2], fixed[3], candidate[0], candidate[1],
            ];
            let scheme = FaceColorScheme::from_assignments(assignments)?;
            if scheme.is_valid() {
                debug!("completing scheme with {candidate:?}");
                for (face, color) in candidate {
                    let anchor = anchor_cell(cube, face, color);
                    let tracker = registry.track_sticker(cube, face, anchor)?;
                    self.assigned.push((tracker, color));
                }
                return Ok(());
            }
        }
        Err(AssignmentError::NoValidCompletion)
    }

    /// Odd cubes: centres are authoritative, one centre tracker per face.
    fn assign_odd(
        &mut self,
        cube: &mut FaceletCube,
        registry: &mut TrackerRegistry,
    ) -> Result<(), AssignmentError> {
        let centre = Point::new(cube.n() / 2, cube.n() / 2);
        let mut assignments = [(FaceId::Up, Color::White); 6];
        for (slot, face) in assignments.iter_mut().zip(FaceId::ALL) {
            *slot = (face, cube.sticker(face, centre));
        }
        let scheme =
            FaceColorScheme::from_assignments(assignments).map_err(|_| AssignmentError::InvalidCenterScheme)?;
        if !scheme.is_valid() {
            return Err(AssignmentError::InvalidCenterScheme);
        }
        for face in FaceId::ALL {
            let color = cube.sticker(face, centre);
            let tracker = registry.track_center(cube, color)?;
            self.assigned.push((tracker, color));
        }
        Ok(())
    }

    fn taken(
        &self,
        cube: &FaceletCube,
    ) -> Result<(Vec<FaceId>, Vec<Color>), AssignmentError> {
        let mut faces = vec![];
        let mut colors = vec![];
        for (tracker, color) in &self.assigned {
            faces.push(tracker.face(cube)?);
            colors.push(*color);
        }
        Ok((faces, colors))
    }
}

/// The sticker to plant an assignment marker on: the first cell of the
/// wanted color in row-major order, or the face's first cell if the color is
/// entirely absent.
fn anchor_cell(cube: &FaceletCube, face: FaceId, color: Color) -> Point {
    let n = cube.n();
    (0..n)
        .flat_map(|row| (0..n).map(move |col| Point::new(row, col)))
        .find(|&p| cube.sticker(face, p) == color)
        .unwrap_or(Point::new(0, 0))
}
