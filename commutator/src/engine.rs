//! The commutator engine: plans and executes the balanced eight-move
//! sequence that 3-cycles a block between faces.
//!
//! For a target block `t` on face `T` sourced from face `S`, let `X1` be the
//! slice turn through `t`'s layers in the direction carrying `S`'s strips
//! onto `T`'s, `Y` the turn of `T` by the required face rotation `ρ`, and
//! `X2` the same slice turn through the layers of `ρ(t)`. The emitted
//! sequence is
//!
//! ```text
//! X1  Y  X2  Y'  X1'  Y  X2'  Y'
//! ```
//!
//! `Y` appears twice clockwise and twice counter-clockwise and each slice
//! turn is applied then exactly undone, so the net effect is the 3-cycle
//! `s1 → t → s2 → s1` (`s1` the natural source of `t`, `s2` the natural
//! source of `ρ(t)`). Every bystander is restored: cells off the two slice
//! rings and off `T` are never touched; ring cells outside `T` are carried
//! out and back by their own slice pair; and a cell of `T` moved into a
//! slice line by `Y` is either parked off `T` while that slice is away or
//! returned by the matching `Y'` — the layer-span disjointness that `ρ` is
//! chosen for is exactly what keeps the two cases from colliding.

use crate::CommutatorError;
use cube_core::{Algorithm, Axis, Color, FaceId, FaceletCube, Move, Point, Rotation};
use cube_geometry::adjacency::shared_axis;
use cube_geometry::block::Block;
use cube_geometry::translate::{natural_source_point, required_face_rotation};
use log::{debug, info};

/// A planned commutator. Block positions are face-local; when a source
/// alignment setup is undone by `preserve_state`, `second_block` already
/// accounts for the undo, so it names where the target's old contents
/// actually rest once the whole algorithm has run.
#[derive(Clone, Debug)]
pub struct CommutatorPlan {
    pub algorithm: Algorithm,
    pub target_block: Block,
    pub natural_source_block: Block,
    pub second_block: Block,
    pub chosen_axis: Axis,
    pub rotation: Rotation,
}

/// Commutator planner/executor for a fixed grid size.
///
/// `plan` never touches cube state, so callers can probe candidate moves
/// before committing; `execute` plans and applies.
#[derive(Clone, Copy, Debug)]
pub struct CommutatorEngine {
    n: i32,
    preserve_state: bool,
}

impl CommutatorEngine {
    #[must_use]
    pub fn new(n: i32) -> CommutatorEngine {
        CommutatorEngine {
            n,
            preserve_state: false,
        }
    }

    /// Undo any source-face setup rotation after the cycle, so the call has
    /// zero net effect outside the three cycled blocks. Required once edges
    /// and corners elsewhere on the source face must survive untouched.
    #[must_use]
    pub fn with_preserve_state(mut self, preserve_state: bool) -> CommutatorEngine {
        self.preserve_state = preserve_state;
        self
    }

    /// Plan the 3-cycle moving `target_block`'s natural source material onto
    /// `target_block`. With `source_block` given, material is taken from
    /// that rotation of the natural source instead, behind an aligning
    /// source-face setup turn.
    ///
    /// # Errors
    ///
    /// `UnsupportedFacePair` for a degenerate face pair, `ShapeMismatch`
    /// when `source_block` is no rotation of the natural source, and
    /// `GeometryInconsistency` when the target block cannot rotate off its
    /// own slice stack.
    pub fn plan(
        &self,
        source: FaceId,
        target: FaceId,
        target_block: Block,
        source_block: Option<Block>,
    ) -> Result<CommutatorPlan, CommutatorError> {
        let n = self.n;
        let axis = shared_axis(target, source)?;

        let natural_source_block = self.translate_block(target, source, axis, target_block);
        if natural_source_block.sorted_dims() != target_block.sorted_dims() {
            // Translation is rigid, so this can only mean the geometry model
            // or the caller broke an assumption. Never silently proceed.
            return Err(CommutatorError::ShapeMismatch {
                expected: target_block,
                actual: natural_source_block,
            });
        }

        let rotation = required_face_rotation(target, axis, target_block, n)?;
        let rotated_target = target_block.rotate(rotation, n);
        let mut second_block = self.translate_block(target, source, axis, rotated_target);

        let target_span = target_block
            .layer_span(target, axis, n)
            .expect("target face is on the axis ring");
        let rotated_span = rotated_target
            .layer_span(target, axis, n)
            .expect("rotation stays on the target face");
        debug_assert!(!target_span.overlaps(rotated_span));

        let quarter_turns = carry_quarter_turns(axis, source, target);
        let x1 = Move::slice(axis, target_span, quarter_turns);
        let x2 = Move::slice(axis, rotated_span, quarter_turns);
        let y = Move::face(target, rotation.quarter_turns());

        let setup = match source_block {
            Some(provided) => self.alignment(natural_source_block, provided)?,
            None => None,
        };

        let mut algorithm = Algorithm::new();
        if let Some(setup_turn) = setup {
            algorithm.push(Move::face(source, setup_turn.quarter_turns()));
        }
        for move_ in [
            x1,
            y,
            x2,
            y.inverse(),
            x1.inverse(),
            y,
            x2.inverse(),
            y.inverse(),
        ] {
            algorithm.push(move_);
        }
        if let Some(setup_turn) = setup
            && self.preserve_state
        {
            algorithm.push(Move::face(source, setup_turn.inverse().quarter_turns()));
            // The undo carries the freshly deposited contents with it.
            second_block = second_block.rotate(setup_turn.inverse(), n);
        }

        Ok(CommutatorPlan {
            algorithm,
            target_block,
            natural_source_block,
            second_block,
            chosen_axis: axis,
            rotation,
        })
    }

    /// Plan and apply.
    ///
    /// # Errors
    ///
    /// As [`CommutatorEngine::plan`]; the cube is untouched on error.
    pub fn execute(
        &self,
        cube: &mut FaceletCube,
        source: FaceId,
        target: FaceId,
        target_block: Block,
        source_block: Option<Block>,
    ) -> Result<CommutatorPlan, CommutatorError> {
        let plan = self.plan(source, target, target_block, source_block)?;
        info!(
            crate::working!("cycling {} cells {:?} -> {:?} along {:?}: {}"),
            target_block.cell_count(),
            source,
            target,
            plan.chosen_axis,
            plan.algorithm
        );
        cube.apply_algorithm(&plan.algorithm);
        Ok(plan)
    }

    /// The natural source cells paired with the target block's cells, in the
    /// target's kernel order. This is the per-cell form of the plan's
    /// `natural_source_block`, used for color checks.
    #[must_use]
    pub fn paired_source_cells(
        &self,
        source: FaceId,
        target: FaceId,
        axis: Axis,
        target_block: Block,
    ) -> Vec<(Point, Point)> {
        target_block
            .cells_kernel_order(self.n)
            .into_iter()
            .map(|cell| {
                (
                    cell,
                    natural_source_point(target, source, axis, cell, self.n),
                )
            })
            .collect()
    }

    /// Search all four rotations of the source face for material of `color`
    /// covering the natural source block, in rotation order R0, Cw, Half,
    /// Ccw. The result feeds [`CommutatorEngine::plan`] as `source_block`.
    ///
    /// # Errors
    ///
    /// `NoValidSource` when no rotation matches; solvers hit this routinely
    /// and try another source face.
    pub fn find_color_source(
        &self,
        cube: &FaceletCube,
        source: FaceId,
        target: FaceId,
        target_block: Block,
        color: Color,
    ) -> Result<Block, CommutatorError> {
        let axis = shared_axis(target, source)?;
        let natural = self.translate_block(target, source, axis, target_block);
        let pairs = self.paired_source_cells(source, target, axis, target_block);
        for rotation in Rotation::ALL {
            let matches = pairs
                .iter()
                .all(|&(_, cell)| cube.sticker(source, rotation.apply(cell, self.n)) == color);
            if matches {
                debug!("found {color:?} source at rotation {rotation:?} of {source:?}");
                return Ok(natural.rotate(rotation, self.n));
            }
        }
        Err(CommutatorError::NoValidSource {
            source,
            target,
            color,
        })
    }

    /// Translate a block corner-wise onto the source face.
    fn translate_block(&self, target: FaceId, source: FaceId, axis: Axis, block: Block) -> Block {
        Block::from_corners(
            natural_source_point(target, source, axis, block.start, self.n),
            natural_source_point(target, source, axis, block.end, self.n),
        )
    }

    /// The source-face turn aligning `provided` onto `natural`, or `None`
    /// when they already coincide.
    fn alignment(
        &self,
        natural: Block,
        provided: Block,
    ) -> Result<Option<Rotation>, CommutatorError> {
        for rotation in Rotation::ALL {
            if provided.rotate(rotation, self.n).normalized() == natural.normalized() {
                return Ok((rotation != Rotation::R0).then_some(rotation));
            }
        }
        Err(CommutatorError::ShapeMismatch {
            expected: natural,
            actual: provided,
        })
    }
}

/// How many positive quarter turns of an `axis` slice carry `source`'s
/// strips onto `target`'s: one ring step per turn.
fn carry_quarter_turns(axis: Axis, source: FaceId, target: FaceId) -> i32 {
    let ring = axis.ring();
    let source_position = ring
        .iter()
        .position(|&f| f == source)
        .expect("source is on the connecting ring");
    let target_position = ring
        .iter()
        .position(|&f| f == target)
        .expect("target is on the connecting ring");
    ((target_position + 4 - source_position) % 4) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn plan_emits_the_balanced_template() {
        let engine = CommutatorEngine::new(5);
        let plan = engine
            .plan(
                FaceId::Up,
                FaceId::Front,
                Block::single(Point::new(0, 0)),
                None,
            )
            .unwrap();
        assert_eq!(plan.algorithm.len(), 8);

        // Two slice turns and one face turn, each applied and exactly undone.
        let mut net: Vec<(Move, i32)> = vec![];
        for &move_ in &plan.algorithm {
            match net.iter_mut().find(|(m, _)| m.same_target(move_)) {
                Some((_, total)) => *total += i32::from(move_.quarter_turns()),
                None => net.push((move_, i32::from(move_.quarter_turns()))),
            }
        }
        assert_eq!(net.len(), 3);
        assert!(net.iter().all(|&(_, total)| total % 4 == 0));
    }

    #[test]
    fn plan_matches_the_worked_example() {
        // F(0,0) from U on a 5-grid: layer 4, clockwise rotation, second
        // stack at layer 0.
        let engine = CommutatorEngine::new(5);
        let plan = engine
            .plan(
                FaceId::Up,
                FaceId::Front,
                Block::single(Point::new(0, 0)),
                None,
            )
            .unwrap();
        assert_eq!(plan.chosen_axis, Axis::X);
        assert_eq!(plan.rotation, Rotation::Cw);
        assert_eq!(plan.natural_source_block.start, Point::new(0, 0));
        assert_eq!(plan.second_block.start, Point::new(0, 4));
        assert_eq!(plan.algorithm.to_string(), "6R' F 2R' F' 6R F 2R F'");
    }

    #[test]
    fn same_face_pair_is_unsupported() {
        let engine = CommutatorEngine::new(4);
        assert_eq!(
            engine
                .plan(
                    FaceId::Front,
                    FaceId::Front,
                    Block::single(Point::new(0, 0)),
                    None
                )
                .unwrap_err(),
            CommutatorError::UnsupportedFacePair {
                source: FaceId::Front,
                target: FaceId::Front,
            }
        );
    }

    #[test]
    fn centre_block_is_a_geometry_inconsistency() {
        let engine = CommutatorEngine::new(5);
        assert!(matches!(
            engine.plan(
                FaceId::Up,
                FaceId::Front,
                Block::single(Point::new(2, 2)),
                None
            ),
            Err(CommutatorError::GeometryInconsistency(_))
        ));
    }

    #[test]
    fn foreign_source_block_is_a_shape_mismatch() {
        let engine = CommutatorEngine::new(5);
        let bogus = Block::kernel(Point::new(1, 1), Point::new(2, 2));
        assert!(matches!(
            engine.plan(
                FaceId::Up,
                FaceId::Front,
                Block::single(Point::new(0, 0)),
                Some(bogus)
            ),
            Err(CommutatorError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn carry_direction_follows_the_ring() {
        assert_eq!(carry_quarter_turns(Axis::X, FaceId::Up, FaceId::Front), 3);
        assert_eq!(carry_quarter_turns(Axis::X, FaceId::Front, FaceId::Up), 1);
        assert_eq!(carry_quarter_turns(Axis::X, FaceId::Front, FaceId::Back), 2);
        assert_eq!(carry_quarter_turns(Axis::Y, FaceId::Right, FaceId::Front), 1);
    }

    #[test]
    fn aligned_source_block_adds_setup_turns() {
        let engine = CommutatorEngine::new(5).with_preserve_state(true);
        let target_block = Block::single(Point::new(0, 0));
        let natural = Block::single(Point::new(0, 0));
        let provided = natural.rotate(Rotation::Cw, 5);
        let plan = engine
            .plan(FaceId::Up, FaceId::Front, target_block, Some(provided))
            .unwrap();
        // Setup, eight core moves, undo.
        assert_eq!(plan.algorithm.len(), 10);
        let moves = plan.algorithm.moves();
        assert!(moves[0].same_target(Move::face(FaceId::Up, 1)));
        assert_eq!(moves[9], moves[0].inverse());
    }

    #[test]
    fn paired_cells_follow_kernel_order() {
        let engine = CommutatorEngine::new(5);
        let block = Block::kernel(Point::new(0, 0), Point::new(1, 0));
        let pairs = engine.paired_source_cells(FaceId::Up, FaceId::Front, Axis::X, block);
        let cells = block.cells_kernel_order(5);
        assert_eq!(pairs.iter().map(|&(t, _)| t).collect_vec(), cells);
    }
}
