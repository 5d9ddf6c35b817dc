//! Rectangular multi-cell regions on a face, with orientation-preserving
//! iteration and the self-intersection validity test used by the commutator
//! engine.

use cube_core::{Axis, FaceId, LayerRange, Point, Rotation};

/// A rectangular region of a face grid. `start` and `end` are two opposite
/// physical corners; `rotation` records how many clockwise quarter turns the
/// block is from its kernel (axis-normalized) form.
///
/// The rotation tag is not redundant: once a block has been physically
/// reoriented, re-sorting the corners alone loses which original cell
/// corresponds to which current cell, and multi-cell commutators need that
/// correspondence to move a block as a rigid unit. Degenerate (single-row or
/// single-column) blocks make the corner order genuinely ambiguous, so the
/// tag is authoritative and [`Block::detect_rotation`] is only a classifier
/// for non-degenerate corner geometry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Block {
    pub start: Point,
    pub end: Point,
    rotation: Rotation,
}

impl Block {
    /// A block in kernel form: `start` must not exceed `end` in either
    /// coordinate.
    ///
    /// # Panics
    ///
    /// Panics if the corners are not in kernel order.
    #[must_use]
    pub fn kernel(start: Point, end: Point) -> Block {
        assert!(
            start.row <= end.row && start.col <= end.col,
            "kernel corners out of order: {start:?}..{end:?}"
        );
        Block {
            start,
            end,
            rotation: Rotation::R0,
        }
    }

    /// A block from arbitrary physical corners, inferring the rotation tag
    /// from their sign pattern.
    #[must_use]
    pub fn from_corners(start: Point, end: Point) -> Block {
        let mut block = Block {
            start,
            end,
            rotation: Rotation::R0,
        };
        block.rotation = block.detect_rotation();
        block
    }

    #[must_use]
    pub fn single(p: Point) -> Block {
        Block::kernel(p, p)
    }

    #[must_use]
    pub fn rotation(self) -> Rotation {
        self.rotation
    }

    /// Classify how many clockwise quarter turns separate the corner pair
    /// from kernel order. The four sign patterns of `start` vs `end` map 1:1
    /// onto the four rotation values; ties (degenerate blocks) collapse
    /// toward the smaller rotation, which is why the explicit tag exists.
    #[must_use]
    pub fn detect_rotation(self) -> Rotation {
        match (self.start.row <= self.end.row, self.start.col <= self.end.col) {
            (true, true) => Rotation::R0,
            (true, false) => Rotation::Cw,
            (false, false) => Rotation::Half,
            (false, true) => Rotation::Ccw,
        }
    }

    /// The kernel form: corners sorted, rotation tag cleared.
    #[must_use]
    pub fn normalized(self) -> Block {
        Block::kernel(
            Point::new(self.start.row.min(self.end.row), self.start.col.min(self.end.col)),
            Point::new(self.start.row.max(self.end.row), self.start.col.max(self.end.col)),
        )
    }

    /// This block after `rotation` clockwise quarter turns of its face grid.
    #[must_use]
    pub fn rotate(self, rotation: Rotation, n: i32) -> Block {
        Block {
            start: rotation.apply(self.start, n),
            end: rotation.apply(self.end, n),
            rotation: rotation.compose(self.rotation),
        }
    }

    /// Height and width of the physical rectangle.
    #[must_use]
    pub fn dims(self) -> (i32, i32) {
        (
            (self.start.row - self.end.row).abs() + 1,
            (self.start.col - self.end.col).abs() + 1,
        )
    }

    /// Height and width sorted, for orientation-insensitive shape checks.
    #[must_use]
    pub fn sorted_dims(self) -> (i32, i32) {
        let (h, w) = self.dims();
        (h.min(w), h.max(w))
    }

    #[must_use]
    pub fn cell_count(self) -> i32 {
        let (h, w) = self.dims();
        h * w
    }

    #[must_use]
    pub fn contains(self, p: Point) -> bool {
        let norm = self.normalized();
        (norm.start.row..=norm.end.row).contains(&p.row)
            && (norm.start.col..=norm.end.col).contains(&p.col)
    }

    /// The block's cells in the row-major order of its *kernel* form, mapped
    /// through the rotation tag. Two blocks iterated this way pair up
    /// original cell to original cell regardless of how either is currently
    /// oriented; plain row-major order on the physical corners would not.
    #[must_use]
    pub fn cells_kernel_order(self, n: i32) -> Vec<Point> {
        let inverse = self.rotation.inverse();
        let a = inverse.apply(self.start, n);
        let b = inverse.apply(self.end, n);
        debug_assert!(
            a.row <= b.row && a.col <= b.col,
            "rotation tag {:?} does not match corners {:?}..{:?}",
            self.rotation,
            self.start,
            self.end
        );
        let mut cells = Vec::with_capacity(self.cell_count() as usize);
        for row in a.row..=b.row {
            for col in a.col..=b.col {
                cells.push(self.rotation.apply(Point::new(row, col), n));
            }
        }
        cells
    }

    /// The inclusive span of slice layers this block occupies on `face`
    /// along `axis`, or `None` if `face` is an end of `axis`.
    #[must_use]
    pub fn layer_span(self, face: FaceId, axis: Axis, n: i32) -> Option<LayerRange> {
        let a = axis.slice_layer(face, self.start, n)?;
        let b = axis.slice_layer(face, self.end, n)?;
        Some(LayerRange::new(a.min(b), a.max(b)))
    }

    /// The quarter-turn directions that move this block's layer span fully
    /// off itself, clockwise first. A block usable in only one direction is
    /// still usable; an empty result means the block cannot take part in a
    /// commutator on this axis.
    #[must_use]
    pub fn commutator_rotations(self, face: FaceId, axis: Axis, n: i32) -> Vec<Rotation> {
        let Some(span) = self.layer_span(face, axis, n) else {
            return vec![];
        };
        [Rotation::Cw, Rotation::Ccw]
            .into_iter()
            .filter(|&rotation| {
                let rotated_span = self
                    .rotate(rotation, n)
                    .layer_span(face, axis, n)
                    .expect("rotation stays on the same face");
                !span.overlaps(rotated_span)
            })
            .collect()
    }

    #[must_use]
    pub fn is_valid_for_commutator(self, face: FaceId, axis: Axis, n: i32) -> bool {
        !self.commutator_rotations(face, axis, n).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_detection_matches_applied_rotation() {
        let n = 7;
        for (start, end) in [
            (Point::new(0, 0), Point::new(2, 3)),
            (Point::new(1, 2), Point::new(3, 4)),
            (Point::new(4, 0), Point::new(6, 2)),
        ] {
            let kernel = Block::kernel(start, end);
            for rotation in Rotation::ALL {
                let rotated = kernel.rotate(rotation, n);
                assert_eq!(rotated.detect_rotation(), rotation);
                assert_eq!(rotated.rotation(), rotation);
            }
        }
    }

    #[test]
    fn kernel_order_iteration_is_rigid() {
        let n = 5;
        let kernel = Block::kernel(Point::new(1, 1), Point::new(2, 3));
        let cells = kernel.cells_kernel_order(n);
        assert_eq!(cells[0], Point::new(1, 1));
        assert_eq!(cells.len(), 6);

        for rotation in Rotation::ALL {
            let rotated = kernel.rotate(rotation, n);
            let rotated_cells = rotated.cells_kernel_order(n);
            // Each cell of the rotated block is the rotation image of the
            // corresponding kernel cell: the pairing survives reorientation.
            for (&cell, &image) in cells.iter().zip(&rotated_cells) {
                assert_eq!(rotation.apply(cell, n), image);
            }
        }
    }

    #[test]
    fn normalization_forgets_orientation() {
        let n = 4;
        let kernel = Block::kernel(Point::new(0, 1), Point::new(1, 3));
        for rotation in Rotation::ALL {
            let norm = kernel.rotate(rotation, n).normalized();
            assert_eq!(norm.rotation(), Rotation::R0);
            assert_eq!(norm.detect_rotation(), Rotation::R0);
            assert_eq!(norm.cell_count(), kernel.cell_count());
        }
    }

    #[test]
    fn corner_cell_is_valid_clockwise_only() {
        // (0, 0) on F occupies X layer n-1. Clockwise it moves to the
        // opposite column (layer 0); counter-clockwise it stays in column 0.
        let n = 5;
        let block = Block::single(Point::new(0, 0));
        assert_eq!(
            block.commutator_rotations(FaceId::Front, Axis::X, n),
            vec![Rotation::Cw]
        );
    }

    #[test]
    fn centre_cell_is_never_valid() {
        // The fixed point of the grid rotation cannot leave its own span.
        let n = 5;
        let centre = Block::single(Point::new(2, 2));
        assert!(!centre.is_valid_for_commutator(FaceId::Front, Axis::X, n));
        assert!(!centre.is_valid_for_commutator(FaceId::Front, Axis::Y, n));
    }

    #[test]
    fn one_sided_validity_reports_the_free_direction() {
        // A top-row block starting in the left column: clockwise keeps it
        // across rows 0..=2 (overlap), counter-clockwise drops it to rows
        // 1..=3 of column 0 (clear).
        let n = 4;
        let block = Block::kernel(Point::new(0, 0), Point::new(0, 2));
        assert_eq!(
            block.commutator_rotations(FaceId::Front, Axis::Y, n),
            vec![Rotation::Ccw]
        );

        let tall = Block::kernel(Point::new(0, 0), Point::new(2, 0));
        assert_eq!(
            tall.commutator_rotations(FaceId::Front, Axis::Y, n),
            vec![Rotation::Ccw]
        );
    }
}
