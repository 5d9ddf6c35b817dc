//! Face-to-face coordinate translation: for a target point and a source
//! face, where the payload naturally comes from, and which extra target-face
//! rotation keeps a commutator's two slice stacks from overlapping.

use crate::adjacency::{connecting_axes, shared_edge};
use crate::block::Block;
use crate::GeometryError;
use cube_core::{Axis, FaceId, Point, Rotation};

/// The result of translating a target point onto a source face.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Translation {
    /// The point on the source face whose content a single connecting slice
    /// move carries onto the target point.
    pub source_point: Point,
    /// The target-face rotation that moves the target off its own slice
    /// stack (clockwise preferred).
    pub required_face_rotation: Rotation,
    /// The axis the translation followed; only ever a choice for opposite
    /// face pairs.
    pub chosen_axis: Axis,
}

/// The natural source of `p` along a fixed connecting `axis`: the preimage
/// of `p` under the slice rotation that carries `source`'s strips onto
/// `target`'s (one quarter turn for adjacent faces, a half turn for opposite
/// faces, which is the same permutation in either direction).
///
/// For adjacent faces this reduces to edge-local arithmetic: the boundary
/// index is preserved or mirrored per the adjacency model's direction flag,
/// and depth `d` from the shared edge on the target maps to depth
/// `n - 1 - d` on the source.
///
/// # Panics
///
/// Panics if `axis` does not connect `target` and `source`; callers obtain
/// the axis from [`connecting_axes`] first.
#[must_use]
pub fn natural_source_point(
    target: FaceId,
    source: FaceId,
    axis: Axis,
    p: Point,
    n: i32,
) -> Point {
    assert!(
        axis != target.axis() && axis != source.axis() && target != source,
        "{axis:?} does not connect {target:?} and {source:?}"
    );
    if let Some(edge) = shared_edge(target, source) {
        let index = edge.a_side.index_of(p);
        let depth = edge.a_side.depth_of(p, n);
        let source_index = if edge.same_direction { index } else { n - 1 - index };
        return edge.b_side.point_at(source_index, n - 1 - depth, n);
    }
    // Opposite faces: the half turn is two quarter turns, chained through
    // either ring neighbour (both give the same preimage on a 4n-cell ring).
    let ring = axis.ring();
    let source_position = ring
        .iter()
        .position(|&f| f == source)
        .expect("a connecting axis has both faces on its ring");
    let mid = ring[(source_position + 1) % 4];
    debug_assert_ne!(mid, target);
    let on_mid = natural_source_point(target, mid, axis, p, n);
    natural_source_point(mid, source, axis, on_mid, n)
}

/// The target-face rotation to apply between the two slice stacks of a
/// commutator: clockwise if it moves `block`'s layer span fully off itself,
/// else counter-clockwise.
///
/// # Errors
///
/// `RotationInconsistency` if both directions self-intersect. For blocks the
/// block-validity check certified, this indicates a geometry-model defect
/// and is not a normal runtime condition.
pub fn required_face_rotation(
    face: FaceId,
    axis: Axis,
    block: Block,
    n: i32,
) -> Result<Rotation, GeometryError> {
    block
        .commutator_rotations(face, axis, n)
        .first()
        .copied()
        .ok_or(GeometryError::RotationInconsistency {
            face,
            axis,
            start: block.start,
            end: block.end,
            n,
        })
}

/// Translate `p` on `target` onto `source` using the deterministic axis
/// choice.
///
/// Structural inverse property: for a fixed ordered adjacent pair,
/// translating the result back with the roles swapped returns `p`; for
/// opposite pairs the same holds once the axis choice is fixed on both
/// calls.
///
/// # Errors
///
/// `UnsupportedFacePair` when `target == source`; `RotationInconsistency`
/// per [`required_face_rotation`].
pub fn translate(
    target: FaceId,
    source: FaceId,
    p: Point,
    n: i32,
) -> Result<Translation, GeometryError> {
    let axis = connecting_axes(target, source)?[0];
    translate_along(target, source, axis, p, n)
}

/// [`translate`] with an explicit axis; used by diagnostics and by callers
/// that need both opposite-pair results.
///
/// # Errors
///
/// `RotationInconsistency` per [`required_face_rotation`].
pub fn translate_along(
    target: FaceId,
    source: FaceId,
    axis: Axis,
    p: Point,
    n: i32,
) -> Result<Translation, GeometryError> {
    let source_point = natural_source_point(target, source, axis, p, n);
    let required_face_rotation = required_face_rotation(target, axis, Block::single(p), n)?;
    Ok(Translation {
        source_point,
        required_face_rotation,
        chosen_axis: axis,
    })
}

/// Every valid translation of `p`: one entry for adjacent pairs, both axis
/// choices for opposite pairs.
///
/// # Errors
///
/// As [`translate`].
pub fn all_translations(
    target: FaceId,
    source: FaceId,
    p: Point,
    n: i32,
) -> Result<Vec<Translation>, GeometryError> {
    connecting_axes(target, source)?
        .into_iter()
        .map(|axis| translate_along(target, source, axis, p, n))
        .collect()
}
