//! The static face adjacency model: which edge every ordered pair of
//! adjacent faces shares, whether edge-local indices run the same way on
//! both sides, and which slice axes connect a pair of faces.

use crate::GeometryError;
use cube_core::{Axis, FaceId, Point};

/// One of the four border edges of a face, in face-local terms: `Top` is
/// row 0, `Left` is column 0, as seen from outside the cube.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EdgeSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl EdgeSide {
    /// The edge-local left-to-right index of `p`: the column for horizontal
    /// edges, the row for vertical ones.
    #[must_use]
    pub fn index_of(self, p: Point) -> i32 {
        match self {
            EdgeSide::Top | EdgeSide::Bottom => p.col,
            EdgeSide::Left | EdgeSide::Right => p.row,
        }
    }

    /// How far `p` sits from this edge; 0 on the edge itself.
    #[must_use]
    pub fn depth_of(self, p: Point, n: i32) -> i32 {
        match self {
            EdgeSide::Top => p.row,
            EdgeSide::Bottom => n - 1 - p.row,
            EdgeSide::Left => p.col,
            EdgeSide::Right => n - 1 - p.col,
        }
    }

    /// The grid point at `index` along this edge, `depth` cells inward.
    #[must_use]
    pub fn point_at(self, index: i32, depth: i32, n: i32) -> Point {
        match self {
            EdgeSide::Top => Point::new(depth, index),
            EdgeSide::Bottom => Point::new(n - 1 - depth, index),
            EdgeSide::Left => Point::new(index, depth),
            EdgeSide::Right => Point::new(index, n - 1 - depth),
        }
    }
}

/// The shared boundary of an ordered adjacent face pair `(a, b)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SharedEdge {
    pub a_side: EdgeSide,
    pub b_side: EdgeSide,
    /// Whether edge-local indices agree across the boundary; when false, an
    /// index `i` on side `a` meets `n - 1 - i` on side `b`.
    pub same_direction: bool,
}

/// The twelve undirected edges of the cube, each stated once. The sides and
/// direction flags are forced by the face orientation conventions in
/// `cube_core`'s crate docs.
const EDGES: [(FaceId, EdgeSide, FaceId, EdgeSide, bool); 12] = {
    use EdgeSide::{Bottom, Left, Right, Top};
    use FaceId::{Back, Down, Front, Left as L, Right as R, Up};
    [
        (Up, Bottom, Front, Top, true),
        (Up, Top, Back, Top, false),
        (Up, Left, L, Top, true),
        (Up, Right, R, Top, false),
        (Down, Top, Front, Bottom, true),
        (Down, Bottom, Back, Bottom, false),
        (Down, Left, L, Bottom, false),
        (Down, Right, R, Bottom, true),
        (Front, Left, L, Right, true),
        (Front, Right, R, Left, true),
        (Back, Right, L, Left, true),
        (Back, Left, R, Right, true),
    ]
};

/// The shared edge of `(a, b)`, or `None` when the faces are identical or
/// opposite.
#[must_use]
pub fn shared_edge(a: FaceId, b: FaceId) -> Option<SharedEdge> {
    EDGES.iter().find_map(|&(f, f_side, g, g_side, same_direction)| {
        if (f, g) == (a, b) {
            Some(SharedEdge {
                a_side: f_side,
                b_side: g_side,
                same_direction,
            })
        } else if (g, f) == (a, b) {
            Some(SharedEdge {
                a_side: g_side,
                b_side: f_side,
                same_direction,
            })
        } else {
            None
        }
    })
}

/// Every axis whose slice moves carry stickers between `a` and `b`: one for
/// adjacent pairs, two for opposite pairs, sorted so repeated calls are
/// reproducible.
///
/// # Errors
///
/// `UnsupportedFacePair` for the degenerate `a == b` pair.
pub fn connecting_axes(a: FaceId, b: FaceId) -> Result<Vec<Axis>, GeometryError> {
    if a == b {
        return Err(GeometryError::UnsupportedFacePair { a, b });
    }
    let mut axes: Vec<Axis> = Axis::ALL
        .into_iter()
        .filter(|&axis| axis != a.axis() && axis != b.axis())
        .collect();
    axes.sort_unstable();
    Ok(axes)
}

/// The deterministic axis choice for translating between `a` and `b`: the
/// only connecting axis for adjacent pairs, the smaller of the two (in
/// X < Y < Z order) for opposite pairs.
///
/// # Errors
///
/// `UnsupportedFacePair` for the degenerate `a == b` pair.
pub fn shared_axis(a: FaceId, b: FaceId) -> Result<Axis, GeometryError> {
    Ok(connecting_axes(a, b)?[0])
}
