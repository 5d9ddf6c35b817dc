//! The cyclic group of face-grid quarter turns and its action on face-local
//! points.

use crate::Point;

/// A number of clockwise quarter turns, mod 4. Forms Z/4 under
/// [`Rotation::compose`]; the action on points is defined by iterating one
/// canonical clockwise step.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Rotation {
    #[default]
    R0 = 0,
    Cw = 1,
    Half = 2,
    Ccw = 3,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::Cw, Rotation::Half, Rotation::Ccw];

    /// Reduce an arbitrary signed quarter-turn count into the group.
    #[must_use]
    pub fn from_quarter_turns(quarter_turns: i32) -> Rotation {
        match quarter_turns.rem_euclid(4) {
            0 => Rotation::R0,
            1 => Rotation::Cw,
            2 => Rotation::Half,
            _ => Rotation::Ccw,
        }
    }

    #[must_use]
    pub fn quarter_turns(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub fn compose(self, other: Rotation) -> Rotation {
        Rotation::from_quarter_turns(self.quarter_turns() + other.quarter_turns())
    }

    #[must_use]
    pub fn inverse(self) -> Rotation {
        Rotation::from_quarter_turns(4 - self.quarter_turns())
    }

    /// Where the sticker at `p` lands when an `n`-sized face grid is rotated
    /// by this many clockwise quarter turns. One clockwise step moves
    /// `(r, c)` to `(c, n - 1 - r)`; the other three values iterate it.
    #[must_use]
    pub fn apply(self, p: Point, n: i32) -> Point {
        let mut p = p;
        for _ in 0..self.quarter_turns() {
            p = Point::new(p.col, n - 1 - p.row);
        }
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_points(n: i32) -> impl Iterator<Item = Point> {
        (0..n).flat_map(move |row| (0..n).map(move |col| Point::new(row, col)))
    }

    #[test]
    fn composition_distributes_over_apply() {
        for n in [3, 4, 5, 6, 7] {
            for a in Rotation::ALL {
                for b in Rotation::ALL {
                    for p in all_points(n) {
                        assert_eq!(a.compose(b).apply(p, n), a.apply(b.apply(p, n), n));
                    }
                }
            }
        }
    }

    #[test]
    fn inverses_cancel() {
        for n in [3, 4, 5, 6, 7] {
            for a in Rotation::ALL {
                assert_eq!(a.compose(a.inverse()), Rotation::R0);
                for p in all_points(n) {
                    assert_eq!(a.inverse().apply(a.apply(p, n), n), p);
                }
            }
        }
    }

    #[test]
    fn clockwise_moves_top_left_to_top_right() {
        let n = 4;
        assert_eq!(Rotation::Cw.apply(Point::new(0, 0), n), Point::new(0, 3));
        assert_eq!(Rotation::Cw.apply(Point::new(0, 3), n), Point::new(3, 3));
        assert_eq!(Rotation::Half.apply(Point::new(1, 0), n), Point::new(2, 3));
        assert_eq!(Rotation::Ccw.apply(Point::new(0, 0), n), Point::new(3, 0));
    }

    #[test]
    fn stays_in_bounds() {
        for n in [3, 4, 5, 6, 7] {
            for a in Rotation::ALL {
                for p in all_points(n) {
                    assert!(a.apply(p, n).in_bounds(n));
                }
            }
        }
    }
}
