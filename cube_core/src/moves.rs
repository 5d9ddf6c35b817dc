//! The move model and the `Algorithm` sequence type consumed by solvers and
//! by the playback layer.
//!
//! Notation: face turns print as `U`, `U2`, `U'`. Inner slice turns print
//! with 2-based physical layer numbers counted from the axis-positive face,
//! so inner layer 0 on the X axis is `2R` and inner layers 1..=2 are `3-4R`.
//! The turn direction of a slice is the positive direction of its axis (the
//! direction of the face named in the notation).

use crate::{Axis, FACE_NAMES, FaceId, NotationError};
use itertools::Itertools;
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// An inclusive, ascending range of inner slice layers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct LayerRange {
    first: i32,
    last: i32,
}

impl LayerRange {
    /// # Panics
    ///
    /// Panics if `first > last`; layer ranges are normalized at the call
    /// site, not here.
    #[must_use]
    pub fn new(first: i32, last: i32) -> LayerRange {
        assert!(first <= last, "layer range {first}..={last} is descending");
        LayerRange { first, last }
    }

    #[must_use]
    pub fn single(layer: i32) -> LayerRange {
        LayerRange::new(layer, layer)
    }

    #[must_use]
    pub fn first(self) -> i32 {
        self.first
    }

    #[must_use]
    pub fn last(self) -> i32 {
        self.last
    }

    pub fn iter(self) -> impl Iterator<Item = i32> {
        self.first..=self.last
    }

    #[must_use]
    pub fn contains(self, layer: i32) -> bool {
        (self.first..=self.last).contains(&layer)
    }

    #[must_use]
    pub fn overlaps(self, other: LayerRange) -> bool {
        self.first <= other.last && other.first <= self.last
    }
}

/// A single state transition of the cube: either a whole-face turn (which on
/// the centre-sticker model rotates only that face's own grid) or an inner
/// slice turn (which cycles the four strip lines of each layer and touches no
/// face grid).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Move {
    Face {
        face: FaceId,
        quarter_turns: u8,
    },
    Slice {
        axis: Axis,
        layers: LayerRange,
        quarter_turns: u8,
    },
}

impl Move {
    #[must_use]
    pub fn face(face: FaceId, quarter_turns: i32) -> Move {
        Move::Face {
            face,
            quarter_turns: quarter_turns.rem_euclid(4) as u8,
        }
    }

    #[must_use]
    pub fn slice(axis: Axis, layers: LayerRange, quarter_turns: i32) -> Move {
        Move::Slice {
            axis,
            layers,
            quarter_turns: quarter_turns.rem_euclid(4) as u8,
        }
    }

    #[must_use]
    pub fn quarter_turns(self) -> u8 {
        match self {
            Move::Face { quarter_turns, .. } | Move::Slice { quarter_turns, .. } => quarter_turns,
        }
    }

    /// A move with a zero turn count; produced only by merging during
    /// [`Algorithm::simplify`], which then drops it.
    #[must_use]
    pub fn is_identity(self) -> bool {
        self.quarter_turns() == 0
    }

    #[must_use]
    pub fn inverse(self) -> Move {
        match self {
            Move::Face {
                face,
                quarter_turns,
            } => Move::face(face, -i32::from(quarter_turns)),
            Move::Slice {
                axis,
                layers,
                quarter_turns,
            } => Move::slice(axis, layers, -i32::from(quarter_turns)),
        }
    }

    /// Whether two moves act on the same face or the same slice stack, so
    /// their turn counts add.
    #[must_use]
    pub fn same_target(self, other: Move) -> bool {
        match (self, other) {
            (Move::Face { face: a, .. }, Move::Face { face: b, .. }) => a == b,
            (
                Move::Slice {
                    axis: a, layers: la, ..
                },
                Move::Slice {
                    axis: b, layers: lb, ..
                },
            ) => a == b && la == lb,
            _ => false,
        }
    }
}

fn turn_suffix(quarter_turns: u8) -> &'static str {
    match quarter_turns {
        1 => "",
        2 => "2",
        3 => "'",
        _ => "0",
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Face {
                face,
                quarter_turns,
            } => write!(f, "{}{}", face.name(), turn_suffix(quarter_turns)),
            Move::Slice {
                axis,
                layers,
                quarter_turns,
            } => {
                let name = axis.positive_face().name();
                if layers.first() == layers.last() {
                    write!(f, "{}{name}{}", layers.first() + 2, turn_suffix(quarter_turns))
                } else {
                    write!(
                        f,
                        "{}-{}{name}{}",
                        layers.first() + 2,
                        layers.last() + 2,
                        turn_suffix(quarter_turns)
                    )
                }
            }
        }
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(token: &str) -> Result<Move, NotationError> {
        let (body, quarter_turns) = match token.strip_suffix('\'') {
            Some(body) => (body, 3),
            None => match token.strip_suffix('2') {
                // A trailing 2 only counts as a turn suffix if something
                // other than a layer number precedes it.
                Some(body) if body.ends_with(|c: char| c.is_ascii_alphabetic()) => (body, 2),
                _ => (token, 1),
            },
        };

        let split = body.find(|c: char| c.is_ascii_alphabetic());
        let Some(split) = split else {
            return Err(NotationError::MalformedMove(token.to_owned()));
        };
        let (digits, name) = body.split_at(split);
        let &face = FACE_NAMES
            .get(name)
            .ok_or_else(|| NotationError::UnknownFace(name.to_owned()))?;

        if digits.is_empty() {
            return Ok(Move::face(face, quarter_turns));
        }
        if !face.is_positive() {
            // Slice notation is written against the axis-positive face.
            return Err(NotationError::MalformedMove(token.to_owned()));
        }
        let parse = |s: &str| {
            s.parse::<i32>()
                .ok()
                .filter(|&v| v >= 2)
                .ok_or_else(|| NotationError::BadLayerRange(token.to_owned()))
        };
        let (first, last) = match digits.split_once('-') {
            Some((a, b)) => (parse(a)?, parse(b)?),
            None => {
                let v = parse(digits)?;
                (v, v)
            }
        };
        if first > last {
            return Err(NotationError::BadLayerRange(token.to_owned()));
        }
        Ok(Move::slice(
            face.axis(),
            LayerRange::new(first - 2, last - 2),
            quarter_turns,
        ))
    }
}

/// An ordered, immutable-once-built sequence of moves. Supports
/// concatenation, inversion and a cancellation pass; consumed by the playback
/// layer and by solvers for move-count accounting.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Algorithm {
    moves: Vec<Move>,
}

impl Algorithm {
    #[must_use]
    pub fn new() -> Algorithm {
        Algorithm { moves: vec![] }
    }

    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn push(&mut self, move_: Move) {
        self.moves.push(move_);
    }

    #[must_use]
    pub fn inverted(&self) -> Algorithm {
        Algorithm {
            moves: self.moves.iter().rev().map(|m| m.inverse()).collect(),
        }
    }

    /// Cancel adjacent moves on the same target, merging their turn counts
    /// mod 4 and dropping the result when it vanishes. Cascades: `U 2R 2R' U'`
    /// simplifies to nothing.
    #[must_use]
    pub fn simplified(&self) -> Algorithm {
        let mut out: Vec<Move> = vec![];
        for &move_ in &self.moves {
            if move_.is_identity() {
                continue;
            }
            match out.last() {
                Some(&top) if top.same_target(move_) => {
                    let qt = i32::from(top.quarter_turns()) + i32::from(move_.quarter_turns());
                    out.pop();
                    let merged = match top {
                        Move::Face { face, .. } => Move::face(face, qt),
                        Move::Slice { axis, layers, .. } => Move::slice(axis, layers, qt),
                    };
                    if !merged.is_identity() {
                        out.push(merged);
                    }
                }
                _ => out.push(move_),
            }
        }
        Algorithm { moves: out }
    }
}

impl From<Vec<Move>> for Algorithm {
    fn from(moves: Vec<Move>) -> Algorithm {
        Algorithm { moves }
    }
}

impl FromIterator<Move> for Algorithm {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Algorithm {
        Algorithm {
            moves: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Algorithm {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl Add for Algorithm {
    type Output = Algorithm;

    fn add(mut self, rhs: Algorithm) -> Algorithm {
        self.moves.extend(rhs.moves);
        self
    }
}

impl AddAssign for Algorithm {
    fn add_assign(&mut self, rhs: Algorithm) {
        self.moves.extend(rhs.moves);
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.moves.iter().format(" "))
    }
}

impl FromStr for Algorithm {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Algorithm, NotationError> {
        s.split_whitespace().map(Move::from_str).collect()
    }
}
