//! Greedy block discovery on a face: the largest same-color rectangles a
//! bulk commutator can move, and the still-unsolved regions a solver should
//! aim at.
//!
//! Extension precedence is row-first, then column: from each seed the block
//! grows downward while whole rows match, then rightward while whole columns
//! match. The order affects which shape is found first and is part of the
//! contract, not an arbitrary choice.

use cube_core::{Axis, Color, FaceId, FaceletCube, Point};
use cube_geometry::block::Block;

/// A discovered block and its cell count.
pub type RankedBlock = (i32, Block);

/// Every same-color block seeded at a matching cell, grown row-first then
/// column-wise, each growth step validated for commutator use along `axis`.
/// Results are sorted by descending size, then by seed position, so
/// identical inputs always produce identical output.
#[must_use]
pub fn largest_block(
    cube: &FaceletCube,
    face: FaceId,
    color: Color,
    axis: Axis,
    bounds: Option<Block>,
) -> Vec<RankedBlock> {
    let n = cube.n();
    let region = bounds
        .map(Block::normalized)
        .unwrap_or_else(|| Block::kernel(Point::new(0, 0), Point::new(n - 1, n - 1)));
    let matches = |p: Point| region.contains(p) && cube.sticker(face, p) == color;

    let mut found: Vec<RankedBlock> = vec![];
    for seed_row in region.start.row..=region.end.row {
        for seed_col in region.start.col..=region.end.col {
            let seed = Point::new(seed_row, seed_col);
            if !matches(seed) || !Block::single(seed).is_valid_for_commutator(face, axis, n) {
                continue;
            }

            let mut end = seed;
            // Row extension first.
            while end.row + 1 <= region.end.row {
                let candidate = Block::kernel(seed, Point::new(end.row + 1, end.col));
                let row_matches =
                    (seed.col..=end.col).all(|col| matches(Point::new(end.row + 1, col)));
                if !row_matches || !candidate.is_valid_for_commutator(face, axis, n) {
                    break;
                }
                end = candidate.end;
            }
            // Then column extension across the full row span.
            while end.col + 1 <= region.end.col {
                let candidate = Block::kernel(seed, Point::new(end.row, end.col + 1));
                let column_matches =
                    (seed.row..=end.row).all(|row| matches(Point::new(row, end.col + 1)));
                if !column_matches || !candidate.is_valid_for_commutator(face, axis, n) {
                    break;
                }
                end = candidate.end;
            }

            let block = Block::kernel(seed, end);
            found.push((block.cell_count(), block));
        }
    }
    found.sort_by_key(|&(size, block)| (-size, block.start, block.end));
    found
}

/// Merge the still-wrong cells among `tracked` into maximal rectangles using
/// the same row-then-column greedy rule. Each wrong cell lands in exactly
/// one returned block.
#[must_use]
pub fn find_unsolved_target_regions(
    cube: &FaceletCube,
    face: FaceId,
    tracked: &[Point],
    color: Color,
) -> Vec<Block> {
    let mut wrong: Vec<Point> = tracked
        .iter()
        .copied()
        .filter(|&p| cube.sticker(face, p) != color)
        .collect();
    wrong.sort_unstable();
    wrong.dedup();

    let mut used: Vec<Point> = vec![];
    let mut regions = vec![];
    for &seed in &wrong {
        if used.contains(&seed) {
            continue;
        }
        let free = |p: Point| wrong.binary_search(&p).is_ok() && !used.contains(&p);

        let mut end = seed;
        while free(Point::new(end.row + 1, end.col))
            && (seed.col..=end.col).all(|col| free(Point::new(end.row + 1, col)))
        {
            end.row += 1;
        }
        while (seed.row..=end.row).all(|row| free(Point::new(row, end.col + 1))) {
            end.col += 1;
        }

        let block = Block::kernel(seed, end);
        for row in seed.row..=end.row {
            for col in seed.col..=end.col {
                used.push(Point::new(row, col));
            }
        }
        regions.push(block);
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::FaceColorScheme;

    fn paint(cube: &mut FaceletCube, face: FaceId, cells: &[(i32, i32)], color: Color) {
        for &(row, col) in cells {
            cube.set_sticker(face, Point::new(row, col), color);
        }
    }

    #[test]
    fn finds_the_full_matching_rectangle() {
        let mut cube = FaceletCube::solved(5);
        paint(
            &mut cube,
            FaceId::Front,
            &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Color::Red,
        );
        let ranked = largest_block(&cube, FaceId::Front, Color::Red, Axis::X, None);
        let &(size, best) = ranked.first().unwrap();
        assert_eq!(size, 4);
        assert_eq!(best, Block::kernel(Point::new(0, 0), Point::new(1, 1)));
        // Degenerate sub-blocks from later seeds are reported too.
        assert!(ranked.iter().any(|&(s, _)| s == 1));
    }

    #[test]
    fn row_extension_wins_over_columns() {
        // An L-shape: the seed at (0,0) must grow down the column first and
        // ignore the wider top row.
        let mut cube = FaceletCube::solved(5);
        paint(
            &mut cube,
            FaceId::Front,
            &[(0, 0), (0, 1), (0, 2), (1, 0), (2, 0), (3, 0)],
            Color::Red,
        );
        let ranked = largest_block(&cube, FaceId::Front, Color::Red, Axis::X, None);
        let from_origin = ranked
            .iter()
            .find(|(_, b)| b.start == Point::new(0, 0))
            .unwrap();
        assert_eq!(from_origin.1.end, Point::new(3, 0));
    }

    #[test]
    fn search_is_deterministic() {
        fastrand::seed(3);
        let mut cube = FaceletCube::solved(5);
        cube.scramble(25);
        let first = largest_block(&cube, FaceId::Up, Color::White, Axis::Z, None);
        let second = largest_block(&cube, FaceId::Up, Color::White, Axis::Z, None);
        assert_eq!(first, second);
        assert!(first.windows(2).all(|w| w[0].0 >= w[1].0));
    }

    #[test]
    fn bounds_restrict_the_search() {
        let cube = FaceletCube::solved(5);
        let bounds = Block::kernel(Point::new(0, 0), Point::new(1, 1));
        let ranked = largest_block(
            &cube,
            FaceId::Front,
            FaceColorScheme::canonical().color_of(FaceId::Front),
            Axis::X,
            Some(bounds),
        );
        assert!(ranked.iter().all(|(_, b)| bounds.contains(b.start) && bounds.contains(b.end)));
        let &(size, _) = ranked.first().unwrap();
        assert_eq!(size, 4);
    }

    #[test]
    fn unsolved_regions_cover_each_wrong_cell_once() {
        let mut cube = FaceletCube::solved(5);
        paint(
            &mut cube,
            FaceId::Front,
            &[(0, 0), (0, 1), (1, 0), (1, 1), (3, 3)],
            Color::Red,
        );
        let tracked: Vec<Point> = (0..5)
            .flat_map(|row| (0..5).map(move |col| Point::new(row, col)))
            .collect();
        let green = FaceColorScheme::canonical().color_of(FaceId::Front);
        let regions = find_unsolved_target_regions(&cube, FaceId::Front, &tracked, green);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0], Block::kernel(Point::new(0, 0), Point::new(1, 1)));
        assert_eq!(regions[1], Block::single(Point::new(3, 3)));

        let total: i32 = regions.iter().map(|b| b.cell_count()).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn solved_faces_have_no_unsolved_regions() {
        let cube = FaceletCube::solved(4);
        let tracked: Vec<Point> = (0..4)
            .flat_map(|row| (0..4).map(move |col| Point::new(row, col)))
            .collect();
        let white = FaceColorScheme::canonical().color_of(FaceId::Up);
        assert!(find_unsolved_target_regions(&cube, FaceId::Up, &tracked, white).is_empty());
    }
}
