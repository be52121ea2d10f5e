use rand::{Rng, rngs::StdRng};

use super::disjoint_set::DisjointSet;

/// How many rejected draws the frontier heuristic tolerates per cell drawn,
/// before it relaxes. Small grids can reach layouts where no cell touches
/// two foreign components while the maze is still disconnected; past the
/// cap any cell bordering a foreign component is accepted.
const REJECTIONS_PER_CELL: u32 = 64;

/// In-bounds neighbors of a cell, in the order right, left, up, down.
pub fn neighbors(cell: u16, side: u8) -> Vec<u16> {
    let n = side as u16;
    let num_cells = n * n;
    if cell >= num_cells {
        panic!("cell id {} is out of bounds", cell);
    }
    let mut candidates = Vec::with_capacity(4);
    if cell % n != n - 1 {
        candidates.push(cell + 1);
    }
    if cell % n != 0 {
        candidates.push(cell - 1);
    }
    if cell >= n {
        candidates.push(cell - n);
    }
    if cell < num_cells - n {
        candidates.push(cell + n);
    }
    candidates
}

/// Number of `cell`'s neighbors sitting in a different component.
fn frontier_degree(cell: u16, side: u8, subpaths: &mut DisjointSet) -> usize {
    let root = subpaths.find(cell);
    neighbors(cell, side)
        .into_iter()
        .filter(|&c| subpaths.find(c) != root)
        .count()
}

/// Picks the next wall to carve, as a (cell, neighbor) pair.
///
/// Without a forced cell the source is drawn uniformly from the whole grid
/// and rejected while fewer than two of its neighbors belong to foreign
/// components. Rejecting those cells steers carving away from the inside
/// of regions that are already open. A forced cell skips the heuristic
/// entirely; the wall is then a uniform draw over all of its candidates.
///
/// # Panics
/// If the source cell has no in-bounds neighbors (a 1×1 grid never gets
/// here, so this signals a caller bug).
pub fn choose_removal(
    rng: &mut StdRng,
    subpaths: &mut DisjointSet,
    side: u8,
    forced: Option<u16>,
) -> (u16, u16) {
    let num_cells = side as u16 * side as u16;
    let rejection_cap = REJECTIONS_PER_CELL * num_cells as u32;
    let mut rejections = 0u32;
    loop {
        let cell = match forced {
            Some(c) => c,
            None => rng.random_range(0..num_cells),
        };
        let candidates = neighbors(cell, side);
        if candidates.is_empty() {
            panic!("cell {} has no neighbors to carve toward", cell);
        }
        if forced.is_none() {
            let degree = frontier_degree(cell, side, subpaths);
            let wanted = if rejections < rejection_cap { 2 } else { 1 };
            if degree < wanted {
                rejections += 1;
                continue;
            }
        }
        let neighbor = candidates[rng.random_range(0..candidates.len())];
        return (cell, neighbor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_neighbors_interior() {
        // Cell 4 is the center of a 3x3 grid
        assert_eq!(neighbors(4, 3), vec![5, 3, 1, 7]);
    }

    #[test]
    fn test_neighbors_corners() {
        assert_eq!(neighbors(0, 3), vec![1, 3]);
        assert_eq!(neighbors(2, 3), vec![1, 5]);
        assert_eq!(neighbors(6, 3), vec![7, 3]);
        assert_eq!(neighbors(8, 3), vec![7, 5]);
    }

    #[test]
    fn test_neighbors_edges() {
        assert_eq!(neighbors(1, 3), vec![2, 0, 4]);
        assert_eq!(neighbors(3, 3), vec![4, 0, 6]);
        assert_eq!(neighbors(5, 3), vec![4, 2, 8]);
        assert_eq!(neighbors(7, 3), vec![8, 6, 4]);
    }

    #[test]
    fn test_neighbors_single_cell_grid() {
        assert!(neighbors(0, 1).is_empty());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_neighbors_out_of_bounds() {
        neighbors(9, 3);
    }

    #[test]
    fn test_choose_removal_returns_adjacent_pair() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut subpaths = DisjointSet::new(9);
        for _ in 0..50 {
            let (i, j) = choose_removal(&mut rng, &mut subpaths, 3, None);
            assert!(neighbors(i, 3).contains(&j));
        }
    }

    #[test]
    fn test_unforced_draw_prefers_frontier_cells() {
        // Merge the top-left 2x2 block of a 3x3 grid into one component;
        // cells 0, 1, and 3 then have at most one foreign neighbor left
        // and must never be accepted as carve sources
        let mut rng = StdRng::seed_from_u64(11);
        let mut subpaths = DisjointSet::new(9);
        subpaths.union(0, 1);
        subpaths.union(0, 3);
        subpaths.union(0, 4);
        for _ in 0..100 {
            let (i, _) = choose_removal(&mut rng, &mut subpaths, 3, None);
            let root = subpaths.find(i);
            let degree = neighbors(i, 3)
                .into_iter()
                .filter(|&c| subpaths.find(c) != root)
                .count();
            assert!(degree >= 2, "accepted cell {} has frontier degree {}", i, degree);
        }
    }

    #[test]
    fn test_forced_cell_skips_heuristic() {
        // All of cell 0's neighbors share its component, so an unforced
        // draw would reject it forever; the forced path must return at once
        let mut rng = StdRng::seed_from_u64(3);
        let mut subpaths = DisjointSet::new(4);
        subpaths.union(0, 1);
        subpaths.union(0, 2);
        let (i, j) = choose_removal(&mut rng, &mut subpaths, 2, Some(0));
        assert_eq!(i, 0);
        assert!(j == 1 || j == 2);
    }

    #[test]
    fn test_rejection_cap_relaxes_on_deadlocked_lattice() {
        // Two horizontal dominoes on a 2x2 grid: every cell has exactly one
        // foreign neighbor, so the strict heuristic rejects all of them
        let mut rng = StdRng::seed_from_u64(5);
        let mut subpaths = DisjointSet::new(4);
        subpaths.union(0, 1);
        subpaths.union(2, 3);
        let (i, j) = choose_removal(&mut rng, &mut subpaths, 2, None);
        assert!(neighbors(i, 2).contains(&j));
    }
}
