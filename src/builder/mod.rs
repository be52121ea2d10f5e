mod disjoint_set;
mod policy;

use std::sync::mpsc::SyncSender;

use rand::{Rng, SeedableRng, rngs::StdRng};

pub use disjoint_set::DisjointSet;
pub use policy::{choose_removal, neighbors};

use crate::{
    error::BuildError,
    maze::{GridEvent, Maze},
};

/// Get a random number generator, optionally seeded for reproducibility.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Finished maze plus carve statistics.
pub struct MazeResult {
    pub maze: Maze,
    pub walls_removed: u32,
}

/// Drives the two carving phases over one maze. Owns every piece of build
/// state; nothing survives across builds.
pub struct MazeBuilder {
    maze: Maze,
    subpaths: DisjointSet,
    walls_removed: u32,
    rng: StdRng,
}

impl MazeBuilder {
    pub fn new(
        side: u8,
        seed: Option<u64>,
        sender: Option<SyncSender<GridEvent>>,
    ) -> Result<Self, BuildError> {
        if side < 1 {
            return Err(BuildError::InvalidSize(side));
        }
        let maze = Maze::new(side, sender);
        let subpaths = DisjointSet::new(maze.num_cells());
        Ok(MazeBuilder {
            maze,
            subpaths,
            walls_removed: 0,
            rng: get_rng(seed),
        })
    }

    /// Runs both carving phases to completion and returns the finished
    /// maze. The event channel, if any, is closed on the way out so a
    /// listening renderer can drain and exit.
    pub fn build(mut self) -> MazeResult {
        self.spanning_phase();
        self.fill_phase();
        tracing::info!("[build] removed {} walls", self.walls_removed);
        self.maze.detach_events();
        MazeResult {
            maze: self.maze,
            walls_removed: self.walls_removed,
        }
    }

    /// Carves until the top-left and bottom-right cells are connected.
    /// Other cells may still be stranded in their own components after
    /// this returns.
    fn spanning_phase(&mut self) {
        let side = self.maze.side();
        let goal = self.maze.num_cells() - 1;
        while self.subpaths.find(0) != self.subpaths.find(goal) {
            let (i, j) = choose_removal(&mut self.rng, &mut self.subpaths, side, None);
            self.carve(i, j);
        }
        tracing::debug!(
            "[spanning] start and goal joined after {} walls, {} components left",
            self.walls_removed,
            self.subpaths.components()
        );
    }

    /// Carves until every cell has joined the start component. Each round
    /// forces the carve source to be a cell outside that component, so the
    /// frontier heuristic never applies here.
    fn fill_phase(&mut self) {
        let side = self.maze.side();
        let num_cells = self.maze.num_cells();
        while self.subpaths.components() > 1 {
            let path_root = self.subpaths.find(0);
            let stranded: Vec<u16> = (0..num_cells)
                .filter(|&c| self.subpaths.find(c) != path_root)
                .collect();
            let cell = stranded[self.rng.random_range(0..stranded.len())];
            let (i, j) = choose_removal(&mut self.rng, &mut self.subpaths, side, Some(cell));
            self.carve(i, j);
        }
    }

    /// Opens the wall between i and j and joins their components. The
    /// carve counter only moves when a closed wall actually opened.
    fn carve(&mut self, i: u16, j: u16) {
        if self.maze.remove_wall(i, j) {
            self.walls_removed += 1;
        }
        self.subpaths.union(i, j);
    }
}

/// Builds one maze. `side` is the number of cells along each edge; the
/// resulting bitmap is (10·side + 1) pixels square.
pub fn build_maze(side: u8, seed: Option<u64>) -> Result<MazeResult, BuildError> {
    build_maze_with_events(side, seed, None)
}

/// Same as [`build_maze`], but streams every pixel change over `sender`
/// while carving, for live rendering on another thread.
pub fn build_maze_with_events(
    side: u8,
    seed: Option<u64>,
    sender: Option<SyncSender<GridEvent>>,
) -> Result<MazeResult, BuildError> {
    Ok(MazeBuilder::new(side, seed, sender)?.build())
}
