//! # grid_rescue
//!
//! The routing core of a grid-based rescue dispatch demo: a start cell
//! (the ambulance), a goal cell (the hospital) and obstacle cells are placed
//! on a fixed-size grid, and [RescueGrid::find_path] computes the shortest
//! obstacle-free path between them using
//! [A* search](https://en.wikipedia.org/wiki/A*_search_algorithm) guided by
//! the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry).
//! Movement is 4-directional with unit cost. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! The editing rules of the demo (tools, dispatch, marker playback) live in
//! [scenario]; rendering and timers are left to the caller.
mod astar;
pub mod scenario;

use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use log::{info, warn};
use petgraph::unionfind::UnionFind;

use crate::astar::astar_search;
use core::fmt;

/// Marker occupying a single grid cell. Only [Obstacle](Cell::Obstacle)
/// blocks movement; [PathMark](Cell::PathMark) highlights cells of the last
/// computed route and is as traversable as an empty cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Start,
    Goal,
    Obstacle,
    PathMark,
}

impl Cell {
    /// Whether a cell with this marker can be entered.
    pub fn traversable(self) -> bool {
        self != Cell::Obstacle
    }
}

/// The four axis-aligned neighbours of a point in up, right, down, left order.
pub fn cardinal_neighbours(p: Point) -> [Point; 4] {
    [
        Point::new(p.x, p.y - 1),
        Point::new(p.x + 1, p.y),
        Point::new(p.x, p.y + 1),
        Point::new(p.x - 1, p.y),
    ]
}

/// Manhattan distance between two points, which on an open 4-grid equals the
/// exact number of moves separating them.
pub fn manhattan_distance(a: &Point, b: &Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// [RescueGrid] holds the [Cell] markers of the demo board in a [SimpleGrid]
/// and maintains connected components of the open cells in a [UnionFind]
/// structure, 4-connected. Components let [find_path](Self::find_path) report
/// a disconnected start/goal pair without running a search. Implements
/// [Grid] on top of the cell storage; [set](Grid::set) keeps the components
/// in sync with tile placement and removal.
#[derive(Clone, Debug)]
pub struct RescueGrid {
    pub cells: SimpleGrid<Cell>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for RescueGrid {
    fn default() -> RescueGrid {
        RescueGrid {
            cells: SimpleGrid::default(),
            components: UnionFind::new(0),
            components_dirty: false,
        }
    }
}

impl RescueGrid {
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.cells.index_in_bounds(x as usize, y as usize)
    }
    /// Whether pos is on the grid and not blocked by an obstacle marker.
    pub fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && self.cells.get_point(pos).traversable()
    }
    /// Whether pos carries an obstacle marker. Out-of-bounds positions are
    /// not obstacles, merely unreachable.
    pub fn is_obstacle(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && self.cells.get_point(pos) == Cell::Obstacle
    }
    fn open_neighbours(&self, point: Point) -> Vec<Point> {
        cardinal_neighbours(point)
            .into_iter()
            .filter(|p| self.can_move_to(*p))
            .collect::<Vec<Point>>()
    }
    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.cells.get_ix_point(point))
    }
    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start.x, start.y) && self.in_bounds(goal.x, goal.y) {
            let start_ix = self.cells.get_ix_point(start);
            let goal_ix = self.cells.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }
    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up cardinal grid
    /// neighbours to the same components.
    pub fn generate_components(&mut self) {
        let w = self.cells.width;
        let h = self.cells.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w {
            for y in 0..h {
                if self.cells.get(x, y).traversable() {
                    let parent_ix = self.cells.get_ix(x, y);
                    let point = Point::new(x as i32, y as i32);
                    let neighbours = vec![
                        Point::new(point.x + 1, point.y),
                        Point::new(point.x, point.y + 1),
                    ]
                    .into_iter()
                    .filter(|p| self.can_move_to(*p))
                    .map(|p| self.cells.get_ix(p.x as usize, p.y as usize))
                    .collect::<Vec<usize>>();
                    for ix in neighbours {
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }

    /// Computes a shortest path from start to goal, inclusive of both, using
    /// A* with the Manhattan distance as heuristic. Returns [None] if the
    /// goal is not reachable from the start. A returned path is never empty:
    /// if start and goal coincide it is just that single point.
    ///
    /// The start and goal cells themselves are traversable regardless of
    /// their marker; only candidate neighbour cells are tested for obstacle
    /// markers. Ties on the estimated total cost are broken towards nodes
    /// closer to the goal, so repeated searches on an unchanged grid return
    /// the same path.
    pub fn find_path(&self, start: Point, goal: Point) -> Option<Vec<Point>> {
        // The component check only answers for current components in which
        // both endpoints take part.
        let endpoints_open = !self.is_obstacle(start) && !self.is_obstacle(goal);
        let components_usable = endpoints_open && !self.components_dirty;
        if components_usable && self.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return None;
        }
        let result = astar_search(
            &start,
            |node| {
                cardinal_neighbours(*node)
                    .into_iter()
                    .filter(|p| *p == goal || self.can_move_to(*p))
                    .map(|p| (p, 1))
                    .collect::<Vec<(Point, i32)>>()
            },
            |point| manhattan_distance(point, &goal),
            |point| *point == goal,
        );
        if result.is_none() && components_usable {
            warn!(
                "components claim {} is reachable from {} but no path was found",
                goal, start
            );
        }
        result.map(|(path, _cost)| path)
    }
}

impl fmt::Display for RescueGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.cells.height {
            for x in 0..self.cells.width {
                let c = match self.cells.get(x, y) {
                    Cell::Empty => '.',
                    Cell::Start => 'S',
                    Cell::Goal => 'G',
                    Cell::Obstacle => '#',
                    Cell::PathMark => '*',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Grid<Cell> for RescueGrid {
    fn new(width: usize, height: usize, default_value: Cell) -> Self {
        RescueGrid {
            cells: SimpleGrid::new(width, height, default_value),
            components: UnionFind::new(width * height),
            components_dirty: false,
        }
    }
    fn get(&self, x: usize, y: usize) -> Cell {
        self.cells.get(x, y)
    }
    /// Updates a position on the grid. Joins newly connected components and
    /// flags the components as dirty if they are (potentially) broken apart.
    fn set(&mut self, x: usize, y: usize, value: Cell) {
        let p = Point::new(x as i32, y as i32);
        let was_blocked = !self.cells.get(x, y).traversable();
        let now_blocked = !value.traversable();
        if now_blocked && !was_blocked {
            self.components_dirty = true;
        } else if was_blocked && !now_blocked {
            self.cells.set(x, y, value);
            for n in self.open_neighbours(p) {
                self.components.union(
                    self.cells.get_ix(x, y),
                    self.cells.get_ix(n.x as usize, n.y as usize),
                );
            }
            return;
        }
        self.cells.set(x, y, value);
    }
    fn width(&self) -> usize {
        self.cells.width()
    }
    fn height(&self) -> usize {
        self.cells.height()
    }
}
