//! Editable board state for the rescue demo: tool-based cell placement,
//! dispatching the ambulance and stepping it along the computed route.
//!
//! The rules here mirror what the demo UI enforces at the boundary of the
//! routing core: at most one start and one goal marker, no obstacle on top
//! of either, no edits or re-dispatch while a route is being played back.
//! The playback clock itself stays external; callers invoke
//! [advance_marker](Scenario::advance_marker) once per animation tick.

use grid_util::grid::Grid;
use grid_util::point::Point;
use log::debug;
use thiserror::Error;

use crate::{Cell, RescueGrid};

/// Side length of the reference demo board.
pub const DEFAULT_GRID_SIZE: usize = 10;

/// Editing tool selected in the demo toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Start,
    Goal,
    Obstacle,
    Eraser,
}

/// Why a dispatch request was refused. An unreachable goal is not an error;
/// it is reported through [Scenario::no_path_found] and an empty route.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no start cell has been placed")]
    MissingStart,
    #[error("no goal cell has been placed")]
    MissingGoal,
    #[error("a route is still being played back")]
    PlaybackActive,
}

/// A demo board: the cell grid plus the editing and playback bookkeeping the
/// surrounding UI needs. Direct edits through [grid](Self::grid) bypass the
/// tool rules; use [apply_tool](Self::apply_tool) to keep the start and goal
/// tracking consistent with the markers.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub grid: RescueGrid,
    start: Option<Point>,
    goal: Option<Point>,
    route: Vec<Point>,
    marker: Option<usize>,
    animating: bool,
    no_path: bool,
}

impl Default for Scenario {
    fn default() -> Scenario {
        Scenario::new(DEFAULT_GRID_SIZE)
    }
}

impl Scenario {
    /// Creates an empty square board with the given side length.
    pub fn new(size: usize) -> Scenario {
        Scenario {
            grid: RescueGrid::new(size, size, Cell::Empty),
            start: None,
            goal: None,
            route: Vec::new(),
            marker: None,
            animating: false,
            no_path: false,
        }
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }
    /// The route computed by the last dispatch; empty if none was found or
    /// none was requested yet.
    pub fn route(&self) -> &[Point] {
        &self.route
    }
    /// Whether the last dispatch failed to find a route.
    pub fn no_path_found(&self) -> bool {
        self.no_path
    }
    /// Whether a dispatched route is still being played back.
    pub fn is_animating(&self) -> bool {
        self.animating
    }
    /// The ambulance position while a route is armed.
    pub fn marker(&self) -> Option<Point> {
        self.marker.map(|ix| self.route[ix])
    }

    /// Applies a tool to a board cell, returning whether the edit was
    /// accepted. Edits are refused while a route is being played back, for
    /// out-of-bounds positions, for an obstacle aimed at the start or goal
    /// cell, and for a start aimed at the goal cell or vice versa. Placing a
    /// start or goal clears the previous marker of that kind; the eraser
    /// unsets start/goal tracking when it hits them. Any accepted edit
    /// drops the stored route and its highlight marks.
    pub fn apply_tool(&mut self, tool: Tool, pos: Point) -> bool {
        if self.animating || !self.grid.in_bounds(pos.x, pos.y) {
            return false;
        }
        self.no_path = false;
        match tool {
            Tool::Eraser => {
                self.clear_route();
                match self.grid.cells.get_point(pos) {
                    Cell::Start => self.start = None,
                    Cell::Goal => self.goal = None,
                    _ => {}
                }
                self.grid.set_point(pos, Cell::Empty);
            }
            Tool::Start => {
                if self.goal == Some(pos) {
                    return false;
                }
                self.clear_route();
                if let Some(old) = self.start.replace(pos) {
                    self.grid.set_point(old, Cell::Empty);
                }
                self.grid.set_point(pos, Cell::Start);
            }
            Tool::Goal => {
                if self.start == Some(pos) {
                    return false;
                }
                self.clear_route();
                if let Some(old) = self.goal.replace(pos) {
                    self.grid.set_point(old, Cell::Empty);
                }
                self.grid.set_point(pos, Cell::Goal);
            }
            Tool::Obstacle => {
                if self.start == Some(pos) || self.goal == Some(pos) {
                    return false;
                }
                self.clear_route();
                self.grid.set_point(pos, Cell::Obstacle);
            }
        }
        debug!("applied {:?} at {}", tool, pos);
        true
    }

    /// Runs the routing core for the placed start and goal. On success the
    /// route cells are highlighted, the marker is armed on the start cell
    /// and playback begins. An unreachable goal yields an empty route and
    /// sets the no-path flag.
    pub fn dispatch(&mut self) -> Result<&[Point], DispatchError> {
        if self.animating {
            return Err(DispatchError::PlaybackActive);
        }
        let start = self.start.ok_or(DispatchError::MissingStart)?;
        let goal = self.goal.ok_or(DispatchError::MissingGoal)?;
        self.clear_route();
        self.no_path = false;
        self.grid.update();
        match self.grid.find_path(start, goal) {
            Some(route) => {
                if route.len() > 2 {
                    for p in &route[1..route.len() - 1] {
                        if self.grid.cells.get_point(*p) == Cell::Empty {
                            self.grid.set_point(*p, Cell::PathMark);
                        }
                    }
                }
                self.marker = Some(0);
                self.animating = route.len() > 1;
                self.route = route;
            }
            None => {
                self.no_path = true;
            }
        }
        Ok(&self.route)
    }

    /// Advances the marker one step along the route, returning its new
    /// position, or [None] once playback has ended. Playback ends on the
    /// goal cell; the marker stays there until the next edit or dispatch.
    pub fn advance_marker(&mut self) -> Option<Point> {
        if !self.animating {
            return None;
        }
        let ix = self.marker.unwrap_or(0) + 1;
        self.marker = Some(ix);
        if ix + 1 == self.route.len() {
            self.animating = false;
        }
        Some(self.route[ix])
    }

    /// Removes all obstacle markers, keeping start and goal in place.
    pub fn clear_obstacles(&mut self) {
        if self.animating {
            return;
        }
        self.no_path = false;
        self.clear_route();
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                if self.grid.get(x, y) == Cell::Obstacle {
                    self.grid.set(x, y, Cell::Empty);
                }
            }
        }
    }

    /// Returns the board to its initial empty state.
    pub fn reset(&mut self) {
        if self.animating {
            return;
        }
        *self = Scenario::new(self.grid.width());
    }

    /// Forgets the stored route and erases its highlight marks.
    fn clear_route(&mut self) {
        for p in &self.route {
            if self.grid.cells.get_point(*p) == Cell::PathMark {
                self.grid.cells.set_point(*p, Cell::Empty);
            }
        }
        self.route.clear();
        self.marker = None;
        self.animating = false;
    }
}
