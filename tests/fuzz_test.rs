/// Fuzzes the routing core by checking for many random boards that a path is
/// found exactly when the goal is reachable from the start by being part of
/// the same connected component, that every found path is a valid walk, and
/// that its length matches a breadth-first reference search.
use grid_rescue::{cardinal_neighbours, manhattan_distance, Cell, RescueGrid};
use grid_util::grid::Grid;
use grid_util::point::Point;
use rand::prelude::*;
use std::collections::VecDeque;

fn random_grid(w: usize, h: usize, rng: &mut StdRng) -> RescueGrid {
    let mut grid = RescueGrid::new(w, h, Cell::Empty);
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            if rng.gen_bool(0.4) {
                grid.set(x, y, Cell::Obstacle);
            }
        }
    }
    grid.generate_components();
    grid
}

fn visualize_grid(grid: &RescueGrid, start: &Point, end: &Point) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.is_obstacle(p) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

/// Reference shortest distance in moves, or None if the goal is cut off.
/// Plain breadth-first search, valid because all edges cost one.
fn bfs_distance(grid: &RescueGrid, start: Point, goal: Point) -> Option<usize> {
    let mut seen = vec![false; grid.width() * grid.height()];
    let mut queue = VecDeque::new();
    seen[grid.cells.get_ix_point(&start)] = true;
    queue.push_back((start, 0));
    while let Some((p, d)) = queue.pop_front() {
        if p == goal {
            return Some(d);
        }
        for n in cardinal_neighbours(p) {
            if (n == goal || grid.can_move_to(n)) && !seen[grid.cells.get_ix_point(&n)] {
                seen[grid.cells.get_ix_point(&n)] = true;
                queue.push_back((n, d + 1));
            }
        }
    }
    None
}

#[test]
fn fuzz_reachability() {
    const N: usize = 10;
    const N_GRIDS: usize = 10000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng);
        grid.set_point(start, Cell::Start);
        grid.set_point(end, Cell::Goal);
        grid.update();
        let reachable = grid.reachable(&start, &end);
        let path = grid.find_path(start, end);
        // Show the grid if the outcomes disagree
        if path.is_some() != reachable {
            visualize_grid(&grid, &start, &end);
        }
        assert!(path.is_some() == reachable);
    }
}

#[test]
fn fuzz_path_validity_and_optimality() {
    const N: usize = 8;
    const N_GRIDS: usize = 10000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng);
        let start = Point::new(rng.gen_range(0..N) as i32, rng.gen_range(0..N) as i32);
        let end = Point::new(rng.gen_range(0..N) as i32, rng.gen_range(0..N) as i32);
        grid.set_point(start, Cell::Start);
        if end != start {
            grid.set_point(end, Cell::Goal);
        }
        grid.update();
        let reference = bfs_distance(&grid, start, end);
        match grid.find_path(start, end) {
            Some(path) => {
                assert_eq!(path[0], start);
                assert_eq!(*path.last().unwrap(), end);
                for pair in path.windows(2) {
                    assert_eq!(manhattan_distance(&pair[0], &pair[1]), 1);
                }
                for p in &path {
                    if *p != start && *p != end {
                        assert!(!grid.is_obstacle(*p));
                    }
                }
                assert_eq!(Some(path.len() - 1), reference);
            }
            None => {
                if reference.is_some() {
                    visualize_grid(&grid, &start, &end);
                }
                assert_eq!(reference, None);
            }
        }
    }
}
