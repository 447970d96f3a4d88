use grid_rescue::{Cell, RescueGrid};
use grid_util::grid::Grid;
use grid_util::point::Point;
use grid_util::rect::Rect;

// In this example a route is found on a 10x10 board with an L-shaped wall
// between the ambulance (S) and the hospital (G):
// S.........
// .###......
// ...#......
// ...#......
// ....G.....
// ...
fn main() {
    let mut grid: RescueGrid = RescueGrid::new(10, 10, Cell::Empty);
    grid.set_rectangle(&Rect::new(1, 1, 3, 1), Cell::Obstacle);
    grid.set_rectangle(&Rect::new(3, 2, 1, 2), Cell::Obstacle);
    grid.generate_components();
    println!("{}", grid);
    let start = Point::new(0, 0);
    let goal = Point::new(4, 4);
    if let Some(path) = grid.find_path(start, goal) {
        println!("A route has been found:");
        for p in path {
            println!("{:?}", p);
        }
    }
}
