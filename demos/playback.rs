use grid_rescue::scenario::{Scenario, Tool};
use grid_util::point::Point;

// Drives the full demo loop without a UI: place the ambulance, the hospital
// and a wall of cones, dispatch, then step the marker along the route the
// way an animation timer would.
fn main() {
    let mut scenario = Scenario::default();
    scenario.apply_tool(Tool::Start, Point::new(0, 0));
    scenario.apply_tool(Tool::Goal, Point::new(9, 9));
    for y in 0..9 {
        scenario.apply_tool(Tool::Obstacle, Point::new(5, y));
    }
    let route_len = scenario.dispatch().expect("both endpoints are placed").len();
    println!("Route of {} cells:", route_len);
    println!("{}", scenario.grid);
    let mut position = scenario.marker();
    while let Some(p) = position {
        println!("ambulance at {}", p);
        position = scenario.advance_marker();
    }
}
