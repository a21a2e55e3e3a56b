use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use crate::core::bounds::BoundsOriginRoot;
use crate::core::Vec2;

/// Handle through which a driver and its rover share one grid.
/// The driver is the only writer; rovers only ever take shared borrows.
pub type SharedGrid = Rc<RefCell<Grid>>;

/// Fixed size plane with a set of blocked cells.
///
/// Obstacles are not required to lie inside the bounds; one placed outside
/// can never be reached because the bounds check rejects it first.
#[derive(Clone, Debug)]
pub struct Grid {
    bounds: BoundsOriginRoot,
    obstacles: HashSet<Vec2>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Grid {
            bounds: BoundsOriginRoot::new(width, height),
            obstacles: HashSet::new(),
        }
    }

    pub fn shared(self) -> SharedGrid {
        Rc::new(RefCell::new(self))
    }

    pub fn width(&self) -> i32 {
        self.bounds.extent.x
    }

    pub fn height(&self) -> i32 {
        self.bounds.extent.y
    }

    pub fn area(&self) -> i64 {
        self.bounds.area()
    }

    pub fn add_obstacle(&mut self, x: i32, y: i32) {
        self.obstacles.insert(Vec2 { x, y });
    }

    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        self.bounds.contains(&Vec2 { x, y })
    }

    pub fn is_obstacle(&self, x: i32, y: i32) -> bool {
        self.obstacles.contains(&Vec2 { x, y })
    }

    pub fn is_free(&self, x: i32, y: i32) -> bool {
        self.is_inside(x, y) && !self.is_obstacle(x, y)
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Vec2> {
        self.obstacles.iter()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Number of in-bounds cells not covered by an obstacle.
    pub fn free_cell_count(&self) -> i64 {
        let blocked_inside = self
            .obstacles
            .iter()
            .filter(|o| self.bounds.contains(o))
            .count() as i64;
        self.area() - blocked_inside
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn inside_covers_half_open_range() {
        let grid = Grid::new(3, 2);
        assert!(grid.is_inside(0, 0));
        assert!(grid.is_inside(2, 1));
        assert!(!grid.is_inside(3, 0));
        assert!(!grid.is_inside(0, 2));
        assert!(!grid.is_inside(-1, 0));
        assert!(!grid.is_inside(0, -1));
    }

    #[test]
    fn inside_ignores_obstacles() {
        let mut grid = Grid::new(3, 3);
        grid.add_obstacle(1, 1);
        assert!(grid.is_inside(1, 1));
        assert!(!grid.is_free(1, 1));
    }

    #[test]
    fn adding_obstacle_twice_is_idempotent() {
        let mut grid = Grid::new(5, 5);
        grid.add_obstacle(2, 3);
        grid.add_obstacle(2, 3);
        assert_eq!(grid.obstacle_count(), 1);
        assert!(grid.is_obstacle(2, 3));
        assert!(!grid.is_obstacle(3, 2));
    }

    #[test]
    fn obstacle_outside_bounds_is_recorded() {
        let mut grid = Grid::new(2, 2);
        grid.add_obstacle(-4, 7);
        assert!(grid.is_obstacle(-4, 7));
        assert!(!grid.is_inside(-4, 7));
        assert_eq!(grid.free_cell_count(), 4);
    }

    #[test]
    fn free_cells_subtract_inside_obstacles() {
        let mut grid = Grid::new(10, 10);
        grid.add_obstacle(2, 2);
        grid.add_obstacle(3, 5);
        assert_eq!(grid.free_cell_count(), 98);
    }
}
