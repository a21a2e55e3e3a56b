use log::debug;
use crate::core::{BlockReason, Direction, MoveOutcome, RoverState, SharedGrid, Vec2};

pub struct Rover {
    position: Vec2,
    direction: Direction,
    grid: SharedGrid,
}

impl Rover {
    /// Places a rover on `grid`. The starting pose is taken as given, even
    /// when it is out of bounds or on an obstacle.
    pub fn new(x: i32, y: i32, direction: Direction, grid: SharedGrid) -> Self {
        Rover {
            position: Vec2 { x, y },
            direction,
            grid,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.position.x, self.position.y)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> RoverState {
        RoverState {
            x: self.position.x,
            y: self.position.y,
            direction: self.direction,
        }
    }

    /// Steps one cell forward, or stays put when that cell is off the grid or blocked.
    pub fn move_forward(&mut self) -> MoveOutcome {
        let next = self.position + self.direction.delta();
        let grid = self.grid.borrow();

        if !grid.is_inside(next.x, next.y) {
            debug!("move to ({}, {}) rejected: out of bounds", next.x, next.y);
            return MoveOutcome::Blocked(BlockReason::OutOfBounds);
        }
        if grid.is_obstacle(next.x, next.y) {
            debug!("move to ({}, {}) rejected: obstacle", next.x, next.y);
            return MoveOutcome::Blocked(BlockReason::Obstacle);
        }

        self.position = next;
        MoveOutcome::Moved
    }

    pub fn turn_left(&mut self) {
        self.direction = self.direction.left();
    }

    pub fn turn_right(&mut self) {
        self.direction = self.direction.right();
    }

    pub fn status_report(&self) -> String {
        format!(
            "Rover is at ({}, {}) facing {}. No Obstacles detected.",
            self.position.x, self.position.y, self.direction
        )
    }
}
