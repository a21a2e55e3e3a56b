use std::collections::HashSet;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use crate::config::MissionConfig;
use crate::console_interface::parse_commands;
use crate::core::{run, Command, Grid, MissionLog, Rover, SharedGrid, Vec2};
use crate::error::DriverError;
use crate::models::MissionReport;

/// Above this many cells, random placement samples coordinates instead of listing every free cell.
const ENUMERATE_CELL_LIMIT: i64 = 1 << 20;

/// A grid, a rover standing on it, and the commands it will receive.
pub struct Mission {
    pub grid: SharedGrid,
    pub rover: Rover,
    pub commands: Vec<Command>,
}

impl Mission {
    pub fn build(config: &MissionConfig) -> Result<Mission, DriverError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::build_with_rng(config, &mut rng)
    }

    pub fn build_with_rng<R: Rng>(config: &MissionConfig, rng: &mut R) -> Result<Mission, DriverError> {
        config.validate()?;

        let mut grid = Grid::new(config.width, config.height);
        for obstacle in &config.obstacles {
            grid.add_obstacle(obstacle.x, obstacle.y);
        }
        if config.random_obstacles > 0 {
            let placed = place_random_obstacles(&mut grid, config.random_obstacles, config.start, rng)?;
            debug!("placed random obstacles at {:?}", placed);
        }

        let grid = grid.shared();
        let rover = Rover::new(config.start.x, config.start.y, config.facing, grid.clone());
        let commands = parse_commands(&config.commands);
        info!(
            "mission on {}x{} grid with {} obstacles, rover at {}, {} commands",
            config.width,
            config.height,
            grid.borrow().obstacle_count(),
            rover.state(),
            commands.len()
        );

        Ok(Mission { grid, rover, commands })
    }

    pub fn execute(&mut self) -> MissionLog {
        run(&self.commands, &mut self.rover)
    }

    pub fn report(&self, log: MissionLog) -> MissionReport {
        let mut obstacles: Vec<Vec2> = self.grid.borrow().obstacles().copied().collect();
        obstacles.sort_by_key(|o| (o.y, o.x));
        MissionReport {
            final_state: self.rover.state(),
            status_report: self.rover.status_report(),
            moves_made: log.moves_made,
            moves_blocked: log.moves_blocked,
            obstacles,
            steps: log.steps,
        }
    }
}

/// Blocks `count` free in-bounds cells chosen at random, never the rover's start cell.
pub fn place_random_obstacles<R: Rng>(
    grid: &mut Grid,
    count: usize,
    avoid: Vec2,
    rng: &mut R,
) -> Result<Vec<Vec2>, DriverError> {
    let mut available = grid.free_cell_count();
    if grid.is_free(avoid.x, avoid.y) {
        available -= 1;
    }
    let requested = i64::try_from(count).unwrap_or(i64::MAX);
    if requested > available {
        return Err(DriverError::TooManyObstacles { requested: count, available });
    }

    // Sample only while at most half the free cells get filled. A denser
    // request has at most twice as many free cells as requested, so listing them is bounded.
    let dense = requested.saturating_mul(2) > available;
    let placed: Vec<Vec2> = if grid.area() <= ENUMERATE_CELL_LIMIT || dense {
        let (width, height) = (grid.width(), grid.height());
        (0..height)
            .flat_map(|y| (0..width).map(move |x| Vec2 { x, y }))
            .filter(|&cell| cell != avoid && grid.is_free(cell.x, cell.y))
            .choose_multiple(rng, count)
    } else {
        let mut seen = HashSet::with_capacity(count);
        let mut chosen = Vec::with_capacity(count);
        while chosen.len() < count {
            let cell = Vec2 {
                x: rng.gen_range(0..grid.width()),
                y: rng.gen_range(0..grid.height()),
            };
            if cell != avoid && grid.is_free(cell.x, cell.y) && seen.insert(cell) {
                chosen.push(cell);
            }
        }
        chosen
    };

    for cell in &placed {
        grid.add_obstacle(cell.x, cell.y);
    }
    Ok(placed)
}
