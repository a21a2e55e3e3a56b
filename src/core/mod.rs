mod model_helpers;
mod models;
mod update;
mod bounds;
mod grid;
mod rover;

pub use models::{BlockReason, Command, Direction, MissionLog, MoveOutcome, RoverState, StepOutcome, StepRecord, Vec2};
pub use grid::{Grid, SharedGrid};
pub use rover::Rover;
pub use update::{apply, run};
