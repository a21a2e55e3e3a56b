use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "N", alias = "n", alias = "North")]
    North,
    #[serde(rename = "E", alias = "e", alias = "East")]
    East,
    #[serde(rename = "S", alias = "s", alias = "South")]
    South,
    #[serde(rename = "W", alias = "w", alias = "West")]
    West,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Move,
    TurnLeft,
    TurnRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockReason {
    OutOfBounds,
    Obstacle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    Moved,
    Blocked(BlockReason),
}

/// What a single applied command did to the rover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepOutcome {
    Moved,
    Blocked(BlockReason),
    Turned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoverState {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub command: Command,
    pub outcome: StepOutcome,
    pub state: RoverState,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionLog {
    pub steps: Vec<StepRecord>,
    pub moves_made: usize,
    pub moves_blocked: usize,
}
