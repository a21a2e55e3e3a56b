use std::fmt;
use std::ops::Add;
use crate::core::{BlockReason, Command, Direction, MissionLog, MoveOutcome, RoverState, StepOutcome, StepRecord, Vec2};

const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// One step clockwise: North -> East -> South -> West -> North.
    pub fn right(self) -> Direction {
        DIRECTIONS[(self.index() + 1) % 4]
    }

    /// One step counter-clockwise, wrapping North back to West.
    pub fn left(self) -> Direction {
        DIRECTIONS[(self.index() + 3) % 4]
    }

    pub fn delta(self) -> Vec2 {
        match self {
            Direction::North => Vec2 { x: 0, y: 1 },
            Direction::South => Vec2 { x: 0, y: -1 },
            Direction::East => Vec2 { x: 1, y: 0 },
            Direction::West => Vec2 { x: -1, y: 0 },
        }
    }

    pub fn code(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    pub fn from_code(code: char) -> Option<Direction> {
        let code = code.to_ascii_uppercase();
        DIRECTIONS.into_iter().find(|d| d.code() == code)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            x: self.x.saturating_add(rhs.x),
            y: self.y.saturating_add(rhs.y),
        }
    }
}

impl Command {
    pub fn from_char(c: char) -> Option<Command> {
        match c.to_ascii_uppercase() {
            'M' => Some(Command::Move),
            'L' => Some(Command::TurnLeft),
            'R' => Some(Command::TurnRight),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Command::Move => 'M',
            Command::TurnLeft => 'L',
            Command::TurnRight => 'R',
        }
    }
}

impl From<MoveOutcome> for StepOutcome {
    fn from(outcome: MoveOutcome) -> Self {
        match outcome {
            MoveOutcome::Moved => StepOutcome::Moved,
            MoveOutcome::Blocked(reason) => StepOutcome::Blocked(reason),
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::OutOfBounds => write!(f, "out of bounds"),
            BlockReason::Obstacle => write!(f, "obstacle ahead"),
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Moved => write!(f, "moved"),
            StepOutcome::Blocked(reason) => write!(f, "blocked ({})", reason),
            StepOutcome::Turned => write!(f, "turned"),
        }
    }
}

impl RoverState {
    pub fn position(&self) -> Vec2 {
        Vec2 { x: self.x, y: self.y }
    }
}

impl fmt::Display for RoverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, '{}')", self.x, self.y, self.direction)
    }
}

impl MissionLog {
    pub fn record(&mut self, step: StepRecord) {
        match step.outcome {
            StepOutcome::Moved => self.moves_made += 1,
            StepOutcome::Blocked(_) => self.moves_blocked += 1,
            StepOutcome::Turned => {}
        }
        self.steps.push(step);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn four_right_turns_return_to_start() {
        for start in DIRECTIONS {
            let mut dir = start;
            for _ in 0..4 {
                dir = dir.right();
            }
            assert_eq!(dir, start);
        }
    }

    #[test]
    fn left_and_right_cancel() {
        for dir in DIRECTIONS {
            assert_eq!(dir.left().right(), dir);
            assert_eq!(dir.right().left(), dir);
        }
    }

    #[test]
    fn turning_wraps_at_the_ends() {
        assert_eq!(Direction::North.left(), Direction::West);
        assert_eq!(Direction::West.right(), Direction::North);
    }

    #[test]
    fn direction_codes_round_trip() {
        for dir in DIRECTIONS {
            assert_eq!(Direction::from_code(dir.code()), Some(dir));
        }
        assert_eq!(Direction::from_code('n'), Some(Direction::North));
        assert_eq!(Direction::from_code('Q'), None);
    }

    #[test]
    fn command_chars_map_to_commands() {
        assert_eq!(Command::from_char('M'), Some(Command::Move));
        assert_eq!(Command::from_char('l'), Some(Command::TurnLeft));
        assert_eq!(Command::from_char('R'), Some(Command::TurnRight));
        assert_eq!(Command::from_char('X'), None);
        for command in [Command::Move, Command::TurnLeft, Command::TurnRight] {
            assert_eq!(Command::from_char(command.as_char()), Some(command));
        }
    }

    #[test]
    fn state_displays_as_tuple() {
        let state = RoverState { x: 1, y: 3, direction: Direction::North };
        assert_eq!(state.to_string(), "(1, 3, 'N')");
    }

    #[test]
    fn log_counts_outcomes() {
        let state = RoverState { x: 0, y: 0, direction: Direction::North };
        let mut log = MissionLog::default();
        log.record(StepRecord { command: Command::Move, outcome: StepOutcome::Moved, state });
        log.record(StepRecord { command: Command::Move, outcome: StepOutcome::Blocked(BlockReason::Obstacle), state });
        log.record(StepRecord { command: Command::TurnLeft, outcome: StepOutcome::Turned, state });
        assert_eq!(log.moves_made, 1);
        assert_eq!(log.moves_blocked, 1);
        assert_eq!(log.steps.len(), 3);
        assert_eq!(log.steps.last().map(|s| s.outcome), Some(StepOutcome::Turned));
    }
}
