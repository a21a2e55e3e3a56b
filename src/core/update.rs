use log::{info, trace};
use crate::core::{Command, MissionLog, Rover, StepOutcome, StepRecord};

pub fn apply(command: Command, rover: &mut Rover) -> StepOutcome {
    match command {
        Command::Move => rover.move_forward().into(),
        Command::TurnLeft => {
            rover.turn_left();
            StepOutcome::Turned
        }
        Command::TurnRight => {
            rover.turn_right();
            StepOutcome::Turned
        }
    }
}

/// Applies `commands` in order. Each command sees only the state left by the previous one.
pub fn run(commands: &[Command], rover: &mut Rover) -> MissionLog {
    let mut log = MissionLog::default();
    for &command in commands {
        let outcome = apply(command, rover);
        let state = rover.state();
        trace!("{} -> {} at {}", command.as_char(), outcome, state);
        log.record(StepRecord { command, outcome, state });
    }
    info!(
        "ran {} commands: {} moves made, {} blocked",
        commands.len(),
        log.moves_made,
        log.moves_blocked
    );
    log
}
