use serde::Serialize;
use crate::core::{Grid, RoverState, StepRecord, Vec2};

/// Final outcome of a mission, as printed or serialized by the driver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MissionReport {
    pub final_state: RoverState,
    pub status_report: String,
    pub moves_made: usize,
    pub moves_blocked: usize,
    pub obstacles: Vec<Vec2>,
    pub steps: Vec<StepRecord>,
}

pub struct MissionRenderState<'a> {
    pub grid: &'a Grid,
    pub report: &'a MissionReport,
}
