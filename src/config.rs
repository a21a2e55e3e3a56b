use std::fs;
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use crate::core::{Direction, Vec2};
use crate::error::DriverError;

pub const DEFAULT_GRID_SIZE: i32 = 10;
pub const DEFAULT_COMMANDS: &str = "MMRMLM";
/// `--commands` value that means "read the command string from standard input".
pub const STDIN_COMMANDS: &str = "-";

/// Drive a rover across a grid of obstacles and report where it ends up.
#[derive(Parser, Debug)]
#[command(name = "rover-sim", version, about)]
pub struct Args {
    /// Grid dimensions as WIDTHxHEIGHT; overrides --width and --height.
    #[arg(long, value_name = "WxH", value_parser = parse_grid_size)]
    pub grid: Option<Vec2>,
    /// Number of columns in the grid.
    #[arg(long, value_name = "COLUMNS", default_value_t = DEFAULT_GRID_SIZE)]
    pub width: i32,
    /// Number of rows in the grid.
    #[arg(long, value_name = "ROWS", default_value_t = DEFAULT_GRID_SIZE)]
    pub height: i32,
    /// Blocked cell as X,Y. May be given more than once.
    #[arg(long = "obstacle", value_name = "X,Y", value_parser = parse_pair)]
    pub obstacles: Vec<Vec2>,
    /// Scatter this many obstacles over random free cells.
    #[arg(long, value_name = "COUNT", default_value_t = 0)]
    pub random_obstacles: usize,
    /// Seed for --random-obstacles so a layout can be reproduced.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
    /// Starting cell as X,Y.
    #[arg(long, value_name = "X,Y", value_parser = parse_pair, default_value = "0,0")]
    pub start: Vec2,
    /// Starting heading: N, E, S or W.
    #[arg(long, value_name = "DIR", value_parser = parse_direction, default_value = "N")]
    pub facing: Direction,
    /// Command string of M (move), L (turn left) and R (turn right); `-` reads it from standard input.
    #[arg(long, value_name = "COMMANDS", default_value = DEFAULT_COMMANDS)]
    pub commands: String,
    /// Read the command string from standard input.
    #[arg(long, conflicts_with_all = ["commands", "mission"])]
    pub stdin: bool,
    /// Load the whole mission from a JSON file instead of the flags above.
    #[arg(long, value_name = "FILE", conflicts_with = "interactive")]
    pub mission: Option<PathBuf>,
    /// Prompt for grid size and commands on the terminal.
    #[arg(long)]
    pub interactive: bool,
    /// Output format of the final report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// List every command and its outcome in text output.
    #[arg(long)]
    pub trace: bool,
    /// Show the final grid in a terminal view.
    #[arg(long)]
    pub view: bool,
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Everything needed to build and run one simulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionConfig {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub obstacles: Vec<Vec2>,
    #[serde(default)]
    pub random_obstacles: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub start: Vec2,
    #[serde(default = "default_facing")]
    pub facing: Direction,
    #[serde(default)]
    pub commands: String,
}

fn default_facing() -> Direction {
    Direction::North
}

impl Default for MissionConfig {
    fn default() -> Self {
        MissionConfig {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
            obstacles: Vec::new(),
            random_obstacles: 0,
            seed: None,
            start: Vec2::default(),
            facing: Direction::North,
            commands: DEFAULT_COMMANDS.to_string(),
        }
    }
}

impl MissionConfig {
    pub fn from_args(args: &Args) -> Self {
        let (width, height) = match args.grid {
            Some(size) => (size.x, size.y),
            None => (args.width, args.height),
        };
        MissionConfig {
            width,
            height,
            obstacles: args.obstacles.clone(),
            random_obstacles: args.random_obstacles,
            seed: args.seed,
            start: args.start,
            facing: args.facing,
            commands: args.commands.clone(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DriverError> {
        let config: MissionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, DriverError> {
        let json = fs::read_to_string(path).map_err(|source| DriverError::MissionFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), DriverError> {
        if self.width < 1 || self.height < 1 {
            return Err(DriverError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

pub fn parse_int(field: &'static str, s: &str) -> Result<i32, DriverError> {
    s.trim()
        .parse::<i32>()
        .map_err(|_| DriverError::invalid_number(field, s.trim()))
}

pub fn parse_pair(s: &str) -> Result<Vec2, DriverError> {
    let Some((x, y)) = s.split_once(',') else {
        return Err(DriverError::InvalidPair(s.to_string()));
    };
    let x = parse_int("x coordinate", x)?;
    let y = parse_int("y coordinate", y)?;
    Ok(Vec2 { x, y })
}

pub fn parse_grid_size(s: &str) -> Result<Vec2, DriverError> {
    let Some((w, h)) = s.split_once(['x', 'X']) else {
        return Err(DriverError::InvalidGridSize(s.to_string()));
    };
    let width = parse_int("grid width", w)?;
    let height = parse_int("grid height", h)?;
    Ok(Vec2 { x: width, y: height })
}

pub fn parse_direction(s: &str) -> Result<Direction, DriverError> {
    let trimmed = s.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Direction::from_code(c),
        _ => None,
    }
    .ok_or_else(|| DriverError::UnknownDirection(trimmed.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_pairs_with_spaces() {
        assert_eq!(parse_pair("2, 3").unwrap(), Vec2 { x: 2, y: 3 });
        assert_eq!(parse_pair("-1,0").unwrap(), Vec2 { x: -1, y: 0 });
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(matches!(parse_pair("23"), Err(DriverError::InvalidPair(_))));
        assert!(matches!(
            parse_pair("a,3"),
            Err(DriverError::InvalidNumber { field: "x coordinate", .. })
        ));
    }

    #[test]
    fn parses_grid_size() {
        assert_eq!(parse_grid_size("10x4").unwrap(), Vec2 { x: 10, y: 4 });
        assert_eq!(parse_grid_size("3X3").unwrap(), Vec2 { x: 3, y: 3 });
        assert!(matches!(parse_grid_size("10"), Err(DriverError::InvalidGridSize(_))));
    }

    #[test]
    fn parses_direction_letters_only() {
        assert_eq!(parse_direction("e").unwrap(), Direction::East);
        assert_eq!(parse_direction(" W ").unwrap(), Direction::West);
        assert!(matches!(parse_direction("NE"), Err(DriverError::UnknownDirection(_))));
        assert!(matches!(parse_direction(""), Err(DriverError::UnknownDirection(_))));
    }

    #[test]
    fn args_fill_mission_config() {
        let args = Args::parse_from([
            "rover-sim", "--grid", "3x3", "--obstacle", "0,1", "--facing", "E", "--commands", "MLM",
        ]);
        let config = MissionConfig::from_args(&args);
        assert_eq!(config.width, 3);
        assert_eq!(config.height, 3);
        assert_eq!(config.obstacles, vec![Vec2 { x: 0, y: 1 }]);
        assert_eq!(config.facing, Direction::East);
        assert_eq!(config.commands, "MLM");
    }

    #[test]
    fn args_default_to_canonical_mission() {
        let args = Args::parse_from(["rover-sim"]);
        let config = MissionConfig::from_args(&args);
        assert_eq!(config, MissionConfig::default());
    }

    #[test]
    fn mission_json_uses_defaults() {
        let config = MissionConfig::from_json(
            r#"{ "width": 10, "height": 10, "obstacles": [{"x": 2, "y": 2}, {"x": 3, "y": 5}], "commands": "MMRMLM" }"#,
        )
        .unwrap();
        assert_eq!(config.start, Vec2 { x: 0, y: 0 });
        assert_eq!(config.facing, Direction::North);
        assert_eq!(config.obstacles.len(), 2);
    }

    #[test]
    fn mission_json_accepts_letter_and_word_headings() {
        let letter = MissionConfig::from_json(r#"{ "width": 3, "height": 3, "facing": "S" }"#).unwrap();
        let word = MissionConfig::from_json(r#"{ "width": 3, "height": 3, "facing": "South" }"#).unwrap();
        assert_eq!(letter.facing, Direction::South);
        assert_eq!(word.facing, Direction::South);
    }

    #[test]
    fn mission_json_accepts_lower_case_headings() {
        for (text, expected) in [("n", Direction::North), ("e", Direction::East), ("s", Direction::South), ("w", Direction::West)] {
            let json = format!(r#"{{ "width": 3, "height": 3, "facing": "{}" }}"#, text);
            assert_eq!(MissionConfig::from_json(&json).unwrap().facing, expected);
            assert_eq!(parse_direction(text).unwrap(), expected);
        }
    }

    #[test]
    fn mission_json_rejects_empty_grid() {
        let result = MissionConfig::from_json(r#"{ "width": 0, "height": 3 }"#);
        assert!(matches!(result, Err(DriverError::EmptyGrid { width: 0, height: 3 })));
    }

    #[test]
    fn mission_json_rejects_garbage() {
        assert!(matches!(MissionConfig::from_json("{"), Err(DriverError::MissionJson(_))));
    }
}
