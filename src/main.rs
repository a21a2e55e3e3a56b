// Rover grid simulator.
// Builds a grid and a rover from flags, a mission file or prompts, runs the
// command string, then prints the final position and status report.

mod config;
mod console_interface;
mod core;
mod error;
mod mission;
mod models;

use std::io::{self, BufRead, Write};
use clap::Parser;
use log::{info, LevelFilter};

use crate::config::{Args, MissionConfig, OutputFormat, STDIN_COMMANDS};
use crate::console_interface::{
    cleanup_terminal, format_json_report, format_text_report, prompt_mission, read_commands, render_mission,
    setup_terminal, wait_for_key,
};
use crate::mission::Mission;
use crate::models::MissionRenderState;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args, &mut io::stdin().lock(), &mut io::stdout())?;
    let mut mission = Mission::build(&config)?;
    let log = mission.execute();
    let report = mission.report(log);

    if args.view {
        let grid = mission.grid.borrow();
        let state = MissionRenderState { grid: &grid, report: &report };
        let mut terminal = setup_terminal()?;
        let shown = render_mission(&mut terminal, &state).and_then(|_| wait_for_key());
        cleanup_terminal()?;
        shown?;
    }

    let output = match args.format {
        OutputFormat::Text => format_text_report(&report, args.trace),
        OutputFormat::Json => format_json_report(&report)?,
    };
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", output)?;
    if args.format == OutputFormat::Json {
        writeln!(stdout)?;
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(default)
        .parse_default_env()
        .init();
}

/// A mission file replaces the flags wholesale. Otherwise the flags are used,
/// with prompts or standard input filling in what was asked for.
fn load_config<R: BufRead, W: Write>(
    args: &Args,
    input: &mut R,
    output: &mut W,
) -> Result<MissionConfig, Box<dyn std::error::Error>> {
    if let Some(path) = &args.mission {
        info!("loading mission from {}", path.display());
        return Ok(MissionConfig::load(path)?);
    }

    let mut config = MissionConfig::from_args(args);
    if args.interactive {
        config = prompt_mission(input, output, config)?;
    } else if args.stdin || args.commands == STDIN_COMMANDS {
        config.commands = read_commands(input)?;
    }
    config.validate()?;
    Ok(config)
}
