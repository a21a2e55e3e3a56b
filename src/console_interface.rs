use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use log::debug;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::ops::Range;
use crate::config::{parse_int, MissionConfig};
use crate::core::{Command, Direction, Grid, RoverState, Vec2};
use crate::error::DriverError;
use crate::models::{MissionRenderState, MissionReport};

/// Maps each recognised character to a command; anything else is skipped.
pub fn parse_commands(s: &str) -> Vec<Command> {
    s.chars()
        .filter_map(|c| {
            let command = Command::from_char(c);
            if command.is_none() && !c.is_whitespace() {
                debug!("ignoring unknown command character {:?}", c);
            }
            command
        })
        .collect()
}

/// Asks for the grid size and the command string, keeping everything else from `base`.
pub fn prompt_mission<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    base: MissionConfig,
) -> Result<MissionConfig, DriverError> {
    let width = parse_int("grid width", &prompt(input, output, "Enter grid width: ")?)?;
    let height = parse_int("grid height", &prompt(input, output, "Enter grid height: ")?)?;
    let commands = prompt(input, output, "Enter commands (M, L, R): ")?;

    let config = MissionConfig {
        width,
        height,
        commands,
        ..base
    };
    config.validate()?;
    Ok(config)
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String, DriverError> {
    write!(output, "{}", message)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub fn read_commands<R: BufRead>(input: &mut R) -> Result<String, DriverError> {
    let mut buf = String::new();
    for line in input.lines() {
        buf.push_str(&line?);
    }
    Ok(buf)
}

pub fn format_text_report(report: &MissionReport, trace: bool) -> String {
    let mut result = String::new();
    if trace {
        for (i, step) in report.steps.iter().enumerate() {
            let _ = writeln!(result, "{:>4} {} {:<22} {}", i + 1, step.command.as_char(), step.outcome.to_string(), step.state);
        }
    }
    let _ = writeln!(result, "Final Position: {}", report.final_state);
    let _ = writeln!(result, "{}", report.status_report);
    result
}

pub fn format_json_report(report: &MissionReport) -> Result<String, DriverError> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn rover_symbol(direction: Direction) -> char {
    match direction {
        Direction::North => '^',
        Direction::East => '>',
        Direction::South => 'v',
        Direction::West => '<',
    }
}

/// Draws the given columns and rows, highest row first so north is up.
pub fn render_region(grid: &Grid, rover: &RoverState, xs: Range<i32>, ys: Range<i32>) -> String {
    let mut result = String::new();
    for y in ys.rev() {
        for x in xs.clone() {
            let ch = if (Vec2 { x, y }) == rover.position() {
                if grid.is_obstacle(x, y) { 'X' } else { rover_symbol(rover.direction) }
            } else if grid.is_obstacle(x, y) {
                '#'
            } else {
                '.'
            };
            result.push(ch);
        }
        result.push('\n');
    }
    result
}

pub fn render_grid_to_string(grid: &Grid, rover: &RoverState) -> String {
    render_region(grid, rover, 0..grid.width(), 0..grid.height())
}

/// A window of at most `cols` x `rows` cells kept on the grid and, where possible, centred on the rover.
pub fn view_window(grid: &Grid, rover: &RoverState, cols: i32, rows: i32) -> (Range<i32>, Range<i32>) {
    fn axis(extent: i32, size: i32, centre: i32) -> Range<i32> {
        let size = size.clamp(1, extent.max(1));
        let start = centre.saturating_sub(size / 2).clamp(0, (extent - size).max(0));
        start..start + size
    }
    (
        axis(grid.width(), cols, rover.x),
        axis(grid.height(), rows, rover.y),
    )
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn render_mission(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &MissionRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(4)])
            .split(f.area());

        // Borders take one cell on each side.
        let cols = chunks[0].width.saturating_sub(2) as i32;
        let rows = chunks[0].height.saturating_sub(2) as i32;
        let (xs, ys) = view_window(state.grid, &state.report.final_state, cols, rows);
        let grid_text = render_region(state.grid, &state.report.final_state, xs, ys);
        let title = format!("Rover {}x{}", state.grid.width(), state.grid.height());
        let grid_paragraph = Paragraph::new(grid_text)
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(grid_paragraph, chunks[0]);

        let summary = format!(
            "{}\n{} moves made, {} blocked. Press any key to quit.",
            state.report.status_report, state.report.moves_made, state.report.moves_blocked
        );
        let summary_paragraph = Paragraph::new(summary)
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(summary_paragraph, chunks[1]);
    })?;
    Ok(())
}

pub fn wait_for_key() -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if let Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(());
        }
    }
}
