use std::{
    io::{self, Write},
    time::Duration,
};

use serde::Serialize;
use tracing::{debug, info};

use common::{
    Board, CommandOutcome, Config, Coord, Dimensions, EditOutcome, Mode, Phase, Progress,
    RenderGrid, Scheduler, TraversalError,
};

use crate::{
    error::ClientError,
    ui::{Action, TerminalUi},
};

// How long to wait for input while nothing is animating.
const IDLE_POLL: Duration = Duration::from_millis(250);

pub fn run_interactive(config: &Config) -> Result<(), ClientError> {
    let mut board = Board::new(config);
    let mut scheduler = Scheduler::new(config.tick);
    let mut ui = TerminalUi::new()?;
    let mut notice: Option<&'static str> = None;

    info!(
        rows = config.dimensions.rows(),
        cols = config.dimensions.cols(),
        tick_ms = config.tick.as_millis() as u64,
        "interactive session started"
    );

    let mut dirty = true;
    loop {
        if dirty {
            let status = match notice {
                Some(notice) => notice.to_string(),
                None => status_line(&board),
            };
            ui.draw(&board.snapshot(), board.start(), board.goal(), &status)?;
            dirty = false;
        }

        let timeout = if board.is_busy() {
            scheduler.time_until_tick()
        } else {
            IDLE_POLL
        };

        match ui.poll_action(timeout)? {
            Some(Action::Quit) => break,
            Some(Action::Redraw) => dirty = true,
            Some(Action::Command(command)) => {
                let outcome = board.apply(command);
                debug!(?command, ?outcome, "command applied");
                notice = notice_for(outcome);
                dirty = true;
            }
            None => {}
        }

        if board.is_busy() {
            if let Some(progress) = scheduler.poll(&mut board) {
                if progress != Progress::Pending {
                    notice = None;
                }
                dirty = true;
            }
        }
    }

    Ok(())
}

/// Result of a headless run, as printed with `--json`.
#[derive(Debug, Serialize)]
pub struct SolveReport<'a> {
    pub mode: Mode,
    pub dimensions: Dimensions,
    pub found: bool,
    pub error: Option<String>,
    pub path: &'a [Coord],
    pub grid: &'a RenderGrid,
}

/// Generates a maze, runs one traversal to the end without pacing, and
/// writes the final grid to `out`.
pub fn solve(
    config: &Config,
    mode: Mode,
    json: bool,
    out: &mut impl Write,
) -> Result<Phase, ClientError> {
    let mut board = Board::new(config);
    board.run(mode);
    let phase = Scheduler::new(Duration::ZERO).run_until_settled(&mut board, |_, _| {});

    if json {
        let grid = board.snapshot();
        let report = SolveReport {
            mode,
            dimensions: board.dimensions(),
            found: phase == Phase::Succeeded,
            error: match phase {
                Phase::Failed(error) => Some(error.to_string()),
                _ => None,
            },
            path: board.path(),
            grid: &grid,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", board.grid())?;
        writeln!(out, "{}", status_line(&board))?;
    }

    out.flush()?;
    Ok(phase)
}

pub fn status_line(board: &Board) -> String {
    let mode = board
        .mode()
        .map(|mode| mode.to_string().to_uppercase())
        .unwrap_or_default();

    match board.phase() {
        Phase::Idle => "ready".to_string(),
        Phase::Running => format!("{mode} searching"),
        Phase::Succeeded => format!("{mode} found a path of {} squares", board.path().len()),
        Phase::Failed(TraversalError::Cancelled) => format!("{mode} cancelled"),
        Phase::Failed(error) => format!("{mode} failed: {error}"),
    }
}

fn notice_for(outcome: CommandOutcome) -> Option<&'static str> {
    match outcome {
        CommandOutcome::Busy | CommandOutcome::Edit(EditOutcome::Busy) => {
            Some("a search is running; press x to cancel it")
        }
        CommandOutcome::Locked | CommandOutcome::Edit(EditOutcome::Locked) => {
            Some("press n for a new maze or c to clear before the next run")
        }
        CommandOutcome::Edit(EditOutcome::Protected) => Some("start and goal cannot become walls"),
        _ => None,
    }
}

/// Writes `error` to stderr in the same form the binary exits with.
pub fn report_error(error: &ClientError) {
    let mut stderr = io::stderr();
    writeln!(stderr, "error: {error}").ok();
}
