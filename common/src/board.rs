use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, trace, warn};

use crate::{
    backtrack::{Backtrack, BacktrackStep},
    config::{Config, ConfigError, Dimensions, parse_mode},
    direction::Coord,
    edit::{self, EditOutcome},
    maze::{GridModel, SeedPolicy},
    render::RenderGrid,
    search::{Mode, Search, SearchStep, TraversalError},
};

/// Requests the presentation layer can make.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    NewMaze,
    ClearBoard,
    Run(Mode),
    ToggleWall { y: usize, x: usize },
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Accepted,
    Busy, // A traversal is running.
    Locked, // A finished traversal is on the board; generate or clear first.
    Ignored,
    Edit(EditOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Succeeded,
    Failed(TraversalError),
}

/// What the caller should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Idle, // Nothing is running.
    Pending, // Schedule another tick.
    Finished(Phase),
}

#[derive(Clone, Debug)]
enum Job {
    Search(Search),
    Backtrack(Backtrack),
}

enum Transition {
    Reveal,
    Finish(Result<(), TraversalError>),
}

/// Owns the maze, its rendered grid and the traversal state machine. All
/// mutation goes through commands and `tick`, one step at a time.
pub struct Board {
    dimensions: Dimensions,
    seed_policy: SeedPolicy,
    rng: StdRng,
    maze: GridModel,
    grid: Arc<RenderGrid>,
    phase: Phase,
    job: Option<Job>,
    mode: Option<Mode>,
    cancel_requested: bool,
    path: Vec<Coord>,
}

impl Board {
    pub fn new(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut board = Self::with_parts(
            config.dimensions,
            config.seed_policy,
            rng,
            GridModel::create(config.dimensions.rows(), config.dimensions.cols()),
        );
        board.generate();
        board
    }

    /// A board over an existing maze, used as is.
    pub fn from_maze(maze: GridModel) -> Result<Self, ConfigError> {
        let dimensions = Dimensions::new(maze.rows(), maze.cols())?;
        Ok(Self::with_parts(
            dimensions,
            SeedPolicy::default(),
            StdRng::from_os_rng(),
            maze,
        ))
    }

    fn with_parts(
        dimensions: Dimensions,
        seed_policy: SeedPolicy,
        rng: StdRng,
        maze: GridModel,
    ) -> Self {
        let grid = Arc::new(RenderGrid::from_maze(&maze));
        Self {
            dimensions,
            seed_policy,
            rng,
            maze,
            grid,
            phase: Phase::Idle,
            job: None,
            mode: None,
            cancel_requested: false,
            path: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn start(&self) -> Coord {
        self.dimensions.start()
    }

    pub fn goal(&self) -> Coord {
        self.dimensions.goal()
    }

    pub fn maze(&self) -> &GridModel {
        &self.maze
    }

    pub fn grid(&self) -> &RenderGrid {
        &self.grid
    }

    /// A consistent copy of the rendered grid as of the last completed step.
    /// Later steps never write into a snapshot that has been handed out.
    pub fn snapshot(&self) -> Arc<RenderGrid> {
        Arc::clone(&self.grid)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Running
    }

    /// A traversal has finished and the board needs a new maze or a clear
    /// before the next one.
    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Succeeded | Phase::Failed(_))
    }

    /// The revealed path so far, goal first.
    pub fn path(&self) -> &[Coord] {
        match &self.job {
            Some(Job::Backtrack(backtrack)) => backtrack.path(),
            _ => &self.path,
        }
    }

    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::NewMaze => self.new_maze(),
            Command::ClearBoard => self.clear_board(),
            Command::Run(mode) => self.run(mode),
            Command::ToggleWall { y, x } => CommandOutcome::Edit(self.toggle_wall(y, x)),
            Command::Cancel => self.cancel(),
        }
    }

    pub fn new_maze(&mut self) -> CommandOutcome {
        if self.is_busy() {
            debug!("new maze rejected: traversal running");
            return CommandOutcome::Busy;
        }
        self.generate();
        CommandOutcome::Accepted
    }

    pub fn clear_board(&mut self) -> CommandOutcome {
        if self.is_busy() {
            debug!("clear rejected: traversal running");
            return CommandOutcome::Busy;
        }

        edit::empty_board(Arc::make_mut(&mut self.grid));
        self.reset_traversal();
        info!("board cleared");
        CommandOutcome::Accepted
    }

    pub fn run(&mut self, mode: Mode) -> CommandOutcome {
        if self.is_busy() {
            debug!(%mode, "traversal rejected: already running");
            return CommandOutcome::Busy;
        }
        if self.is_done() {
            debug!(%mode, "traversal rejected: board not reset");
            return CommandOutcome::Locked;
        }

        self.job = Some(Job::Search(Search::new(mode, self.start(), self.goal())));
        self.mode = Some(mode);
        self.phase = Phase::Running;
        self.cancel_requested = false;
        self.path.clear();
        info!(%mode, "traversal started");
        CommandOutcome::Accepted
    }

    /// Like `run`, with the mode given as text and validated first.
    pub fn run_named(&mut self, mode: &str) -> Result<CommandOutcome, ConfigError> {
        let mode = parse_mode(mode)?;
        Ok(self.run(mode))
    }

    pub fn toggle_wall(&mut self, y: usize, x: usize) -> EditOutcome {
        if self.is_busy() {
            return EditOutcome::Busy;
        }
        if self.is_done() {
            return EditOutcome::Locked;
        }

        let protected = [self.start(), self.goal()];
        let outcome = edit::toggle_wall(Arc::make_mut(&mut self.grid), Coord { y, x }, &protected);
        debug!(y, x, ?outcome, "wall toggle");
        outcome
    }

    /// Asks the running traversal to stop. The next tick ends it.
    pub fn cancel(&mut self) -> CommandOutcome {
        if !self.is_busy() {
            return CommandOutcome::Ignored;
        }
        self.cancel_requested = true;
        CommandOutcome::Accepted
    }

    /// Advances the running traversal by exactly one step.
    pub fn tick(&mut self) -> Progress {
        if self.job.is_none() {
            return Progress::Idle;
        }
        if self.cancel_requested {
            return self.finish(Err(TraversalError::Cancelled));
        }

        let Some(job) = self.job.as_mut() else {
            return Progress::Idle;
        };
        let grid = Arc::make_mut(&mut self.grid);
        let transition = match job {
            Job::Search(search) => match search.step(grid) {
                SearchStep::Expanded { cell, step } => {
                    let queued = search.frontier_len();
                    trace!(y = cell.y, x = cell.x, step, queued, "expanded");
                    None
                }
                SearchStep::Found { step, .. } => {
                    debug!(step, logged = search.log().len(), "goal reached");
                    Some(Transition::Reveal)
                }
                SearchStep::Exhausted => {
                    let visited = search.log().len();
                    Some(Transition::Finish(Err(TraversalError::Unreachable { visited })))
                }
            },
            Job::Backtrack(backtrack) => match backtrack.step(grid) {
                BacktrackStep::Accepted(cell) => {
                    trace!(y = cell.y, x = cell.x, "path cell revealed");
                    None
                }
                BacktrackStep::Discarded(_) => None,
                BacktrackStep::Complete => Some(Transition::Finish(Ok(()))),
                BacktrackStep::Exhausted => {
                    Some(Transition::Finish(Err(TraversalError::BrokenPath)))
                }
            },
        };

        match transition {
            None => Progress::Pending,
            Some(Transition::Reveal) => {
                if let Some(Job::Search(search)) = self.job.take() {
                    let backtrack = Backtrack::new(search.into_log(), self.goal(), self.start());
                    self.job = Some(Job::Backtrack(backtrack));
                }
                Progress::Pending
            }
            Some(Transition::Finish(result)) => self.finish(result),
        }
    }

    fn finish(&mut self, result: Result<(), TraversalError>) -> Progress {
        if let Some(Job::Backtrack(backtrack)) = self.job.take() {
            self.path = backtrack.into_path();
        }
        self.cancel_requested = false;

        self.phase = match result {
            Ok(()) => {
                info!(mode = ?self.mode, length = self.path.len(), "path revealed");
                Phase::Succeeded
            }
            Err(TraversalError::Cancelled) => {
                info!(mode = ?self.mode, "traversal cancelled");
                Phase::Failed(TraversalError::Cancelled)
            }
            Err(error) => {
                warn!(mode = ?self.mode, %error, "traversal failed");
                Phase::Failed(error)
            }
        };

        Progress::Finished(self.phase)
    }

    fn generate(&mut self) {
        let (rows, cols) = (self.dimensions.rows(), self.dimensions.cols());
        self.maze = GridModel::generate(rows, cols, self.seed_policy, &mut self.rng);
        self.grid = Arc::new(RenderGrid::from_maze(&self.maze));
        self.reset_traversal();
    }

    fn reset_traversal(&mut self) {
        self.phase = Phase::Idle;
        self.job = None;
        self.mode = None;
        self.cancel_requested = false;
        self.path.clear();
    }
}
