pub mod backtrack;
pub mod board;
pub mod config;
pub mod constants;
pub mod direction;
pub mod edit;
pub mod maze;
pub mod render;
pub mod scheduler;
pub mod search;

pub use board::{Board, Command, CommandOutcome, Phase, Progress};
pub use config::{Config, ConfigError, Dimensions};
pub use direction::{Coord, Direction, Links};
pub use edit::EditOutcome;
pub use maze::{GridModel, LogicalCell, SeedPolicy};
pub use render::{RenderCell, RenderGrid};
pub use scheduler::Scheduler;
pub use search::{Mode, TraversalError};
