use std::{
    thread,
    time::{Duration, Instant},
};

use tracing::debug;

use crate::board::{Board, Phase, Progress};

/// Paces a board's traversal: at most one step per `delay`, so every
/// intermediate state can be shown before the next one replaces it.
#[derive(Clone, Debug)]
pub struct Scheduler {
    delay: Duration,
    next_tick: Instant,
}

impl Scheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_tick: Instant::now(),
        }
    }

    /// How long the caller may wait for input before the next step is due.
    pub fn time_until_tick(&self) -> Duration {
        self.next_tick.saturating_duration_since(Instant::now())
    }

    /// Ticks the board if a step is due. Returns `None` when it is not yet
    /// time to step.
    pub fn poll(&mut self, board: &mut Board) -> Option<Progress> {
        let now = Instant::now();
        if now < self.next_tick {
            return None;
        }

        self.next_tick = now + self.delay;
        Some(board.tick())
    }

    /// Steps the board until the running traversal ends, sleeping between
    /// steps and handing each intermediate state to `observe`.
    pub fn run_until_settled(
        &mut self,
        board: &mut Board,
        mut observe: impl FnMut(&Board, Progress),
    ) -> Phase {
        let mut ticks = 0usize;

        loop {
            let progress = board.tick();
            ticks += 1;
            observe(board, progress);

            match progress {
                Progress::Pending => {
                    if !self.delay.is_zero() {
                        thread::sleep(self.delay);
                    }
                }
                Progress::Idle | Progress::Finished(_) => {
                    debug!(ticks, phase = ?board.phase(), "traversal settled");
                    return board.phase();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        config::{Config, Dimensions},
        search::Mode,
    };

    fn board(seed: u64) -> Board {
        Board::new(&Config {
            dimensions: Dimensions::new(4, 6).unwrap(),
            seed: Some(seed),
            ..Config::default()
        })
    }

    #[test]
    fn poll_waits_for_the_delay() {
        let mut board = board(1);
        board.run(Mode::Bfs);
        let mut scheduler = Scheduler::new(Duration::from_secs(3600));

        assert_eq!(scheduler.poll(&mut board), Some(Progress::Pending));
        assert_eq!(scheduler.poll(&mut board), None);
        assert!(scheduler.time_until_tick() > Duration::from_secs(3000));
    }

    #[test]
    fn zero_delay_always_ticks() {
        let mut board = board(2);
        let mut scheduler = Scheduler::new(Duration::ZERO);

        assert_eq!(scheduler.poll(&mut board), Some(Progress::Idle));
        assert_eq!(scheduler.time_until_tick(), Duration::ZERO);
    }

    #[test]
    fn run_until_settled_observes_every_step() {
        let mut board = board(3);
        board.run(Mode::Dfs);
        let mut scheduler = Scheduler::new(Duration::ZERO);
        let mut observed = Vec::new();

        let phase = scheduler.run_until_settled(&mut board, |_, progress| observed.push(progress));

        assert_eq!(phase, Phase::Succeeded);
        assert_eq!(observed.last(), Some(&Progress::Finished(Phase::Succeeded)));
        assert!(observed[..observed.len() - 1].iter().all(|p| *p == Progress::Pending));
    }

    #[test]
    fn settled_board_returns_at_once() {
        let mut board = board(4);
        let mut calls = 0;
        let phase = Scheduler::new(Duration::ZERO).run_until_settled(&mut board, |_, _| calls += 1);
        assert_eq!(phase, Phase::Idle);
        assert_eq!(calls, 1);
    }
}
