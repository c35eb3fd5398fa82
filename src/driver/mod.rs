//! Animation driver
//!
//! The [`Driver`] replays the queued solver moves against its
//! [`PuzzleState`], one move at a time, through a caller-supplied
//! [`TransitionHost`]. It never blocks: the host calls [`Driver::poll`] from
//! its own loop and the driver advances as far as the completed transitions
//! allow.
//!
//! # Per-move protocol
//!
//! ```text
//! select top disk → mark in transit → Lift ⏸ → reassign peg → Translate ⏸
//!                 → recompute order → Settle ⏸ → land + impact cue → yield
//! ```
//!
//! Each `⏸` is a suspension point where the run token is checked. After a
//! move finishes the driver returns [`DriverStatus::Yielded`]; the next move
//! only starts on a later poll, so a pending reset is always observed first.

pub mod token;

pub use token::{Completion, RunSource, RunToken};

use crate::puzzle::{DiskId, PuzzleError, PuzzleState};
use crate::solver::{Move, PegId};
use std::fmt;
use thiserror::Error;
use tracing::{debug, error, info};

/// Extra levels above the tallest possible stack used while a disk flies
const LIFT_CLEARANCE: usize = 3;

/// Fatal driver errors. Cancellation is not one of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error("move {index} ({mv}): no eligible disk on the source peg")]
    NoEligibleDisk { index: usize, mv: Move },

    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}

/// The three visual phases of a move, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Lift,
    Translate,
    Settle,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Lift => "lift",
            Phase::Translate => "translate",
            Phase::Settle => "settle",
        };
        f.write_str(name)
    }
}

/// Target placement for a transition: a peg column and a stacking level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pose {
    pub peg: PegId,
    pub level: usize,
}

/// The rendering side of the driver
pub trait TransitionHost {
    /// Animate `disk` to `target`; the returned signal fires when done
    fn begin_transition(&mut self, disk: DiskId, phase: Phase, target: Pose) -> Completion;

    /// Fire-and-forget cue that `disk` just landed
    fn notify_impact(&mut self, disk: DiskId);

    /// Ask to be polled again on a later turn
    fn request_next_frame(&mut self);
}

/// Observable driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatus {
    /// Nothing in flight; either not started, paused, or out of moves
    Idle,
    /// Between moves, next move starts on the next poll
    Yielded,
    /// A move is in flight, waiting on `phase`
    Stepping {
        index: usize,
        mv: Move,
        disk: DiskId,
        phase: Phase,
    },
    Cancelled,
    Failed,
}

impl DriverStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, DriverStatus::Cancelled | DriverStatus::Failed)
    }
}

#[derive(Debug, Clone)]
enum Stage {
    Idle,
    Yielded,
    Stepping {
        index: usize,
        mv: Move,
        disk: DiskId,
        phase: Phase,
        completion: Completion,
    },
    Cancelled,
    Failed,
}

/// Replays a puzzle's move queue through a [`TransitionHost`]
#[derive(Debug)]
pub struct Driver {
    state: PuzzleState,
    token: RunToken,
    stage: Stage,
}

impl Driver {
    pub fn new(state: PuzzleState, token: RunToken) -> Self {
        Driver {
            state,
            token,
            stage: Stage::Idle,
        }
    }

    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    pub fn token(&self) -> &RunToken {
        &self.token
    }

    pub fn status(&self) -> DriverStatus {
        match &self.stage {
            Stage::Idle => DriverStatus::Idle,
            Stage::Yielded => DriverStatus::Yielded,
            Stage::Stepping {
                index,
                mv,
                disk,
                phase,
                ..
            } => DriverStatus::Stepping {
                index: *index,
                mv: *mv,
                disk: *disk,
                phase: *phase,
            },
            Stage::Cancelled => DriverStatus::Cancelled,
            Stage::Failed => DriverStatus::Failed,
        }
    }

    /// Idle with no moves left
    pub fn is_finished(&self) -> bool {
        matches!(self.stage, Stage::Idle) && self.state.queue().is_empty()
    }

    /// Begin or resume playback. Returns `false` if there is nothing to play.
    pub fn start(&mut self) -> bool {
        match self.stage {
            Stage::Cancelled | Stage::Failed => false,
            _ if self.token.is_cancelled() => false,
            Stage::Idle => {
                if self.state.queue().is_empty() {
                    return false;
                }
                self.state.set_running(true);
                self.stage = Stage::Yielded;
                true
            }
            Stage::Yielded | Stage::Stepping { .. } => {
                self.state.set_running(true);
                true
            }
        }
    }

    /// Stop after the in-flight move; the queue is kept for a later `start`
    pub fn pause(&mut self) {
        self.state.set_running(false);
    }

    /// Cancel this run. Terminal.
    pub fn cancel(&mut self) {
        self.token.cancel();
        self.enter_cancelled();
    }

    fn enter_cancelled(&mut self) {
        if !matches!(self.stage, Stage::Cancelled | Stage::Failed) {
            info!(
                generation = self.token.generation(),
                completed = self.state.queue().consumed(),
                "run cancelled"
            );
            self.stage = Stage::Cancelled;
        }
        self.state.set_running(false);
    }

    fn fail(&mut self, err: DriverError) -> DriverError {
        error!(error = %err, "driver invariant violated");
        self.stage = Stage::Failed;
        self.state.set_running(false);
        err
    }

    /// Advance as far as completed transitions allow.
    ///
    /// Stops at the first incomplete transition, at the end of a move, or on
    /// cancellation. A fatal error is returned once; afterwards the driver
    /// reports [`DriverStatus::Failed`].
    pub fn poll<H: TransitionHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<DriverStatus, DriverError> {
        loop {
            if matches!(self.stage, Stage::Cancelled | Stage::Failed) {
                return Ok(self.status());
            }
            if self.token.is_cancelled() {
                self.enter_cancelled();
                return Ok(DriverStatus::Cancelled);
            }

            match self.stage.clone() {
                Stage::Idle => return Ok(DriverStatus::Idle),
                Stage::Yielded => {
                    if !self.state.is_running() || self.state.queue().is_empty() {
                        if self.state.queue().is_empty() {
                            info!(moves = self.state.queue().total(), "puzzle solved");
                            self.state.set_running(false);
                        }
                        self.stage = Stage::Idle;
                        return Ok(DriverStatus::Idle);
                    }
                    self.begin_move(host).map_err(|e| self.fail(e))?;
                }
                Stage::Stepping {
                    index,
                    mv,
                    disk,
                    phase,
                    completion,
                } => {
                    if !completion.is_complete() {
                        return Ok(self.status());
                    }
                    debug!(index, %disk, %phase, "phase complete");

                    match phase {
                        Phase::Lift => {
                            self.state.transfer(disk, mv.to).map_err(|e| self.fail(e.into()))?;
                            let lift = self.lift_level();
                            self.begin_phase(host, index, mv, disk, Phase::Translate, Pose {
                                peg: mv.to,
                                level: lift,
                            });
                        }
                        Phase::Translate => {
                            let order = self
                                .state
                                .settle_order(disk)
                                .map_err(|e| self.fail(e.into()))?;
                            self.begin_phase(host, index, mv, disk, Phase::Settle, Pose {
                                peg: mv.to,
                                level: order,
                            });
                        }
                        Phase::Settle => {
                            self.state.land(disk).map_err(|e| self.fail(e.into()))?;
                            host.notify_impact(disk);

                            if self.state.is_running() && !self.state.queue().is_empty() {
                                self.stage = Stage::Yielded;
                                host.request_next_frame();
                                return Ok(DriverStatus::Yielded);
                            }
                            if self.state.queue().is_empty() {
                                info!(moves = self.state.queue().total(), "puzzle solved");
                                self.state.set_running(false);
                            }
                            self.stage = Stage::Idle;
                            return Ok(DriverStatus::Idle);
                        }
                    }
                }
                Stage::Cancelled | Stage::Failed => return Ok(self.status()),
            }
        }
    }

    fn lift_level(&self) -> usize {
        self.state.disk_count() as usize + LIFT_CLEARANCE
    }

    fn begin_move<H: TransitionHost + ?Sized>(&mut self, host: &mut H) -> Result<(), DriverError> {
        let Some(mv) = self.state.queue_mut().pop_front() else {
            return Ok(());
        };
        let index = self.state.queue().consumed() - 1;

        let disk = self
            .state
            .top_eligible(mv.from)
            .ok_or(DriverError::NoEligibleDisk { index, mv })?;

        info!(index, %mv, %disk, "move started");

        let lift = self.lift_level();
        self.state.lift(disk, lift)?;
        self.begin_phase(host, index, mv, disk, Phase::Lift, Pose {
            peg: mv.from,
            level: lift,
        });
        Ok(())
    }

    fn begin_phase<H: TransitionHost + ?Sized>(
        &mut self,
        host: &mut H,
        index: usize,
        mv: Move,
        disk: DiskId,
        phase: Phase,
        target: Pose,
    ) {
        debug!(index, %disk, %phase, peg = %target.peg, level = target.level, "phase started");
        let completion = host.begin_transition(disk, phase, target);
        self.stage = Stage::Stepping {
            index,
            mv,
            disk,
            phase,
            completion,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Host whose transitions finish immediately
    #[derive(Default)]
    struct InstantHost {
        phases: Vec<(DiskId, Phase, Pose)>,
        impacts: Vec<DiskId>,
        frames: usize,
    }

    impl TransitionHost for InstantHost {
        fn begin_transition(&mut self, disk: DiskId, phase: Phase, target: Pose) -> Completion {
            self.phases.push((disk, phase, target));
            Completion::completed()
        }

        fn notify_impact(&mut self, disk: DiskId) {
            self.impacts.push(disk);
        }

        fn request_next_frame(&mut self) {
            self.frames += 1;
        }
    }

    fn driver(disks: u32) -> Driver {
        Driver::new(PuzzleState::new(disks).unwrap(), RunToken::detached())
    }

    #[test]
    fn test_not_started_stays_idle() {
        let mut driver = driver(2);
        let mut host = InstantHost::default();
        assert_eq!(driver.poll(&mut host).unwrap(), DriverStatus::Idle);
        assert!(host.phases.is_empty());
    }

    #[test]
    fn test_one_move_per_poll() {
        let mut driver = driver(2);
        let mut host = InstantHost::default();
        assert!(driver.start());

        assert_eq!(driver.poll(&mut host).unwrap(), DriverStatus::Yielded);
        assert_eq!(host.phases.len(), 3);
        assert_eq!(host.impacts.len(), 1);
        assert_eq!(host.frames, 1);
        assert_eq!(driver.state().rank_layout(), [vec![1], vec![0], vec![]]);
    }

    #[test]
    fn test_phase_order_and_poses() {
        let mut driver = driver(1);
        let mut host = InstantHost::default();
        driver.start();

        assert_eq!(driver.poll(&mut host).unwrap(), DriverStatus::Idle);
        let phases: Vec<Phase> = host.phases.iter().map(|p| p.1).collect();
        assert_eq!(phases, vec![Phase::Lift, Phase::Translate, Phase::Settle]);
        assert_eq!(host.phases[0].2, Pose { peg: PegId::A, level: 4 });
        assert_eq!(host.phases[1].2, Pose { peg: PegId::C, level: 4 });
        assert_eq!(host.phases[2].2, Pose { peg: PegId::C, level: 0 });
        assert!(driver.is_finished());
        assert!(driver.state().is_solved());
        assert_eq!(host.frames, 0);
    }

    #[test]
    fn test_pause_finishes_current_move() {
        let mut driver = driver(3);
        let mut host = InstantHost::default();
        driver.start();
        driver.poll(&mut host).unwrap();
        driver.pause();

        assert_eq!(driver.poll(&mut host).unwrap(), DriverStatus::Idle);
        assert_eq!(driver.state().queue().consumed(), 1);
        assert!(!driver.is_finished());

        assert!(driver.start());
        assert_eq!(driver.poll(&mut host).unwrap(), DriverStatus::Yielded);
        assert_eq!(driver.state().queue().consumed(), 2);
    }

    #[test]
    fn test_cancel_is_terminal() {
        let mut driver = driver(3);
        let mut host = InstantHost::default();
        driver.start();
        driver.cancel();

        assert_eq!(driver.poll(&mut host).unwrap(), DriverStatus::Cancelled);
        assert!(!driver.start());
        assert!(host.phases.is_empty());
        assert!(driver.status().is_terminal());
    }
}
