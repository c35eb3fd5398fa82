//! Start / pause / reset control over the active driver
//!
//! A [`Session`] owns exactly one [`Driver`] at a time together with the
//! [`RunSource`] its tokens come from. Resetting issues a new token before the
//! replacement driver is built, so anything still holding the old token sees
//! it as cancelled.

use crate::driver::{Driver, DriverError, DriverStatus, RunSource, TransitionHost};
use crate::puzzle::PuzzleState;
use crate::solver::SolverError;
use tracing::{info, warn};

/// Largest disk count offered interactively
pub const MAX_UI_DISKS: u32 = 13;

/// Disk count used when none is configured
pub const DEFAULT_DISKS: u32 = 5;

/// What a [`Session::toggle`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started,
    Reset,
}

#[derive(Debug)]
pub struct Session {
    source: RunSource,
    driver: Driver,
    last_error: Option<DriverError>,
}

impl Session {
    pub fn new(disks: u32) -> Result<Self, SolverError> {
        let source = RunSource::new();
        let state = PuzzleState::new(disks)?;
        let driver = Driver::new(state, source.issue());
        Ok(Session {
            source,
            driver,
            last_error: None,
        })
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    pub fn state(&self) -> &PuzzleState {
        self.driver.state()
    }

    pub fn disk_count(&self) -> u32 {
        self.state().disk_count()
    }

    pub fn status(&self) -> DriverStatus {
        self.driver.status()
    }

    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    pub fn last_error(&self) -> Option<&DriverError> {
        self.last_error.as_ref()
    }

    /// Replace the puzzle with a fresh one of `disks` disks.
    ///
    /// The current run is cancelled first. On an invalid disk count the
    /// session is left untouched.
    pub fn reset(&mut self, disks: u32) -> Result<(), SolverError> {
        let state = PuzzleState::new(disks)?;
        let token = self.source.issue();
        info!(disks, generation = token.generation(), "puzzle reset");
        self.driver = Driver::new(state, token);
        self.last_error = None;
        Ok(())
    }

    /// Clamp `disks` into the interactive range and reset
    pub fn set_disk_count(&mut self, disks: u32) -> u32 {
        let disks = disks.clamp(1, MAX_UI_DISKS);
        if let Err(e) = self.reset(disks) {
            // Unreachable for clamped counts.
            warn!(error = %e, disks, "reset rejected");
        }
        disks
    }

    /// Start playback. A finished, cancelled or failed puzzle is reset first.
    pub fn start(&mut self) -> bool {
        if self.driver.is_finished() || self.driver.status().is_terminal() {
            let disks = self.disk_count();
            if self.reset(disks).is_err() {
                return false;
            }
        }
        self.driver.start()
    }

    /// Start/Reset button: reset when running, otherwise start
    pub fn toggle(&mut self) -> ToggleOutcome {
        if self.is_running() {
            self.set_disk_count(self.disk_count());
            ToggleOutcome::Reset
        } else {
            self.start();
            ToggleOutcome::Started
        }
    }

    /// Pause a running puzzle or resume a paused one
    pub fn pause_or_resume(&mut self) -> bool {
        if self.is_running() {
            self.driver.pause();
            false
        } else {
            self.driver.start()
        }
    }

    /// Forward a tick to the driver, recording any fatal error
    pub fn poll<H: TransitionHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<DriverStatus, DriverError> {
        match self.driver.poll(host) {
            Ok(status) => Ok(status),
            Err(e) => {
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }
}
