//! Logical puzzle state
//!
//! This module provides the data model the animation driver mutates:
//! - [`disk`]: [`Disk`] attributes and process-unique [`DiskId`]s
//! - [`queue`]: [`MoveQueue`], the remaining solver moves
//! - [`legality`]: a standalone replay checker for move lists
//!
//! # Invariants
//!
//! At any quiescent moment (no disk in transit) every disk sits on exactly
//! one peg, and each peg is ordered largest-at-bottom. A disk that is in
//! transit keeps its slot in a peg sequence but is skipped by
//! [`PuzzleState::top_eligible`].

pub mod disk;
pub mod legality;
pub mod queue;

pub use disk::{Disk, DiskId};
pub use queue::MoveQueue;

use crate::solver::{self, Move, PegId, SolverError};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use thiserror::Error;

/// Violations of the peg-state invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("disk {0} does not belong to this puzzle")]
    UnknownDisk(DiskId),

    #[error("disk {disk} is not on peg {peg}")]
    NotOnPeg { disk: DiskId, peg: PegId },

    #[error("disk {disk} (rank {rank}) cannot rest on rank {below}")]
    LargerOnSmaller { disk: DiskId, rank: u32, below: u32 },
}

/// An ordered stack of disks, bottom first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Peg {
    disks: Vec<DiskId>,
}

impl Peg {
    pub fn disks(&self) -> &[DiskId] {
        &self.disks
    }

    pub fn len(&self) -> usize {
        self.disks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }
}

/// Full state of one puzzle instance
#[derive(Debug, Clone)]
pub struct PuzzleState {
    disk_count: u32,
    pegs: [Peg; 3],
    disks: Vec<Disk>,
    index: FxHashMap<DiskId, usize>,
    queue: MoveQueue,
    running: bool,
}

impl PuzzleState {
    /// Fresh puzzle: all disks on peg 1, solution queued for peg 3
    pub fn new(disk_count: u32) -> Result<Self, SolverError> {
        let moves = solver::solve_standard(disk_count)?;
        Ok(Self::with_moves(disk_count, moves))
    }

    /// All disks on peg 1 with an arbitrary move list queued.
    ///
    /// The moves are not checked; a driver replaying an inconsistent list
    /// fails with an invariant error.
    pub fn with_moves(disk_count: u32, moves: Arc<[Move]>) -> Self {
        let disks: Vec<Disk> = (0..disk_count)
            .rev()
            .enumerate()
            .map(|(order, rank)| Disk::new(rank, order, PegId::A))
            .collect();

        let index = disks
            .iter()
            .enumerate()
            .map(|(i, disk)| (disk.id, i))
            .collect();

        let mut pegs: [Peg; 3] = Default::default();
        pegs[PegId::A.index()].disks = disks.iter().map(|d| d.id).collect();

        PuzzleState {
            disk_count,
            pegs,
            disks,
            index,
            queue: MoveQueue::new(moves),
            running: false,
        }
    }

    pub fn disk_count(&self) -> u32 {
        self.disk_count
    }

    pub fn peg(&self, peg: PegId) -> &Peg {
        &self.pegs[peg.index()]
    }

    pub fn pegs(&self) -> &[Peg; 3] {
        &self.pegs
    }

    /// All disks, largest first
    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    pub fn disk(&self, id: DiskId) -> Option<&Disk> {
        self.index.get(&id).map(|&i| &self.disks[i])
    }

    fn disk_mut(&mut self, id: DiskId) -> Result<&mut Disk, PuzzleError> {
        let i = *self.index.get(&id).ok_or(PuzzleError::UnknownDisk(id))?;
        Ok(&mut self.disks[i])
    }

    pub fn queue(&self) -> &MoveQueue {
        &self.queue
    }

    pub(crate) fn queue_mut(&mut self) -> &mut MoveQueue {
        &mut self.queue
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Topmost disk on `peg` that is not in transit
    pub fn top_eligible(&self, peg: PegId) -> Option<DiskId> {
        self.peg(peg)
            .disks
            .iter()
            .rev()
            .copied()
            .find(|&id| self.disk(id).is_some_and(|d| !d.in_transit))
    }

    /// Detach a disk from normal ordering and raise it to `lift_order`
    pub(crate) fn lift(&mut self, id: DiskId, lift_order: usize) -> Result<(), PuzzleError> {
        let disk = self.disk_mut(id)?;
        disk.in_transit = true;
        disk.order = lift_order;
        Ok(())
    }

    /// Move `id` from its current peg onto the top of `to`
    pub(crate) fn transfer(&mut self, id: DiskId, to: PegId) -> Result<(), PuzzleError> {
        let (from, rank) = {
            let disk = self.disk(id).ok_or(PuzzleError::UnknownDisk(id))?;
            (disk.peg, disk.rank)
        };

        if let Some(&below_id) = self.peg(to).disks.last() {
            let below = self.disk(below_id).ok_or(PuzzleError::UnknownDisk(below_id))?;
            if below.rank < rank {
                return Err(PuzzleError::LargerOnSmaller {
                    disk: id,
                    rank,
                    below: below.rank,
                });
            }
        }

        let source = &mut self.pegs[from.index()].disks;
        let pos = source
            .iter()
            .rposition(|&d| d == id)
            .ok_or(PuzzleError::NotOnPeg { disk: id, peg: from })?;
        source.remove(pos);

        self.pegs[to.index()].disks.push(id);
        self.disk_mut(id)?.peg = to;
        Ok(())
    }

    /// Recompute the stacking index from the disk's current peg
    pub(crate) fn settle_order(&mut self, id: DiskId) -> Result<usize, PuzzleError> {
        let peg = self.disk(id).ok_or(PuzzleError::UnknownDisk(id))?.peg;
        let order = self.peg(peg).len().saturating_sub(1);
        self.disk_mut(id)?.order = order;
        Ok(order)
    }

    pub(crate) fn land(&mut self, id: DiskId) -> Result<(), PuzzleError> {
        self.disk_mut(id)?.in_transit = false;
        Ok(())
    }

    /// Ranks on each peg, bottom to top
    pub fn rank_layout(&self) -> [Vec<u32>; 3] {
        let ranks = |peg: &Peg| -> Vec<u32> {
            peg.disks
                .iter()
                .filter_map(|&id| self.disk(id).map(|d| d.rank))
                .collect()
        };
        [ranks(&self.pegs[0]), ranks(&self.pegs[1]), ranks(&self.pegs[2])]
    }

    /// Check the quiescent invariants: every disk on exactly one peg,
    /// each peg strictly descending, nothing in transit.
    pub fn is_consistent(&self) -> bool {
        let mut seen = vec![false; self.disks.len()];

        for (peg_index, peg) in self.pegs.iter().enumerate() {
            let mut prev_rank: Option<u32> = None;
            for &id in &peg.disks {
                let Some(&i) = self.index.get(&id) else {
                    return false;
                };
                if seen[i] {
                    return false;
                }
                seen[i] = true;

                let disk = &self.disks[i];
                if disk.in_transit || disk.peg.index() != peg_index {
                    return false;
                }
                if prev_rank.is_some_and(|prev| prev <= disk.rank) {
                    return false;
                }
                prev_rank = Some(disk.rank);
            }
        }

        seen.into_iter().all(|s| s)
    }

    /// All disks on peg 3
    pub fn is_solved(&self) -> bool {
        self.peg(PegId::C).len() == self.disks.len()
    }
}
