//! Towers of Hanoi move-sequence solver
//!
//! This module computes the optimal move sequence for the classic 3-peg puzzle:
//! - [`solve`]: pure recursive solver, returns a fresh `Vec<Move>`
//! - [`solve_cached`]: memoized by `(disks, from, to)` for the process lifetime
//! - [`solve_standard`]: the usual peg 1 → peg 3 puzzle
//!
//! # Algorithm
//!
//! ```text
//! solve(n, from, to) = solve(n-1, from, spare) ++ [from→to] ++ solve(n-1, spare, to)
//! spare              = 6 - from - to
//! ```
//!
//! The result always has exactly `2^n - 1` moves.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use thiserror::Error;

/// Upper bound on the disk count the solver accepts (2^24 - 1 moves)
pub const MAX_DISKS: u32 = 24;

/// Sum of the three peg labels, used to find the spare peg
const PEG_LABEL_SUM: u8 = 1 + 2 + 3;

/// Errors raised at the solver boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("disk count must be at least 1, got {0}")]
    InvalidDiskCount(u32),

    #[error("disk count {requested} exceeds the supported maximum of {max}")]
    TooManyDisks { requested: u32, max: u32 },

    #[error("source and destination peg are both {0}")]
    SamePeg(PegId),

    #[error("peg label must be 1, 2 or 3, got {0}")]
    InvalidPeg(u8),
}

/// One of the three pegs, labelled 1..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PegId(u8);

impl PegId {
    pub const A: PegId = PegId(1);
    pub const B: PegId = PegId(2);
    pub const C: PegId = PegId(3);

    pub const ALL: [PegId; 3] = [PegId::A, PegId::B, PegId::C];

    /// Build a peg from its 1-based label
    pub fn new(label: u8) -> Result<Self, SolverError> {
        match label {
            1..=3 => Ok(PegId(label)),
            other => Err(SolverError::InvalidPeg(other)),
        }
    }

    /// Build a peg from a 0-based index, if in range
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The 1-based label
    pub fn label(self) -> u8 {
        self.0
    }

    /// The 0-based index into a `[_; 3]`
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// The peg that is neither `self` nor `other`.
    ///
    /// Only meaningful when `self != other`.
    pub fn spare(self, other: PegId) -> PegId {
        PegId(PEG_LABEL_SUM - self.0 - other.0)
    }
}

impl fmt::Display for PegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Move the top disk of `from` onto `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: PegId,
    pub to: PegId,
}

impl Move {
    pub fn new(from: PegId, to: PegId) -> Self {
        Move { from, to }
    }

    /// The move as a pair of 1-based labels
    pub fn labels(self) -> (u8, u8) {
        (self.from.label(), self.to.label())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}

/// Number of moves in an optimal solution for `disks` disks
pub fn move_count(disks: u32) -> usize {
    (1usize << disks) - 1
}

fn check_args(disks: u32, from: PegId, to: PegId) -> Result<(), SolverError> {
    if disks < 1 {
        return Err(SolverError::InvalidDiskCount(disks));
    }
    if disks > MAX_DISKS {
        return Err(SolverError::TooManyDisks {
            requested: disks,
            max: MAX_DISKS,
        });
    }
    if from == to {
        return Err(SolverError::SamePeg(from));
    }
    Ok(())
}

/// Compute the optimal move sequence moving `disks` disks from `from` to `to`
pub fn solve(disks: u32, from: PegId, to: PegId) -> Result<Vec<Move>, SolverError> {
    check_args(disks, from, to)?;

    let mut moves = Vec::with_capacity(move_count(disks));
    solve_into(disks, from, to, &mut moves);
    Ok(moves)
}

// Recursion depth is bounded by MAX_DISKS.
fn solve_into(disks: u32, from: PegId, to: PegId, out: &mut Vec<Move>) {
    if disks == 1 {
        out.push(Move::new(from, to));
        return;
    }

    let spare = from.spare(to);
    solve_into(disks - 1, from, spare, out);
    out.push(Move::new(from, to));
    solve_into(disks - 1, spare, to, out);
}

type CacheKey = (u32, PegId, PegId);

fn cache() -> &'static Mutex<FxHashMap<CacheKey, Arc<[Move]>>> {
    static CACHE: OnceLock<Mutex<FxHashMap<CacheKey, Arc<[Move]>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(FxHashMap::default()))
}

/// Memoized [`solve`].
///
/// Repeated calls with the same arguments return the same shared allocation.
pub fn solve_cached(disks: u32, from: PegId, to: PegId) -> Result<Arc<[Move]>, SolverError> {
    check_args(disks, from, to)?;

    let key = (disks, from, to);
    let mut cache = match cache().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    if let Some(moves) = cache.get(&key) {
        return Ok(Arc::clone(moves));
    }

    tracing::debug!(disks, %from, %to, "solver cache miss");
    let moves: Arc<[Move]> = solve(disks, from, to)?.into();
    cache.insert(key, Arc::clone(&moves));
    Ok(moves)
}

/// Memoized solution for all disks on peg 1 moving to peg 3
pub fn solve_standard(disks: u32) -> Result<Arc<[Move]>, SolverError> {
    solve_cached(disks, PegId::A, PegId::C)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(moves: &[Move]) -> Vec<(u8, u8)> {
        moves.iter().map(|m| m.labels()).collect()
    }

    #[test]
    fn test_single_disk() {
        let moves = solve(1, PegId::A, PegId::C).unwrap();
        assert_eq!(labels(&moves), vec![(1, 3)]);
    }

    #[test]
    fn test_two_disks() {
        let moves = solve(2, PegId::A, PegId::C).unwrap();
        assert_eq!(labels(&moves), vec![(1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_three_disks_endpoints() {
        let moves = solve(3, PegId::A, PegId::C).unwrap();
        assert_eq!(moves.len(), 7);
        assert_eq!(moves[0].labels(), (1, 3));
        assert_eq!(moves[3].labels(), (1, 3));
        assert_eq!(moves[6].labels(), (1, 3));
    }

    #[test]
    fn test_spare_peg() {
        assert_eq!(PegId::A.spare(PegId::C), PegId::B);
        assert_eq!(PegId::B.spare(PegId::A), PegId::C);
        assert_eq!(PegId::C.spare(PegId::B), PegId::A);
    }

    #[test]
    fn test_zero_disks_rejected() {
        assert_eq!(
            solve(0, PegId::A, PegId::C),
            Err(SolverError::InvalidDiskCount(0))
        );
        assert!(solve_cached(0, PegId::A, PegId::C).is_err());
    }

    #[test]
    fn test_same_peg_rejected() {
        assert_eq!(
            solve(3, PegId::B, PegId::B),
            Err(SolverError::SamePeg(PegId::B))
        );
    }

    #[test]
    fn test_too_many_disks_rejected() {
        assert!(matches!(
            solve(MAX_DISKS + 1, PegId::A, PegId::C),
            Err(SolverError::TooManyDisks { .. })
        ));
    }

    #[test]
    fn test_peg_labels() {
        assert!(PegId::new(0).is_err());
        assert!(PegId::new(4).is_err());
        assert_eq!(PegId::new(2).unwrap().index(), 1);
        assert_eq!(PegId::from_index(2), Some(PegId::C));
        assert_eq!(PegId::from_index(3), None);
    }

    #[test]
    fn test_cached_returns_same_allocation() {
        let first = solve_cached(6, PegId::A, PegId::B).unwrap();
        let second = solve_cached(6, PegId::A, PegId::B).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(&first[..], &solve(6, PegId::A, PegId::B).unwrap()[..]);
    }
}
