//! Independent move-legality checker
//!
//! Replays a move list on a bare three-stack model of disk ranks. Used to
//! validate solver output without involving [`PuzzleState`](super::PuzzleState).

use crate::solver::{Move, PegId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("move {index} ({mv}): source peg is empty")]
    EmptySource { index: usize, mv: Move },

    #[error("move {index} ({mv}): disk {moving} placed on smaller disk {below}")]
    LargerOnSmaller {
        index: usize,
        mv: Move,
        moving: u32,
        below: u32,
    },
}

/// Replay `moves` starting with `disks` disks on `start`.
///
/// Returns the final stacks (ranks, bottom to top) indexed by peg.
pub fn replay(disks: u32, start: PegId, moves: &[Move]) -> Result<[Vec<u32>; 3], IllegalMove> {
    let mut pegs: [Vec<u32>; 3] = Default::default();
    pegs[start.index()] = (0..disks).rev().collect();

    for (index, &mv) in moves.iter().enumerate() {
        let moving = pegs[mv.from.index()]
            .pop()
            .ok_or(IllegalMove::EmptySource { index, mv })?;

        if let Some(&below) = pegs[mv.to.index()].last() {
            if below < moving {
                return Err(IllegalMove::LargerOnSmaller {
                    index,
                    mv,
                    moving,
                    below,
                });
            }
        }
        pegs[mv.to.index()].push(moving);
    }

    Ok(pegs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_larger_on_smaller() {
        let moves = [Move::new(PegId::A, PegId::B), Move::new(PegId::A, PegId::B)];
        let err = replay(2, PegId::A, &moves).unwrap_err();
        assert_eq!(
            err,
            IllegalMove::LargerOnSmaller {
                index: 1,
                mv: moves[1],
                moving: 1,
                below: 0,
            }
        );
    }

    #[test]
    fn test_rejects_empty_source() {
        let moves = [Move::new(PegId::B, PegId::C)];
        assert!(matches!(
            replay(1, PegId::A, &moves),
            Err(IllegalMove::EmptySource { index: 0, .. })
        ));
    }
}
