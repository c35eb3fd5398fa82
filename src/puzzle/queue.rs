//! Remaining-move queue consumed front to back

use crate::solver::Move;
use std::sync::Arc;

/// Cursor over a shared, immutable solver output
#[derive(Debug, Clone)]
pub struct MoveQueue {
    moves: Arc<[Move]>,
    next: usize,
}

impl MoveQueue {
    pub fn new(moves: Arc<[Move]>) -> Self {
        MoveQueue { moves, next: 0 }
    }

    /// Take the next move, in solver order
    pub fn pop_front(&mut self) -> Option<Move> {
        let mv = self.moves.get(self.next).copied()?;
        self.next += 1;
        Some(mv)
    }

    pub fn peek(&self) -> Option<Move> {
        self.moves.get(self.next).copied()
    }

    pub fn remaining(&self) -> usize {
        self.moves.len() - self.next
    }

    /// Number of moves already handed out
    pub fn consumed(&self) -> usize {
        self.next
    }

    pub fn total(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The full solution, including consumed moves
    pub fn all(&self) -> &Arc<[Move]> {
        &self.moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::PegId;

    #[test]
    fn test_pops_in_order() {
        let moves: Arc<[Move]> = vec![
            Move::new(PegId::A, PegId::B),
            Move::new(PegId::A, PegId::C),
            Move::new(PegId::B, PegId::C),
        ]
        .into();
        let mut queue = MoveQueue::new(Arc::clone(&moves));

        assert_eq!(queue.remaining(), 3);
        assert_eq!(queue.pop_front(), Some(moves[0]));
        assert_eq!(queue.peek(), Some(moves[1]));
        assert_eq!(queue.pop_front(), Some(moves[1]));
        assert_eq!(queue.pop_front(), Some(moves[2]));
        assert_eq!(queue.pop_front(), None);
        assert!(queue.is_empty());
        assert_eq!(queue.consumed(), 3);
        assert_eq!(queue.total(), 3);
    }
}
