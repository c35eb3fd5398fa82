// Integration tests for the move-sequence solver

use hanoitty::puzzle::legality;
use hanoitty::solver::{self, move_count, Move, PegId, SolverError};
use proptest::prelude::*;
use std::sync::Arc;

fn labels(moves: &[Move]) -> Vec<(u8, u8)> {
    moves.iter().map(|m| m.labels()).collect()
}

#[test]
fn test_known_small_solutions() {
    assert_eq!(labels(&solver::solve_standard(1).unwrap()), vec![(1, 3)]);
    assert_eq!(
        labels(&solver::solve_standard(2).unwrap()),
        vec![(1, 2), (1, 3), (2, 3)]
    );

    let three = solver::solve_standard(3).unwrap();
    assert_eq!(
        labels(&three),
        vec![(1, 3), (1, 2), (3, 2), (1, 3), (2, 1), (2, 3), (1, 3)]
    );
}

#[test]
fn test_even_disk_count_starts_with_spare_peg() {
    let moves = solver::solve_standard(4).unwrap();
    assert_eq!(moves.len(), 15);
    assert_eq!(moves[0].labels(), (1, 2));
    assert_eq!(moves[14].labels(), (2, 3));
}

#[test]
fn test_zero_is_rejected() {
    assert_eq!(
        solver::solve_standard(0).map(|m| m.len()),
        Err(SolverError::InvalidDiskCount(0))
    );
}

#[test]
fn test_memoized_identity_per_key() {
    let a = solver::solve_cached(7, PegId::C, PegId::A).unwrap();
    let b = solver::solve_cached(7, PegId::C, PegId::A).unwrap();
    let other = solver::solve_cached(7, PegId::C, PegId::B).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &other));
    assert_ne!(&a[..], &other[..]);
}

#[test]
fn test_thirteen_disks_replay() {
    let moves = solver::solve_standard(13).unwrap();
    assert_eq!(moves.len(), 8191);
    let pegs = legality::replay(13, PegId::A, &moves).expect("illegal move");
    assert!(pegs[0].is_empty());
    assert!(pegs[1].is_empty());
    assert_eq!(pegs[2], (0..13).rev().collect::<Vec<_>>());
}

fn peg_pair() -> impl Strategy<Value = (PegId, PegId)> {
    (1u8..=3, 1u8..=3)
        .prop_filter("pegs must differ", |(a, b)| a != b)
        .prop_map(|(a, b)| (PegId::new(a).unwrap(), PegId::new(b).unwrap()))
}

proptest! {
    #[test]
    fn prop_length_is_two_pow_n_minus_one(n in 1u32..=12, (from, to) in peg_pair()) {
        let moves = solver::solve(n, from, to).unwrap();
        prop_assert_eq!(moves.len(), move_count(n));
        prop_assert_eq!(moves.len(), (1usize << n) - 1);
    }

    #[test]
    fn prop_replay_is_legal_and_complete(n in 1u32..=10, (from, to) in peg_pair()) {
        let moves = solver::solve(n, from, to).unwrap();
        let pegs = legality::replay(n, from, &moves).unwrap();

        let expected: Vec<u32> = (0..n).rev().collect();
        prop_assert_eq!(&pegs[to.index()], &expected);
        prop_assert!(pegs[from.index()].is_empty());
        prop_assert!(pegs[from.spare(to).index()].is_empty());
    }

    #[test]
    fn prop_cache_matches_pure_solver(n in 1u32..=10, (from, to) in peg_pair()) {
        let cached = solver::solve_cached(n, from, to).unwrap();
        let again = solver::solve_cached(n, from, to).unwrap();
        prop_assert!(Arc::ptr_eq(&cached, &again));
        prop_assert_eq!(&cached[..], &solver::solve(n, from, to).unwrap()[..]);
    }

    #[test]
    fn prop_moves_never_stay_put(n in 1u32..=8, (from, to) in peg_pair()) {
        for mv in solver::solve(n, from, to).unwrap() {
            prop_assert_ne!(mv.from, mv.to);
        }
    }
}
