//! Time-based [`TransitionHost`] for the terminal board
//!
//! Each transition is an eased tween between the disk's last drawn position
//! and the requested [`Pose`]. The animator is advanced explicitly with
//! [`TerminalAnimator::advance`] so tests can drive the clock.

use crate::driver::{Completion, Phase, Pose, TransitionHost};
use crate::puzzle::{DiskId, PuzzleState};
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Board coordinates: `x` is a peg index (0..=2), `y` a stacking level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl From<Pose> for Position {
    fn from(pose: Pose) -> Self {
        Position {
            x: pose.peg.index() as f64,
            y: pose.level as f64,
        }
    }
}

#[derive(Debug)]
struct Tween {
    from: Position,
    to: Position,
    started: Instant,
    completion: Completion,
}

#[derive(Debug)]
pub struct TerminalAnimator {
    phase_duration: Duration,
    impact_duration: Duration,
    now: Instant,
    positions: FxHashMap<DiskId, Position>,
    tweens: FxHashMap<DiskId, Tween>,
    impacts: FxHashMap<DiskId, Instant>,
    frame_requested: bool,
}

impl TerminalAnimator {
    pub fn new(phase_duration: Duration, impact_duration: Duration, now: Instant) -> Self {
        TerminalAnimator {
            phase_duration,
            impact_duration,
            now,
            positions: FxHashMap::default(),
            tweens: FxHashMap::default(),
            impacts: FxHashMap::default(),
            frame_requested: false,
        }
    }

    /// Forget every disk, e.g. after a reset
    pub fn clear(&mut self) {
        self.positions.clear();
        self.tweens.clear();
        self.impacts.clear();
        self.frame_requested = false;
    }

    /// Seed resting positions for disks the animator has not seen yet
    pub fn sync(&mut self, state: &PuzzleState) {
        for disk in state.disks() {
            self.positions.entry(disk.id).or_insert(Position {
                x: disk.peg.index() as f64,
                y: disk.order as f64,
            });
        }
    }

    /// Move the clock to `now`, finishing tweens whose time is up
    pub fn advance(&mut self, now: Instant) {
        self.now = now;
        let duration = self.phase_duration.as_secs_f64();

        let mut finished = Vec::new();
        for (&disk, tween) in &self.tweens {
            let elapsed = now.saturating_duration_since(tween.started).as_secs_f64();
            let t = if duration > 0.0 {
                (elapsed / duration).min(1.0)
            } else {
                1.0
            };
            let pos = Position {
                x: tween.from.x + (tween.to.x - tween.from.x) * ease_in_out(t),
                y: tween.from.y + (tween.to.y - tween.from.y) * ease_in_out(t),
            };
            self.positions.insert(disk, pos);
            if t >= 1.0 {
                finished.push(disk);
            }
        }

        for disk in finished {
            if let Some(tween) = self.tweens.remove(&disk) {
                self.positions.insert(disk, tween.to);
                tween.completion.complete();
            }
        }

        let impact = self.impact_duration;
        self.impacts
            .retain(|_, started| now.saturating_duration_since(*started) < impact);
    }

    pub fn position(&self, disk: DiskId) -> Option<Position> {
        self.positions.get(&disk).copied()
    }

    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }

    /// Whether `disk` is showing its landing flash
    pub fn is_flashing(&self, disk: DiskId) -> bool {
        self.impacts.contains_key(&disk)
    }

    /// Returns and clears the pending next-frame request
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }
}

fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

impl TransitionHost for TerminalAnimator {
    fn begin_transition(&mut self, disk: DiskId, _phase: Phase, target: Pose) -> Completion {
        let to = Position::from(target);
        let from = self.positions.get(&disk).copied().unwrap_or(to);
        let completion = Completion::new();
        self.tweens.insert(
            disk,
            Tween {
                from,
                to,
                started: self.now,
                completion: completion.clone(),
            },
        );
        completion
    }

    fn notify_impact(&mut self, disk: DiskId) {
        self.impacts.insert(disk, self.now);
    }

    fn request_next_frame(&mut self) {
        self.frame_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::PegId;

    #[test]
    fn test_tween_completes_after_duration() {
        let start = Instant::now();
        let mut animator =
            TerminalAnimator::new(Duration::from_millis(100), Duration::from_millis(50), start);
        let state = PuzzleState::new(2).unwrap();
        animator.sync(&state);

        let disk = state.disks()[1].id;
        let done = animator.begin_transition(disk, Phase::Lift, Pose {
            peg: PegId::A,
            level: 5,
        });

        animator.advance(start + Duration::from_millis(50));
        assert!(!done.is_complete());
        let mid = animator.position(disk).unwrap();
        assert!(mid.y > 1.0 && mid.y < 5.0);

        animator.advance(start + Duration::from_millis(100));
        assert!(done.is_complete());
        assert_eq!(animator.position(disk), Some(Position { x: 0.0, y: 5.0 }));
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_impact_flash_expires() {
        let start = Instant::now();
        let mut animator =
            TerminalAnimator::new(Duration::from_millis(100), Duration::from_millis(50), start);
        let state = PuzzleState::new(1).unwrap();
        let disk = state.disks()[0].id;

        animator.notify_impact(disk);
        assert!(animator.is_flashing(disk));
        animator.advance(start + Duration::from_millis(60));
        assert!(!animator.is_flashing(disk));
    }

    #[test]
    fn test_frame_request_is_taken_once() {
        let mut animator =
            TerminalAnimator::new(Duration::from_millis(1), Duration::from_millis(1), Instant::now());
        animator.request_next_frame();
        assert!(animator.take_frame_request());
        assert!(!animator.take_frame_request());
    }
}
