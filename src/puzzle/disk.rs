//! Disk identity and per-disk attributes

use crate::solver::PegId;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DISK_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique disk identifier, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiskId(u64);

impl DiskId {
    pub(crate) fn fresh() -> Self {
        DiskId(NEXT_DISK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DiskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single disk of the puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disk {
    pub id: DiskId,
    /// Size rank, 0 = smallest
    pub rank: u32,
    /// Stacking index on the current peg (raised while lifted)
    pub order: usize,
    /// Excluded from top-of-peg selection while set
    pub in_transit: bool,
    pub peg: PegId,
}

impl Disk {
    pub(crate) fn new(rank: u32, order: usize, peg: PegId) -> Self {
        Disk {
            id: DiskId::fresh(),
            rank,
            order,
            in_transit: false,
            peg,
        }
    }

    /// Width relative to the largest disk, in `(0, 1]`
    pub fn width_ratio(&self, disk_count: u32) -> f64 {
        f64::from(self.rank + 1) / f64::from(disk_count.max(1))
    }

    /// Hue in degrees, largest disk at 0°
    pub fn hue(&self, disk_count: u32) -> f64 {
        let n = disk_count.max(1);
        let from_bottom = n - 1 - self.rank.min(n - 1);
        f64::from(from_bottom) / f64::from(n) * 360.0
    }
}
