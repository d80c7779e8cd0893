//! Request sequencing for store slices
//!
//! Every request is stamped with a number from a shared, strictly increasing
//! counter. A slice remembers the newest stamp it has applied and refuses
//! anything older, so a slow response can never overwrite a fresher one.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues strictly increasing request numbers, starting at 1
#[derive(Debug, Default)]
pub struct RequestSequencer {
    last: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> u64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Newest request number applied to one slice
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SequenceMark(u64);

impl SequenceMark {
    /// Accept `seq` if it is newer than anything applied so far
    pub fn admit(&mut self, seq: u64) -> bool {
        if seq > self.0 {
            self.0 = seq;
            true
        } else {
            false
        }
    }

    pub fn latest(&self) -> u64 {
        self.0
    }
}
