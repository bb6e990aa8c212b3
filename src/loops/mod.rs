//! Control-loop policies: the "configure pins, then loop forever" pattern shared by the four
//! binaries.
//!
//! Each policy repeats one [`step`](Blink::step) for as long as its [`LoopControl`] allows,
//! so a loop can be halted deterministically (and tested) without touching the loop body.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod blink;
mod duty;
mod follow;

pub use blink::Blink;
pub use duty::DutyFollow;
pub use follow::LevelFollow;

/// Cloneable stop flag checked by every loop iteration.
///
/// All clones share the same flag: stopping any of them stops the loop.
#[derive(Clone, Debug)]
pub struct LoopControl {
    running: Arc<AtomicBool>,
}

impl Default for LoopControl {
    fn default() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl LoopControl {
    /// Indicates whether the loop should run its next iteration.
    pub fn should_continue(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Requests the loop to halt after its current iteration.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
