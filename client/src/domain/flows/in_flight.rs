//! Single-slot guard preventing overlapping runs of one flow.

use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether a flow run is pending.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    pending: AtomicBool,
}

impl InFlight {
    /// Claim the slot, or `None` when a run is already pending.
    pub(crate) fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                pending: &self.pending,
            })
    }

    /// Whether a run currently holds the slot.
    pub(crate) fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

/// Releases the slot on drop, whichever way the run ended.
#[derive(Debug)]
pub(crate) struct InFlightGuard<'a> {
    pending: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.pending.store(false, Ordering::Release);
    }
}
