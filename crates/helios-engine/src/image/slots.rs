/// Number of image slots (double buffer).
pub const SLOT_COUNT: usize = 2;

/// Work the orchestrator should perform on one tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TickPlan {
    /// The read/write slots were swapped for this tick.
    pub swap: bool,
    /// A new compute pass should be dispatched into the write slot.
    pub dispatch: bool,
}

/// Pure sequencing state for the double-buffered image store.
///
/// The display stage always reads `read_slot`; the compute stage only ever
/// writes `write_slot`. A new compute pass is dispatched only once the
/// previous submission has signalled completion, and the slots are swapped at
/// that point so the freshly written image becomes the one displayed.
///
/// Invariant: `read_slot != write_slot` at all times.
#[derive(Debug)]
pub struct SlotSequencer {
    read: usize,
    write: usize,
    in_flight: bool,
}

impl SlotSequencer {
    pub fn new() -> Self {
        Self {
            read: 0,
            write: 1,
            in_flight: false,
        }
    }

    /// Slot the display stage reads this tick.
    pub fn read_slot(&self) -> usize {
        self.read
    }

    /// Slot the compute stage writes.
    pub fn write_slot(&self) -> usize {
        self.write
    }

    /// True while a compute submission owns the write slot.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Plans one tick given whether the in-flight compute submission (if any)
    /// has completed.
    ///
    /// While a submission is still running, the write slot stays owned by the
    /// GPU: no swap, no new dispatch, and the display keeps showing the old
    /// image.
    pub fn plan(&mut self, compute_complete: bool) -> TickPlan {
        let mut plan = TickPlan {
            swap: false,
            dispatch: false,
        };

        if self.in_flight {
            if !compute_complete {
                return plan;
            }
            std::mem::swap(&mut self.read, &mut self.write);
            self.in_flight = false;
            plan.swap = true;
        }

        self.in_flight = true;
        plan.dispatch = true;
        plan
    }
}

impl Default for SlotSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_dispatches_without_swapping() {
        let mut seq = SlotSequencer::new();
        assert!(!seq.in_flight());

        let plan = seq.plan(false);
        assert_eq!(
            plan,
            TickPlan {
                swap: false,
                dispatch: true
            }
        );
        assert!(seq.in_flight());
        assert_eq!(seq.read_slot(), 0);
        assert_eq!(seq.write_slot(), 1);
    }

    #[test]
    fn no_dispatch_while_compute_is_in_flight() {
        let mut seq = SlotSequencer::new();
        seq.plan(false);

        let plan = seq.plan(false);
        assert_eq!(
            plan,
            TickPlan {
                swap: false,
                dispatch: false
            }
        );
        // Display keeps reading the old slot.
        assert_eq!(seq.read_slot(), 0);
    }

    #[test]
    fn completion_swaps_then_dispatches_into_the_displayed_slot() {
        let mut seq = SlotSequencer::new();
        seq.plan(false);

        let plan = seq.plan(true);
        assert_eq!(
            plan,
            TickPlan {
                swap: true,
                dispatch: true
            }
        );
        assert_eq!(seq.read_slot(), 1);
        assert_eq!(seq.write_slot(), 0);
    }

    #[test]
    fn read_and_write_slots_never_alias() {
        let mut seq = SlotSequencer::new();
        let completions = [false, true, true, false, false, true, true, true];
        for done in completions {
            seq.plan(done);
            assert_ne!(seq.read_slot(), seq.write_slot());
            assert!(seq.read_slot() < SLOT_COUNT);
            assert!(seq.write_slot() < SLOT_COUNT);
        }
    }
}
