//! Off-screen image storage.
//!
//! The compute stage writes full frames into a double-buffered store; the
//! display stage reads the other slot. Slot assignment is pure state in
//! [`SlotSequencer`], and the handoff from compute write to display read is
//! gated on an explicit [`CompletionSignal`] rather than on queue submission
//! order.

mod signal;
mod slots;
mod store;

pub use signal::CompletionSignal;
pub use slots::{SlotSequencer, TickPlan, SLOT_COUNT};
pub use store::ImageStore;
