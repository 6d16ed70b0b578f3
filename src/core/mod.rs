//! Allocation of recurring transactions into budget periods.

pub mod engine;

pub use engine::{AllocationEngine, AllocationSummary};
