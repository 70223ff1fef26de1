//! Run-level infrastructure shared by the engine

pub mod clock;

pub use clock::{Clock, FixedClock, RunClock, SystemClock};
