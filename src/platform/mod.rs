//! Platform abstraction layer
//!
//! Host-facing plumbing shared by the native and browser front ends:
//! - Frame clock (real time to fixed ticks)
//! - Input queue (events applied at tick boundaries)

pub mod input;
pub mod time;

pub use input::InputQueue;
pub use time::FrameClock;
