//! Signal processing types and traits.
//!
//! This module provides the fundamental signal processing abstractions used
//! throughout the crate, including:
//! - `Signal` trait for all signal sources and processors
//! - `Gain` and `Mix` combinators plus the `SignalExt` chaining trait

pub mod combinators;
mod signal;

pub use combinators::{Gain, Mix, SignalExt};
pub use signal::Signal;
