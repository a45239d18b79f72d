//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies are abstracted behind traits in `skillmint-types`;
//! this crate provides implementations that return controlled values and
//! never consult the real world. Swap them in wherever a test needs to
//! steer time.

pub mod clock;

pub use clock::NullClock;
