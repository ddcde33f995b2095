//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies of the engine (wall-clock time, notification
//! consumers) are abstracted behind traits or callbacks. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod recorder;

pub use clock::NullClock;
pub use recorder::EventRecorder;
