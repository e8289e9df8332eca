//! Observable values.
//!
//! A [`Signal`] holds a value and runs its watchers whenever the value is
//! replaced. Slot values are signals; the surface text of a slot is kept in
//! sync by a watcher.

mod signal;

pub use signal::{Signal, WatchGuard};
