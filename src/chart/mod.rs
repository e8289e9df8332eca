//! Chart assembly: configuration plus the handle returned to callers.

mod config;
mod handle;

pub use config::{ChartConfig, UnknownKeyPolicy, DEFAULT_SENTINEL};
pub use handle::{ChartHandle, TallyChart, Updater};
