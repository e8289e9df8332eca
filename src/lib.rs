//! # Tallyboard
//!
//! Small, reusable, data-driven tally widgets.
//!
//! A chart groups records by one category field, sums their weights and
//! shows one labeled value per category. It is built once; afterwards the
//! caller holds a [`ChartHandle`] exposing only the slot parents (for
//! attaching interaction) and an update function (for feeding new data).
//!
//! ## Aggregation
//!
//! - [`aggregate`] - group records by a field and sum their weights
//! - [`Record`] - category fields plus a weight, built in code or parsed
//!   from JSON with [`record::from_json_str`]
//!
//! ## Display
//!
//! - [`TallyChart::build`] - create slots on a [`Surface`] and fill them
//! - [`ChartHandle`] - parents plus update; slots are never recreated
//! - [`HoverLink`] - narrow other charts to the hovered key
//! - [`Store`] - shared record set charts can be bound to
//!
//! ```
//! use tallyboard::{shared, ChartConfig, MemorySurface, Record, TallyChart};
//!
//! let records = vec![
//!     Record::new(1.0).with_field("color", "blue"),
//!     Record::new(4.0).with_field("color", "red"),
//!     Record::new(18.0).with_field("color", "blue"),
//! ];
//!
//! let surface = shared(MemorySurface::new());
//! let chart = TallyChart::build(surface.clone(), &records, ChartConfig::new("color")).unwrap();
//! assert_eq!(surface.read().render(), "blue: 19\nred: 4\n");
//!
//! chart.update(&records[..1]).unwrap();
//! assert_eq!(surface.read().render(), "blue: 1\nred: 0\n");
//! ```

pub mod chart;
pub mod error;
pub mod interaction;
pub mod record;
pub mod signal;
pub mod store;
pub mod surface;
pub mod tally;
pub mod view;

// Re-export main types for convenience
pub use chart::{ChartConfig, ChartHandle, TallyChart, UnknownKeyPolicy, Updater};
pub use error::{Result, TallyError};
pub use interaction::HoverLink;
pub use record::Record;
pub use signal::Signal;
pub use store::Store;
pub use surface::{datum_of, shared, ElementId, MemorySurface, SharedSurface, Surface};
pub use tally::{aggregate, Tally};
pub use view::ChartState;
