//! Shared, observable state.
//!
//! A [`Store`] usually holds the full record set; charts bound to it with
//! [`ChartHandle::bind`](crate::ChartHandle::bind) refresh whenever it
//! changes.

mod store;

pub use store::{Store, Subscription};
