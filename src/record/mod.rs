//! Records: the input items charts tally.
//!
//! A record is a bag of named category fields plus a numeric weight. The
//! grouping field is chosen per chart at runtime, so records carry their
//! fields as a map rather than a fixed struct.

mod json;
mod record;

pub use json::{from_json_str, from_json_value, DEFAULT_WEIGHT_FIELD};
pub use record::{matching, Record};
