//! Wiring pointer interaction between charts.

mod hover;

pub use hover::HoverLink;
