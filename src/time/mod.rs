//! Time handling for capture timestamps.
mod parsing;
pub use parsing::parse_capture_time;
