//! Raw embedded tags: how they are read from files and how they are represented
//! before normalization.
pub mod codes;
pub mod error;
pub mod source;
pub mod structs;

pub use error::TagSourceError;
pub use source::{ExifReaderSource, ExifToolSource, TagSource};
pub use structs::{RawTags, RawValue, decode_text};
