pub mod gps;
pub mod metadata;
