use thiserror::Error;

/// Failure of a [`TagSource`](super::source::TagSource) to read one file's tags.
///
/// The assembler never propagates these: a file that decodes as an image but whose
/// tags can't be read still becomes a record, just without metadata.
#[derive(Error, Debug)]
pub enum TagSourceError {
    #[error("I/O error while reading tags: {0}")]
    Io(#[from] std::io::Error),

    #[error("Exif container could not be parsed: {0}")]
    Exif(#[from] exif::Error),

    #[error("Exiftool failed to read the file: {0}")]
    ExifTool(#[from] exiftool::ExifToolError),

    #[error("The exiftool process is unusable after a panic in another thread")]
    Poisoned,
}
