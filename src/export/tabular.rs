use crate::export::error::ExportError;
use crate::structs::PhotoRecord;
use std::io::{Read, Write};

/// Column names, in [`PhotoRecord`] field order.
pub const COLUMNS: [&str; 22] = [
    "path",
    "file_size_bytes",
    "modified_at",
    "camera_make",
    "camera_model",
    "lens_model",
    "iso",
    "aperture",
    "shutter_speed",
    "exposure_time",
    "focal_length",
    "focal_length_35mm",
    "captured_at",
    "latitude",
    "longitude",
    "altitude",
    "width",
    "height",
    "flash",
    "metering_mode",
    "white_balance",
    "exposure_program",
];

/// Writes one row per photo, with a header naming every [`PhotoRecord`] field.
/// Absent values become empty cells. Without photos only the header is written.
pub fn write_csv<W: Write>(photos: &[PhotoRecord], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    if photos.is_empty() {
        wtr.write_record(COLUMNS)?;
    }
    for photo in photos {
        wtr.serialize(photo)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Parses rows written by [`write_csv`] back into records; empty cells stay absent.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<PhotoRecord>, ExportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let photos = rdr.deserialize().collect::<Result<Vec<PhotoRecord>, _>>()?;
    Ok(photos)
}
