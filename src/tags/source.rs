use crate::tags::error::TagSourceError;
use crate::tags::structs::{RawTags, RawValue};
use exif::{In, Value};
use exiftool::ExifTool;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

/// Reads the embedded tags of one file into a [`RawTags`] mapping.
///
/// A file without any embedded metadata is not an error: implementations return
/// an empty mapping for it.
pub trait TagSource: Send + Sync {
    /// Short backend name, used in log output.
    fn name(&self) -> &'static str;

    fn read_tags(&self, path: &Path) -> Result<RawTags, TagSourceError>;
}

/// Pure-Rust backend built on `kamadak-exif`.
///
/// Reads JPEG, TIFF, PNG, WebP and HEIF containers. Only the primary image's IFDs
/// are kept; thumbnail tags are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifReaderSource;

impl TagSource for ExifReaderSource {
    fn name(&self) -> &'static str {
        "kamadak-exif"
    }

    fn read_tags(&self, path: &Path) -> Result<RawTags, TagSourceError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let exif = match exif::Reader::new()
            .continue_on_error(true)
            .read_from_container(&mut reader)
            .or_else(|e| {
                e.distill_partial_result(|errors| {
                    for error in errors {
                        debug!(path = %path.display(), %error, "skipping broken exif field");
                    }
                })
            }) {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_)) => return Ok(RawTags::default()),
            Err(e) => return Err(e.into()),
        };

        Ok(exif
            .fields()
            .filter(|field| field.ifd_num == In::PRIMARY)
            .filter_map(|field| {
                raw_value_from_exif(&field.value).map(|value| (field.tag.to_string(), value))
            })
            .collect())
    }
}

fn raw_value_from_exif(value: &Value) -> Option<RawValue> {
    let items: Vec<RawValue> = match value {
        Value::Byte(v) => v.iter().map(|&x| RawValue::Integer(x.into())).collect(),
        Value::Short(v) => v.iter().map(|&x| RawValue::Integer(x.into())).collect(),
        Value::Long(v) => v.iter().map(|&x| RawValue::Integer(x.into())).collect(),
        Value::SByte(v) => v.iter().map(|&x| RawValue::Integer(x.into())).collect(),
        Value::SShort(v) => v.iter().map(|&x| RawValue::Integer(x.into())).collect(),
        Value::SLong(v) => v.iter().map(|&x| RawValue::Integer(x.into())).collect(),
        Value::Rational(v) => v
            .iter()
            .map(|r| RawValue::Rational(r.num.into(), r.denom.into()))
            .collect(),
        Value::SRational(v) => v
            .iter()
            .map(|r| RawValue::Rational(r.num.into(), r.denom.into()))
            .collect(),
        Value::Float(v) => v.iter().map(|&x| RawValue::Float(x.into())).collect(),
        Value::Double(v) => v.iter().map(|&x| RawValue::Float(x)).collect(),
        Value::Ascii(v) => v.iter().map(|s| RawValue::Bytes(s.clone())).collect(),
        Value::Undefined(bytes, _) => return Some(RawValue::Bytes(bytes.clone())),
        _ => return None,
    };
    RawValue::from_items(items)
}

/// Backend that drives a long-running `exiftool` process.
///
/// Uses exiftool's numeric output (`-n`), so settings arrive as plain numbers and
/// GPS coordinates as unsigned decimal degrees next to their hemisphere tags.
/// Requests are serialized; a single exiftool process handles one file at a time.
pub struct ExifToolSource {
    exiftool: Mutex<ExifTool>,
}

impl ExifToolSource {
    /// Starts exiftool from the `PATH`.
    pub fn new() -> Result<Self, exiftool::ExifToolError> {
        Ok(Self {
            exiftool: Mutex::new(ExifTool::new()?),
        })
    }

    pub fn with_executable(executable: &Path) -> Result<Self, exiftool::ExifToolError> {
        Ok(Self {
            exiftool: Mutex::new(ExifTool::with_executable(executable)?),
        })
    }
}

impl TagSource for ExifToolSource {
    fn name(&self) -> &'static str {
        "exiftool"
    }

    fn read_tags(&self, path: &Path) -> Result<RawTags, TagSourceError> {
        let exiftool = self.exiftool.lock().map_err(|_| TagSourceError::Poisoned)?;
        let numeric_exif = exiftool.json(path, &["-n"])?;
        Ok(RawTags::from_json(&numeric_exif))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{full_exif_fields, jpeg_with_exif, plain_jpeg};
    use exif::{Rational, SRational};

    #[test]
    fn test_reads_primary_fields_from_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("full.jpg");
        std::fs::write(&path, jpeg_with_exif(&full_exif_fields())).unwrap();

        let tags = ExifReaderSource.read_tags(&path).unwrap();

        assert_eq!(
            tags.get("Make").and_then(RawValue::as_text).as_deref(),
            Some("Canon")
        );
        assert_eq!(tags.get("FNumber"), Some(&RawValue::Rational(18, 10)));
        assert_eq!(
            tags.get("GPSLatitude"),
            Some(&RawValue::List(vec![
                RawValue::Rational(37, 1),
                RawValue::Rational(46, 1),
                RawValue::Rational(0, 1),
            ]))
        );
        assert_eq!(
            tags.get("GPSLatitudeRef").and_then(RawValue::as_text).as_deref(),
            Some("N")
        );
    }

    #[test]
    fn test_jpeg_without_exif_gives_empty_tags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.jpg");
        std::fs::write(&path, plain_jpeg()).unwrap();

        let tags = ExifReaderSource.read_tags(&path).unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = ExifReaderSource.read_tags(Path::new("/nonexistent/photo.jpg"));
        assert!(matches!(result, Err(TagSourceError::Io(_))));
    }

    #[test]
    fn test_value_conversion() {
        assert_eq!(
            raw_value_from_exif(&Value::Short(vec![400])),
            Some(RawValue::Integer(400))
        );
        assert_eq!(
            raw_value_from_exif(&Value::Short(vec![100, 200])),
            Some(RawValue::List(vec![RawValue::Integer(100), RawValue::Integer(200)]))
        );
        assert_eq!(
            raw_value_from_exif(&Value::Rational(vec![Rational { num: 1, denom: 250 }])),
            Some(RawValue::Rational(1, 250))
        );
        assert_eq!(
            raw_value_from_exif(&Value::SRational(vec![SRational { num: -2, denom: 3 }])),
            Some(RawValue::Rational(-2, 3))
        );
        assert_eq!(raw_value_from_exif(&Value::Long(vec![])), None);
    }
}
