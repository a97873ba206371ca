use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// Paths that aren't valid UTF-8 are written with replacement characters, so one
/// oddly named file can't fail a whole export.
fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// One successfully processed image.
///
/// Everything except `path`, `file_size_bytes` and `modified_at` is optional. A `None`
/// means the image did not carry the tag, or carried a value that could not be
/// normalized; it never means the file failed to process.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PhotoRecord {
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    pub file_size_bytes: u64,
    pub modified_at: DateTime<Utc>,
    pub camera_make: Option<String>,
    pub camera_model: Option<String>,
    pub lens_model: Option<String>,
    pub iso: Option<u32>,
    /// F-number, e.g. `1.8`.
    pub aperture: Option<f64>,
    /// Display form of the exposure time, e.g. `1/250` or `2s`.
    pub shutter_speed: Option<String>,
    /// Exposure time in seconds.
    pub exposure_time: Option<f64>,
    /// Focal length in millimetres.
    pub focal_length: Option<f64>,
    pub focal_length_35mm: Option<f64>,
    /// Capture time as recorded by the camera clock, without timezone.
    pub captured_at: Option<NaiveDateTime>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Metres relative to sea level.
    pub altitude: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub flash: Option<String>,
    pub metering_mode: Option<String>,
    pub white_balance: Option<String>,
    pub exposure_program: Option<String>,
}

impl PhotoRecord {
    /// A record carrying only file-system attributes.
    pub fn bare(path: PathBuf, file_size_bytes: u64, modified_at: DateTime<Utc>) -> Self {
        Self {
            path,
            file_size_bytes,
            modified_at,
            camera_make: None,
            camera_model: None,
            lens_model: None,
            iso: None,
            aperture: None,
            shutter_speed: None,
            exposure_time: None,
            focal_length: None,
            focal_length_35mm: None,
            captured_at: None,
            latitude: None,
            longitude: None,
            altitude: None,
            width: None,
            height: None,
            flash: None,
            metering_mode: None,
            white_balance: None,
            exposure_program: None,
        }
    }

    /// The coordinate pair, only when both halves are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Why a file or directory could not be processed.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Permission denied or another I/O error while opening or reading the file.
    FileUnreadable,
    /// The extension matched, but the content is not a decodable image.
    UnsupportedFormat,
    /// A directory could not be entered during the walk.
    DirectoryUnreadable,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FileUnreadable => "file unreadable",
            Self::UnsupportedFormat => "unsupported format",
            Self::DirectoryUnreadable => "directory unreadable",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FailureRecord {
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    pub reason: FailureReason,
    pub detail: String,
}

impl FailureRecord {
    pub fn new(path: impl Into<PathBuf>, reason: FailureReason, detail: impl fmt::Display) -> Self {
        Self {
            path: path.into(),
            reason,
            detail: detail.to_string(),
        }
    }
}

/// The outcome of analyzing one directory.
///
/// `photos` and `failures` together account for every file the walker considered,
/// each file exactly once. `directory_failures` lists directories the walk could
/// not enter; they are kept apart so they don't distort that count.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PhotoCorpus {
    pub photos: Vec<PhotoRecord>,
    pub failures: Vec<FailureRecord>,
    pub directory_failures: Vec<FailureRecord>,
}

impl PhotoCorpus {
    pub fn new(
        photos: Vec<PhotoRecord>,
        failures: Vec<FailureRecord>,
        directory_failures: Vec<FailureRecord>,
    ) -> Self {
        Self {
            photos,
            failures,
            directory_failures,
        }
    }

    /// Number of files the walker handed to the assembler.
    pub fn files_considered(&self) -> usize {
        self.photos.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty() && self.failures.is_empty() && self.directory_failures.is_empty()
    }

    /// A copy ordered by path, for display.
    pub fn sorted_by_path(&self) -> Self {
        let mut sorted = self.clone();
        sorted.photos.sort_by(|a, b| a.path.cmp(&b.path));
        sorted.failures.sort_by(|a, b| a.path.cmp(&b.path));
        sorted.directory_failures.sort_by(|a, b| a.path.cmp(&b.path));
        sorted
    }

    /// A copy ordered by capture time; undated photos go last, ordered by path.
    pub fn sorted_by_capture_time(&self) -> Self {
        let mut sorted = self.sorted_by_path();
        sorted
            .photos
            .sort_by(|a, b| match (a.captured_at, b.captured_at) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn record(path: &str, captured: Option<(i32, u32, u32)>) -> PhotoRecord {
        let mut r = PhotoRecord::bare(
            PathBuf::from(path),
            10,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        r.captured_at = captured.map(|(y, m, d)| {
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        });
        r
    }

    #[test]
    fn test_sorted_by_capture_time_puts_undated_last() {
        let corpus = PhotoCorpus::new(
            vec![
                record("c.jpg", None),
                record("b.jpg", Some((2023, 6, 1))),
                record("a.jpg", None),
                record("d.jpg", Some((2021, 1, 1))),
            ],
            vec![],
            vec![],
        );

        let sorted = corpus.sorted_by_capture_time();
        let order: Vec<_> = sorted
            .photos
            .iter()
            .map(|p| p.path.to_string_lossy().to_string())
            .collect();
        assert_eq!(order, vec!["d.jpg", "b.jpg", "a.jpg", "c.jpg"]);

        // The source corpus is untouched.
        assert_eq!(corpus.photos[0].path, PathBuf::from("c.jpg"));
    }

    #[test]
    fn test_coordinates_require_both_halves() {
        let mut r = record("x.jpg", None);
        r.latitude = Some(10.0);
        assert!(r.coordinates().is_none());
        r.longitude = Some(-20.0);
        assert_eq!(r.coordinates(), Some((10.0, -20.0)));
    }

    #[test]
    fn test_files_considered_ignores_directory_failures() {
        let corpus = PhotoCorpus::new(
            vec![record("a.jpg", None)],
            vec![FailureRecord::new(
                "b.jpg",
                FailureReason::UnsupportedFormat,
                "zero-byte file",
            )],
            vec![FailureRecord::new(
                "locked",
                FailureReason::DirectoryUnreadable,
                "permission denied",
            )],
        );
        assert_eq!(corpus.files_considered(), 2);
    }
}
