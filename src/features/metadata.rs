use crate::structs::PhotoRecord;
use crate::tags::codes::{
    exposure_program_label, flash_label, metering_mode_label, white_balance_label,
};
use crate::tags::structs::{RawTags, RawValue};
use crate::time::parse_capture_time;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const ISO_TAGS: [&str; 4] = [
    "ISOSpeedRatings",
    "PhotographicSensitivity",
    "ISO",
    "RecommendedExposureIndex",
];
const CAPTURE_TIME_TAGS: [&str; 5] = [
    "DateTimeOriginal",
    "DateTimeDigitized",
    "CreateDate",
    "DateTime",
    "ModifyDate",
];
const FOCAL_LENGTH_35MM_TAGS: [&str; 2] = ["FocalLengthIn35mmFilm", "FocalLengthIn35mmFormat"];
const WIDTH_TAGS: [&str; 4] = ["PixelXDimension", "ExifImageWidth", "ImageWidth", "RawImageWidth"];
const HEIGHT_TAGS: [&str; 5] = [
    "PixelYDimension",
    "ExifImageHeight",
    "ImageLength",
    "ImageHeight",
    "RawImageHeight",
];

/// The metadata-derived part of a [`PhotoRecord`].
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct NormalizedTags {
    pub camera_make: Option<String>,
    pub camera_model: Option<String>,
    pub lens_model: Option<String>,
    pub iso: Option<u32>,
    pub aperture: Option<f64>,
    pub shutter_speed: Option<String>,
    pub exposure_time: Option<f64>,
    pub focal_length: Option<f64>,
    pub focal_length_35mm: Option<f64>,
    pub captured_at: Option<NaiveDateTime>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub flash: Option<String>,
    pub metering_mode: Option<String>,
    pub white_balance: Option<String>,
    pub exposure_program: Option<String>,
}

impl NormalizedTags {
    /// Copies every field onto `record`. Dimensions only overwrite when present.
    pub fn apply_to(self, record: &mut PhotoRecord) {
        record.camera_make = self.camera_make;
        record.camera_model = self.camera_model;
        record.lens_model = self.lens_model;
        record.iso = self.iso;
        record.aperture = self.aperture;
        record.shutter_speed = self.shutter_speed;
        record.exposure_time = self.exposure_time;
        record.focal_length = self.focal_length;
        record.focal_length_35mm = self.focal_length_35mm;
        record.captured_at = self.captured_at;
        record.width = self.width.or(record.width);
        record.height = self.height.or(record.height);
        record.flash = self.flash;
        record.metering_mode = self.metering_mode;
        record.white_balance = self.white_balance;
        record.exposure_program = self.exposure_program;
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn get_string(tags: &RawTags, key: &str) -> Option<String> {
    tags.get(key).and_then(RawValue::as_text)
}

fn get_positive_f64(tags: &RawTags, key: &str) -> Option<f64> {
    tags.get(key)
        .and_then(RawValue::as_f64)
        .filter(|v| *v > 0.0)
}

fn get_code(tags: &RawTags, key: &str) -> Option<i64> {
    tags.get(key)
        .map(RawValue::first)
        .and_then(RawValue::as_f64)
        .filter(|v| v.fract() == 0.0)
        .map(|v| v as i64)
}

fn to_positive_u32(value: f64) -> Option<u32> {
    let rounded = value.round();
    (rounded >= 1.0 && rounded <= f64::from(u32::MAX)).then_some(rounded as u32)
}

/// First tag of `keys` that yields a value.
fn first_of<T>(tags: &RawTags, keys: &[&str], f: impl Fn(&RawValue) -> Option<T>) -> Option<T> {
    keys.iter().find_map(|key| tags.get(key).and_then(&f))
}

fn get_iso(tags: &RawTags) -> Option<u32> {
    first_of(tags, &ISO_TAGS, |v| v.first().as_f64().and_then(to_positive_u32))
}

/// F-number from `FNumber`, exiftool's composite `Aperture`, or the APEX
/// `ApertureValue` (f = 2^(Av/2)).
fn get_aperture(tags: &RawTags) -> Option<f64> {
    get_positive_f64(tags, "FNumber")
        .or_else(|| get_positive_f64(tags, "Aperture"))
        .or_else(|| {
            tags.get("ApertureValue")
                .and_then(RawValue::as_f64)
                .map(|av| (2f64.powf(av / 2.0) * 10.0).round() / 10.0)
                .filter(|f| *f > 0.0)
        })
}

/// Exposure time in seconds from `ExposureTime`, exiftool's composite
/// `ShutterSpeed`, or the APEX `ShutterSpeedValue` (t = 2^-Tv).
fn get_exposure_time(tags: &RawTags) -> Option<f64> {
    get_positive_f64(tags, "ExposureTime")
        .or_else(|| get_positive_f64(tags, "ShutterSpeed"))
        .or_else(|| {
            tags.get("ShutterSpeedValue")
                .and_then(RawValue::as_f64)
                .map(|tv| 2f64.powf(-tv))
                .filter(|t| t.is_finite() && *t > 0.0)
        })
}

/// Display form of an exposure time: `1/250` below a second, `2s` or `2.5s` above.
pub fn format_shutter_speed(seconds: f64) -> String {
    if seconds < 1.0 {
        format!("1/{}", (1.0 / seconds).round() as u64)
    } else {
        format!("{seconds}s")
    }
}

fn get_captured_at(tags: &RawTags) -> Option<NaiveDateTime> {
    first_of(tags, &CAPTURE_TIME_TAGS, |v| {
        v.as_text().as_deref().and_then(parse_capture_time)
    })
}

/// Normalizes one file's raw tags into typed fields.
///
/// Each field is derived independently: a tag that is missing or can't be
/// interpreted leaves only that field empty.
pub fn normalize_tags(tags: &RawTags) -> NormalizedTags {
    let exposure_time = get_exposure_time(tags);
    NormalizedTags {
        camera_make: get_string(tags, "Make"),
        camera_model: get_string(tags, "Model"),
        lens_model: get_string(tags, "LensModel").or_else(|| get_string(tags, "Lens")),
        iso: get_iso(tags),
        aperture: get_aperture(tags),
        shutter_speed: exposure_time.map(format_shutter_speed),
        exposure_time,
        focal_length: get_positive_f64(tags, "FocalLength"),
        focal_length_35mm: first_of(tags, &FOCAL_LENGTH_35MM_TAGS, |v| {
            v.as_f64().filter(|f| *f > 0.0)
        }),
        captured_at: get_captured_at(tags),
        width: first_of(tags, &WIDTH_TAGS, |v| v.first().as_f64().and_then(to_positive_u32)),
        height: first_of(tags, &HEIGHT_TAGS, |v| v.first().as_f64().and_then(to_positive_u32)),
        flash: get_code(tags, "Flash").map(flash_label),
        metering_mode: get_code(tags, "MeteringMode").map(metering_mode_label),
        white_balance: get_code(tags, "WhiteBalance").map(white_balance_label),
        exposure_program: get_code(tags, "ExposureProgram").map(exposure_program_label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::RawValue::{Bytes, Float, Integer, List, Rational, Text};
    use crate::test_support::at;
    use serde_json::json;

    #[test]
    fn test_normalize_full_camera_block() {
        let tags = RawTags::from([
            ("Make", Bytes(b"Canon\0".to_vec())),
            ("Model", Bytes(b"Canon EOS R5".to_vec())),
            ("LensModel", Text("RF50mm F1.2 L USM".into())),
            ("PhotographicSensitivity", Integer(400)),
            ("FNumber", Rational(18, 10)),
            ("ExposureTime", Rational(1, 250)),
            ("FocalLength", Rational(50, 1)),
            ("FocalLengthIn35mmFilm", Integer(50)),
            ("DateTimeOriginal", Bytes(b"2024:05:17 14:00:00".to_vec())),
            ("PixelXDimension", Integer(8192)),
            ("PixelYDimension", Integer(5464)),
            ("Flash", Integer(16)),
            ("MeteringMode", Integer(5)),
        ]);

        let n = normalize_tags(&tags);

        assert_eq!(n.camera_make.as_deref(), Some("Canon"));
        assert_eq!(n.camera_model.as_deref(), Some("Canon EOS R5"));
        assert_eq!(n.lens_model.as_deref(), Some("RF50mm F1.2 L USM"));
        assert_eq!(n.iso, Some(400));
        assert_eq!(n.aperture, Some(1.8));
        assert_eq!(n.exposure_time, Some(0.004));
        assert_eq!(n.shutter_speed.as_deref(), Some("1/250"));
        assert_eq!(n.focal_length, Some(50.0));
        assert_eq!(n.focal_length_35mm, Some(50.0));
        assert_eq!(n.captured_at, Some(at(2024, 5, 17, 14)));
        assert_eq!((n.width, n.height), (Some(8192), Some(5464)));
        assert_eq!(n.flash.as_deref(), Some("Flash did not fire, compulsory flash mode"));
        assert_eq!(n.metering_mode.as_deref(), Some("Pattern"));
        assert!(n.white_balance.is_none());
    }

    #[test]
    fn test_empty_tags_normalize_to_nothing() {
        assert!(normalize_tags(&RawTags::new()).is_empty());
    }

    #[test]
    fn test_zero_denominator_leaves_only_that_field_absent() {
        let tags = RawTags::from([
            ("FNumber", Rational(28, 0)),
            ("ExposureTime", Rational(1, 60)),
            ("Model", Text("X100V".into())),
        ]);
        let n = normalize_tags(&tags);
        assert_eq!(n.aperture, None);
        assert_eq!(n.shutter_speed.as_deref(), Some("1/60"));
        assert_eq!(n.camera_model.as_deref(), Some("X100V"));
    }

    #[test]
    fn test_multi_valued_iso_uses_first_value() {
        let tags = RawTags::from([("ISOSpeedRatings", List(vec![Integer(800), Integer(1600)]))]);
        assert_eq!(normalize_tags(&tags).iso, Some(800));
    }

    #[test]
    fn test_iso_falls_through_unusable_tags() {
        let tags = RawTags::from([
            ("ISOSpeedRatings", Integer(0)),
            ("ISO", Text("3200".into())),
        ]);
        assert_eq!(normalize_tags(&tags).iso, Some(3200));
    }

    #[test]
    fn test_malformed_values_are_absent() {
        let tags = RawTags::from([
            ("ISO", Text("auto".into())),
            ("FocalLength", Float(-35.0)),
            ("DateTimeOriginal", Text("not a date".into())),
            ("Make", Bytes(vec![0, 0])),
            ("Flash", Float(1.5)),
        ]);
        let n = normalize_tags(&tags);
        assert!(n.is_empty(), "nothing usable, got {n:?}");
    }

    #[test]
    fn test_capture_time_falls_back_to_digitized() {
        let tags = RawTags::from([
            ("DateTimeOriginal", Text("0000:00:00 00:00:00".into())),
            ("DateTimeDigitized", Text("2023:12:24 18:00:00".into())),
            ("DateTime", Text("2024:01:02 09:00:00".into())),
        ]);
        assert_eq!(normalize_tags(&tags).captured_at, Some(at(2023, 12, 24, 18)));
    }

    #[test]
    fn test_apex_fallbacks() {
        let tags = RawTags::from([
            ("ApertureValue", Rational(4, 1)),
            ("ShutterSpeedValue", Rational(7, 1)),
        ]);
        let n = normalize_tags(&tags);
        assert_eq!(n.aperture, Some(4.0));
        assert_eq!(n.exposure_time, Some(1.0 / 128.0));
        assert_eq!(n.shutter_speed.as_deref(), Some("1/128"));
    }

    #[test]
    fn test_shutter_speed_formatting() {
        assert_eq!(format_shutter_speed(0.004), "1/250");
        assert_eq!(format_shutter_speed(1.0 / 3.0), "1/3");
        assert_eq!(format_shutter_speed(1.0), "1s");
        assert_eq!(format_shutter_speed(2.5), "2.5s");
        assert_eq!(format_shutter_speed(30.0), "30s");
    }

    #[test]
    fn test_normalize_exiftool_numeric_output() {
        let exif = json!({
            "Make": "SONY",
            "Model": "ILCE-7M4",
            "ISO": 100,
            "FNumber": 8.0,
            "ExposureTime": 0.0125,
            "FocalLength": 24.0,
            "FocalLengthIn35mmFormat": 24,
            "DateTimeOriginal": "2022:08:01 06:15:00",
            "ExifImageWidth": 7008,
            "ExifImageHeight": 4672,
            "WhiteBalance": 0,
            "ExposureProgram": 1,
        });
        let n = normalize_tags(&RawTags::from_json(&exif));

        assert_eq!(n.camera_make.as_deref(), Some("SONY"));
        assert_eq!(n.iso, Some(100));
        assert_eq!(n.aperture, Some(8.0));
        assert_eq!(n.shutter_speed.as_deref(), Some("1/80"));
        assert_eq!(n.focal_length_35mm, Some(24.0));
        assert_eq!(n.captured_at, Some(at(2022, 8, 1, 6) + chrono::Duration::minutes(15)));
        assert_eq!(n.width, Some(7008));
        assert_eq!(n.white_balance.as_deref(), Some("Auto"));
        assert_eq!(n.exposure_program.as_deref(), Some("Manual"));
    }

    #[test]
    fn test_apply_keeps_probed_dimensions_when_tags_have_none() {
        let mut record = crate::test_support::record("a.jpg");
        record.width = Some(640);
        record.height = Some(480);
        let tags = RawTags::from([("Model", Text("Pixel 8".into()))]);
        normalize_tags(&tags).apply_to(&mut record);
        assert_eq!(record.camera_model.as_deref(), Some("Pixel 8"));
        assert_eq!((record.width, record.height), (Some(640), Some(480)));
    }
}
