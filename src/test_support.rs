//! Fixtures shared by the unit tests: in-memory JPEGs with hand-built Exif blocks
//! and record builders.
use crate::structs::PhotoRecord;
use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::PathBuf;

pub const FIXTURE_WIDTH: u32 = 16;
pub const FIXTURE_HEIGHT: u32 = 12;

/// A small JPEG without any metadata segment.
pub fn plain_jpeg() -> Vec<u8> {
    let img = RgbImage::from_pixel(FIXTURE_WIDTH, FIXTURE_HEIGHT, Rgb([200, 120, 40]));
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut bytes, ImageFormat::Jpeg)
        .unwrap();
    bytes.into_inner()
}

/// A JPEG carrying the given fields in an APP1 Exif segment right after SOI.
pub fn jpeg_with_exif(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).unwrap();
    let tiff = tiff.into_inner();

    let jpeg = plain_jpeg();
    let segment_len = u16::try_from(2 + 6 + tiff.len()).unwrap();
    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

fn ascii(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

fn short(tag: Tag, v: u16) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Short(vec![v]),
    }
}

fn rationals(tag: Tag, values: &[(u32, u32)]) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(
            values
                .iter()
                .map(|&(num, denom)| Rational { num, denom })
                .collect(),
        ),
    }
}

/// Camera settings, capture time and a full GPS group (37°46'0"N 122°25'0"W).
pub fn full_exif_fields() -> Vec<Field> {
    vec![
        ascii(Tag::Make, "Canon"),
        ascii(Tag::Model, "Canon EOS R5"),
        ascii(Tag::LensModel, "RF24-70mm F2.8 L IS USM"),
        short(Tag::PhotographicSensitivity, 400),
        rationals(Tag::FNumber, &[(18, 10)]),
        rationals(Tag::ExposureTime, &[(1, 250)]),
        rationals(Tag::FocalLength, &[(50, 1)]),
        short(Tag::FocalLengthIn35mmFilm, 50),
        ascii(Tag::DateTimeOriginal, "2024:05:17 14:30:00"),
        short(Tag::Flash, 25),
        short(Tag::MeteringMode, 5),
        short(Tag::WhiteBalance, 0),
        short(Tag::ExposureProgram, 3),
        Field {
            tag: Tag::PixelXDimension,
            ifd_num: In::PRIMARY,
            value: Value::Long(vec![FIXTURE_WIDTH]),
        },
        Field {
            tag: Tag::PixelYDimension,
            ifd_num: In::PRIMARY,
            value: Value::Long(vec![FIXTURE_HEIGHT]),
        },
        ascii(Tag::GPSLatitudeRef, "N"),
        rationals(Tag::GPSLatitude, &[(37, 1), (46, 1), (0, 1)]),
        ascii(Tag::GPSLongitudeRef, "W"),
        rationals(Tag::GPSLongitude, &[(122, 1), (25, 1), (0, 1)]),
        Field {
            tag: Tag::GPSAltitudeRef,
            ifd_num: In::PRIMARY,
            value: Value::Byte(vec![0]),
        },
        rationals(Tag::GPSAltitude, &[(15, 1)]),
    ]
}

/// A GPS group whose coordinates carry degrees but no minutes or seconds.
pub fn degrees_only_gps_fields() -> Vec<Field> {
    vec![
        ascii(Tag::GPSLatitudeRef, "N"),
        rationals(Tag::GPSLatitude, &[(37, 1)]),
        ascii(Tag::GPSLongitudeRef, "W"),
        rationals(Tag::GPSLongitude, &[(122, 1)]),
    ]
}

pub fn at(y: i32, mo: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

/// A record with only file attributes set; tests fill in what they need.
pub fn record(path: &str) -> PhotoRecord {
    PhotoRecord::bare(
        PathBuf::from(path),
        1_000,
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    )
}
