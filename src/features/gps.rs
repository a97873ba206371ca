use crate::tags::structs::{RawTags, RawValue};
use serde::{Deserialize, Serialize};

/// A coordinate pair in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    const fn limit(self) -> f64 {
        match self {
            Self::Latitude => 90.0,
            Self::Longitude => 180.0,
        }
    }

    /// Sign for a hemisphere letter, `None` for letters that don't belong to this axis.
    fn sign(self, reference: char) -> Option<f64> {
        match (self, reference.to_ascii_uppercase()) {
            (Self::Latitude, 'N') | (Self::Longitude, 'E') => Some(1.0),
            (Self::Latitude, 'S') | (Self::Longitude, 'W') => Some(-1.0),
            _ => None,
        }
    }
}

pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Unsigned magnitude of a coordinate tag: either a degree/minute/second triple or
/// an already converted decimal value. A lone rational or integer is a truncated
/// triple, not a decimal.
fn magnitude(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::List(parts) => {
            if parts.len() < 3 {
                return None;
            }
            let d = parts[0].as_f64()?;
            let m = parts[1].as_f64()?;
            let s = parts[2].as_f64()?;
            if d < 0.0 || m < 0.0 || s < 0.0 {
                return None;
            }
            Some(dms_to_decimal(d, m, s))
        }
        RawValue::Float(_) | RawValue::Text(_) => value.as_f64().map(f64::abs),
        _ => None,
    }
}

fn hemisphere_sign(value: &RawValue, axis: Axis) -> Option<f64> {
    let text = value.as_text()?;
    let mut chars = text.chars();
    let reference = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    axis.sign(reference)
}

fn resolve_axis(tags: &RawTags, value_key: &str, ref_key: &str, axis: Axis) -> Option<f64> {
    let magnitude = magnitude(tags.get(value_key)?)?;
    let sign = hemisphere_sign(tags.get(ref_key)?, axis)?;
    (magnitude <= axis.limit()).then_some(sign * magnitude)
}

/// Resolves the GPS tag group into signed decimal degrees.
///
/// Latitude needs `GPSLatitude` and `GPSLatitudeRef`, longitude needs
/// `GPSLongitude` and `GPSLongitudeRef`. If any of the four is missing or
/// malformed, or a value falls outside its valid range, no coordinates are
/// returned at all.
pub fn resolve_coordinates(tags: &RawTags) -> Option<Coordinates> {
    let latitude = resolve_axis(tags, "GPSLatitude", "GPSLatitudeRef", Axis::Latitude)?;
    let longitude = resolve_axis(tags, "GPSLongitude", "GPSLongitudeRef", Axis::Longitude)?;
    Some(Coordinates {
        latitude,
        longitude,
    })
}

/// Altitude in metres, negative when `GPSAltitudeRef` says below sea level.
pub fn resolve_altitude(tags: &RawTags) -> Option<f64> {
    let altitude = tags.get("GPSAltitude")?.first().as_f64()?;
    let below_sea_level = tags
        .get("GPSAltitudeRef")
        .and_then(|r| r.first().as_f64())
        .is_some_and(|r| r == 1.0);
    Some(if below_sea_level {
        -altitude.abs()
    } else {
        altitude
    })
}
