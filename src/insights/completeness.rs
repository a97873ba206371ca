use crate::structs::{PhotoCorpus, PhotoRecord};
use serde::{Deserialize, Serialize};

/// How often one optional field is present across the corpus.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FieldCoverage {
    pub field: String,
    pub present: usize,
    pub total: usize,
    /// `present / total`, `None` for an empty corpus.
    pub ratio: Option<f64>,
}

type Presence = fn(&PhotoRecord) -> bool;

const FIELDS: [(&str, Presence); 18] = [
    ("camera_make", |p| p.camera_make.is_some()),
    ("camera_model", |p| p.camera_model.is_some()),
    ("lens_model", |p| p.lens_model.is_some()),
    ("iso", |p| p.iso.is_some()),
    ("aperture", |p| p.aperture.is_some()),
    ("shutter_speed", |p| p.shutter_speed.is_some()),
    ("exposure_time", |p| p.exposure_time.is_some()),
    ("focal_length", |p| p.focal_length.is_some()),
    ("focal_length_35mm", |p| p.focal_length_35mm.is_some()),
    ("captured_at", |p| p.captured_at.is_some()),
    ("coordinates", |p| p.coordinates().is_some()),
    ("altitude", |p| p.altitude.is_some()),
    ("width", |p| p.width.is_some()),
    ("height", |p| p.height.is_some()),
    ("flash", |p| p.flash.is_some()),
    ("metering_mode", |p| p.metering_mode.is_some()),
    ("white_balance", |p| p.white_balance.is_some()),
    ("exposure_program", |p| p.exposure_program.is_some()),
];

/// Filled from the decoded image header for every photo, tags or not.
const HEADER_FIELDS: [&str; 2] = ["width", "height"];

fn has_any_metadata(p: &PhotoRecord) -> bool {
    FIELDS
        .iter()
        .filter(|(field, _)| !HEADER_FIELDS.contains(field))
        .any(|(_, present)| present(p))
}

/// Presence ratio of every optional [`PhotoRecord`] field, in record field order.
///
/// `any_metadata` counts photos with at least one embedded value besides the
/// pixel dimensions.
pub fn field_completeness(corpus: &PhotoCorpus) -> Vec<FieldCoverage> {
    let total = corpus.photos.len();
    FIELDS
        .iter()
        .copied()
        .chain([("any_metadata", has_any_metadata as Presence)])
        .map(|(field, present)| {
            let present = corpus.photos.iter().filter(|p| present(p)).count();
            FieldCoverage {
                field: field.to_string(),
                present,
                total,
                ratio: (total > 0).then(|| present as f64 / total as f64),
            }
        })
        .collect()
}
