//! Derived, read-only statistics over a [`PhotoCorpus`].
pub mod completeness;
pub mod distribution;
pub mod frequency;
pub mod geo;
pub mod places;
pub mod temporal;

pub use completeness::{FieldCoverage, field_completeness};
pub use distribution::{Distribution, NumericSummary};
pub use frequency::{FrequencyEntry, FrequencyTable};
pub use geo::{BoundingBox, GeoExtent, GridCell, geo_extent, location_clusters};
pub use places::{place_frequency, place_name};
pub use temporal::{Granularity, TemporalBucket, TemporalHistogram, temporal_histogram};

use crate::structs::{PhotoCorpus, PhotoRecord};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DateRange {
    pub first: NaiveDateTime,
    pub last: NaiveDateTime,
}

/// Everything [`generate_insights`] derives from a corpus.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InsightsSummary {
    pub total_photos: usize,
    pub total_failures: usize,
    pub directory_failures: usize,
    pub geotagged_photos: usize,
    /// Share of photos with coordinates, in percent; 0 for an empty corpus.
    pub gps_percentage: f64,
    pub total_size_bytes: u64,
    pub date_range: Option<DateRange>,

    pub camera_makes: FrequencyTable<String>,
    pub camera_models: FrequencyTable<String>,
    pub lenses: FrequencyTable<String>,
    pub isos: FrequencyTable<u32>,
    /// Labelled like `f/1.8`.
    pub apertures: FrequencyTable<String>,
    pub shutter_speeds: FrequencyTable<String>,
    /// Labelled like `50mm`.
    pub focal_lengths: FrequencyTable<String>,
    pub flash_modes: FrequencyTable<String>,

    pub iso_distribution: Distribution,
    pub aperture_distribution: Distribution,
    pub exposure_time_distribution: Distribution,
    pub focal_length_distribution: Distribution,
    pub file_size_distribution: Distribution,

    pub by_hour: TemporalHistogram,
    pub by_weekday: TemporalHistogram,
    pub by_month_of_year: TemporalHistogram,
    pub by_season: TemporalHistogram,
    pub by_year: TemporalHistogram,

    pub geo_extent: GeoExtent,
    pub location_clusters: FrequencyTable<GridCell>,
    pub completeness: Vec<FieldCoverage>,
}

fn one_decimal(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub fn aperture_label(f_number: f64) -> String {
    format!("f/{}", one_decimal(f_number))
}

pub fn focal_length_label(mm: f64) -> String {
    format!("{}mm", one_decimal(mm))
}

fn table<K, F>(photos: &[PhotoRecord], f: F) -> FrequencyTable<K>
where
    K: Eq + std::hash::Hash + Clone,
    F: Fn(&PhotoRecord) -> Option<K>,
{
    FrequencyTable::from_values(photos.iter().map(f))
}

fn distribution<F>(photos: &[PhotoRecord], f: F) -> Distribution
where
    F: Fn(&PhotoRecord) -> Option<f64>,
{
    Distribution::from_values(photos.iter().filter_map(f))
}

/// Computes the full summary of a corpus. Pure; an empty corpus yields empty
/// tables and `NoData` distributions.
pub fn generate_insights(corpus: &PhotoCorpus) -> InsightsSummary {
    let photos = corpus.photos.as_slice();
    let geotagged_photos = photos.iter().filter(|p| p.coordinates().is_some()).count();
    let gps_percentage = if photos.is_empty() {
        0.0
    } else {
        geotagged_photos as f64 / photos.len() as f64 * 100.0
    };
    let date_range = photos
        .iter()
        .filter_map(|p| p.captured_at)
        .fold(None, |range: Option<DateRange>, at| {
            Some(match range {
                None => DateRange { first: at, last: at },
                Some(r) => DateRange {
                    first: r.first.min(at),
                    last: r.last.max(at),
                },
            })
        });

    InsightsSummary {
        total_photos: photos.len(),
        total_failures: corpus.failures.len(),
        directory_failures: corpus.directory_failures.len(),
        geotagged_photos,
        gps_percentage,
        total_size_bytes: photos.iter().map(|p| p.file_size_bytes).sum(),
        date_range,

        camera_makes: table(photos, |p| p.camera_make.clone()),
        camera_models: table(photos, |p| p.camera_model.clone()),
        lenses: table(photos, |p| p.lens_model.clone()),
        isos: table(photos, |p| p.iso),
        apertures: table(photos, |p| p.aperture.map(aperture_label)),
        shutter_speeds: table(photos, |p| p.shutter_speed.clone()),
        focal_lengths: table(photos, |p| p.focal_length.map(focal_length_label)),
        flash_modes: table(photos, |p| p.flash.clone()),

        iso_distribution: distribution(photos, |p| p.iso.map(f64::from)),
        aperture_distribution: distribution(photos, |p| p.aperture),
        exposure_time_distribution: distribution(photos, |p| p.exposure_time),
        focal_length_distribution: distribution(photos, |p| p.focal_length),
        file_size_distribution: distribution(photos, |p| Some(p.file_size_bytes as f64)),

        by_hour: temporal_histogram(corpus, Granularity::HourOfDay),
        by_weekday: temporal_histogram(corpus, Granularity::Weekday),
        by_month_of_year: temporal_histogram(corpus, Granularity::MonthOfYear),
        by_season: temporal_histogram(corpus, Granularity::Season),
        by_year: temporal_histogram(corpus, Granularity::Year),

        geo_extent: geo_extent(corpus),
        location_clusters: location_clusters(corpus),
        completeness: field_completeness(corpus),
    }
}
