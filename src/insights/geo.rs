use crate::features::gps::Coordinates;
use crate::insights::frequency::FrequencyTable;
use crate::structs::PhotoCorpus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of a clustering cell in degrees.
pub const GRID_CELL_DEGREES: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BoundingBox {
    /// Number of photos with a coordinate pair.
    pub geotagged: usize,
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
    /// Mean position of the geotagged photos.
    pub center: Coordinates,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GeoExtent {
    NoGeotaggedPhotos,
    BoundingBox(BoundingBox),
}

/// Bounding box and centre of every photo that carries both coordinates.
pub fn geo_extent(corpus: &PhotoCorpus) -> GeoExtent {
    let mut points = corpus.photos.iter().filter_map(|p| p.coordinates());
    let Some((lat, lon)) = points.next() else {
        return GeoExtent::NoGeotaggedPhotos;
    };
    let mut bbox = BoundingBox {
        geotagged: 1,
        min_latitude: lat,
        max_latitude: lat,
        min_longitude: lon,
        max_longitude: lon,
        center: Coordinates {
            latitude: lat,
            longitude: lon,
        },
    };
    for (lat, lon) in points {
        bbox.geotagged += 1;
        bbox.min_latitude = bbox.min_latitude.min(lat);
        bbox.max_latitude = bbox.max_latitude.max(lat);
        bbox.min_longitude = bbox.min_longitude.min(lon);
        bbox.max_longitude = bbox.max_longitude.max(lon);
        bbox.center.latitude += lat;
        bbox.center.longitude += lon;
    }
    let n = bbox.geotagged as f64;
    bbox.center.latitude /= n;
    bbox.center.longitude /= n;
    GeoExtent::BoundingBox(bbox)
}

/// A square of [`GRID_CELL_DEGREES`], identified by its rounded centre.
///
/// Serialized as the centre coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(into = "Coordinates", from = "Coordinates")]
pub struct GridCell {
    lat_steps: i32,
    lon_steps: i32,
}

impl GridCell {
    pub fn containing(latitude: f64, longitude: f64) -> Self {
        let steps = |v: f64| (v / GRID_CELL_DEGREES).round() as i32;
        Self {
            lat_steps: steps(latitude),
            lon_steps: steps(longitude),
        }
    }

    pub fn latitude(&self) -> f64 {
        f64::from(self.lat_steps) * GRID_CELL_DEGREES
    }

    pub fn longitude(&self) -> f64 {
        f64::from(self.lon_steps) * GRID_CELL_DEGREES
    }
}

impl From<GridCell> for Coordinates {
    fn from(cell: GridCell) -> Self {
        Self {
            latitude: cell.latitude(),
            longitude: cell.longitude(),
        }
    }
}

impl From<Coordinates> for GridCell {
    fn from(c: Coordinates) -> Self {
        Self::containing(c.latitude, c.longitude)
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}, {:.1}", self.latitude(), self.longitude())
    }
}

/// Photo counts per grid cell, busiest first.
pub fn location_clusters(corpus: &PhotoCorpus) -> FrequencyTable<GridCell> {
    FrequencyTable::from_values(
        corpus
            .photos
            .iter()
            .map(|p| p.coordinates().map(|(lat, lon)| GridCell::containing(lat, lon))),
    )
}
