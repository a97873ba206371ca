use crate::insights::frequency::FrequencyTable;
use crate::structs::PhotoCorpus;
use reverse_geocoder::ReverseGeocoder;

/// Nearest populated place for a coordinate pair, as `"Amsterdam, Netherlands"`.
///
/// Falls back to the two-letter country code when it isn't a known ISO 3166 code.
pub fn place_name(geocoder: &ReverseGeocoder, latitude: f64, longitude: f64) -> String {
    let search_result = geocoder.search((latitude, longitude));
    let record = search_result.record;
    let country = rust_iso3166::from_alpha2(&record.cc)
        .map_or_else(|| record.cc.clone(), |c| c.name.to_string());
    format!("{}, {}", record.name, country)
}

/// How many photos were taken near each place.
///
/// Photos without coordinates are not counted. Building a [`ReverseGeocoder`]
/// loads its city table, so callers should create it once and reuse it.
pub fn place_frequency(corpus: &PhotoCorpus, geocoder: &ReverseGeocoder) -> FrequencyTable<String> {
    FrequencyTable::from_values(
        corpus
            .photos
            .iter()
            .map(|p| p.coordinates().map(|(lat, lon)| place_name(geocoder, lat, lon))),
    )
}
