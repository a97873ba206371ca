use crate::structs::{PhotoCorpus, PhotoRecord};
use chrono::{Datelike, Month, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// How capture times are grouped into buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Calendar day, `2024-05-17`.
    Day,
    /// Calendar month, `2024-05`.
    Month,
    Year,
    /// Month name regardless of year.
    MonthOfYear,
    /// Meteorological season, flipped for photos taken south of the equator.
    Season,
    /// `00:00` to `23:00`.
    HourOfDay,
    Weekday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    fn of_month(month: u32, southern: bool) -> Self {
        let northern = match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        };
        if !southern {
            return northern;
        }
        match northern {
            Self::Spring => Self::Autumn,
            Self::Summer => Self::Winter,
            Self::Autumn => Self::Spring,
            Self::Winter => Self::Summer,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
            Self::Winter => "Winter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TemporalBucket {
    pub label: String,
    pub count: usize,
}

/// Photo counts per time bucket. Only buckets with at least one photo are listed,
/// in calendar order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TemporalHistogram {
    pub granularity: Granularity,
    pub buckets: Vec<TemporalBucket>,
    /// Photos without a capture time.
    pub undated: usize,
}

impl TemporalHistogram {
    /// The bucket with the most photos; the earliest one wins a tie.
    pub fn peak(&self) -> Option<&TemporalBucket> {
        self.buckets
            .iter()
            .reduce(|best, b| if b.count > best.count { b } else { best })
    }

    pub fn count_of(&self, label: &str) -> usize {
        self.buckets
            .iter()
            .find(|b| b.label == label)
            .map_or(0, |b| b.count)
    }
}

/// Sort key and label of the bucket a photo falls into.
fn bucket(granularity: Granularity, photo: &PhotoRecord, at: NaiveDateTime) -> (i64, String) {
    let date = at.date();
    match granularity {
        Granularity::Day => (
            i64::from(date.num_days_from_ce()),
            date.format("%Y-%m-%d").to_string(),
        ),
        Granularity::Month => (
            i64::from(date.year()) * 12 + i64::from(date.month0()),
            date.format("%Y-%m").to_string(),
        ),
        Granularity::Year => (i64::from(date.year()), date.year().to_string()),
        Granularity::MonthOfYear => {
            let label = u8::try_from(date.month())
                .ok()
                .and_then(|m| Month::try_from(m).ok())
                .map_or_else(|| date.month().to_string(), |m| m.name().to_string());
            (i64::from(date.month0()), label)
        }
        Granularity::Season => {
            let southern = photo.latitude.is_some_and(|lat| lat < 0.0);
            let season = Season::of_month(date.month(), southern);
            (season as i64, season.label().to_string())
        }
        Granularity::HourOfDay => (i64::from(at.hour()), format!("{:02}:00", at.hour())),
        Granularity::Weekday => {
            let day = date.weekday().num_days_from_monday();
            (i64::from(day), WEEKDAYS[day as usize].to_string())
        }
    }
}

/// Groups the corpus' photos by capture time at the given granularity.
pub fn temporal_histogram(corpus: &PhotoCorpus, granularity: Granularity) -> TemporalHistogram {
    let mut buckets: BTreeMap<i64, TemporalBucket> = BTreeMap::new();
    let mut undated = 0;
    for photo in &corpus.photos {
        let Some(at) = photo.captured_at else {
            undated += 1;
            continue;
        };
        let (key, label) = bucket(granularity, photo, at);
        buckets
            .entry(key)
            .or_insert(TemporalBucket { label, count: 0 })
            .count += 1;
    }
    TemporalHistogram {
        granularity,
        buckets: buckets.into_values().collect(),
        undated,
    }
}
