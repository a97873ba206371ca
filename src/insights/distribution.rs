use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Summary statistics of one numeric field over the records where it is present.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Distribution {
    NoData,
    Summary(NumericSummary),
}

impl Distribution {
    /// Non-finite values are ignored.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return Self::NoData;
        }
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };
        Self::Summary(NumericSummary {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            median,
        })
    }

    pub fn summary(&self) -> Option<&NumericSummary> {
        match self {
            Self::NoData => None,
            Self::Summary(summary) => Some(summary),
        }
    }
}
