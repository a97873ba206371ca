use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FrequencyEntry<K> {
    pub value: K,
    pub count: usize,
    /// Share of the records where the field is present, in percent.
    pub percentage: f64,
}

/// Counts of each distinct value of one field.
///
/// Entries are ordered by descending count; equal counts keep the order in which
/// the values first appeared. Records without the field are left out of the
/// entries and of the percentage denominator, and only show up in `total`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FrequencyTable<K> {
    pub entries: Vec<FrequencyEntry<K>>,
    /// Number of records where the field is present.
    pub coverage: usize,
    /// Number of records in the corpus.
    pub total: usize,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            coverage: 0,
            total: 0,
        }
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<K>>,
    {
        let mut counts: Vec<(K, usize)> = Vec::new();
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut total = 0;
        for value in values {
            total += 1;
            let Some(value) = value else { continue };
            match index.get(&value) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(value.clone(), counts.len());
                    counts.push((value, 1));
                }
            }
        }
        // Stable, so ties stay in first-seen order.
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let coverage: usize = counts.iter().map(|(_, count)| count).sum();
        let entries = counts
            .into_iter()
            .map(|(value, count)| FrequencyEntry {
                value,
                count,
                percentage: count as f64 / coverage as f64 * 100.0,
            })
            .collect();
        Self {
            entries,
            coverage,
            total,
        }
    }
}

impl<K> FrequencyTable<K> {
    pub fn most_common(&self) -> Option<&FrequencyEntry<K>> {
        self.entries.first()
    }

    /// The `n` most common entries.
    pub fn top(&self, n: usize) -> &[FrequencyEntry<K>] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Fraction of the corpus where the field is present, `None` for an empty corpus.
    pub fn coverage_ratio(&self) -> Option<f64> {
        (self.total > 0).then(|| self.coverage as f64 / self.total as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_percentages_use_coverage() {
        let table = FrequencyTable::from_values([Some(100u32), Some(100), Some(400), None]);

        assert_eq!(table.coverage, 3);
        assert_eq!(table.total, 4);
        assert_eq!(table.entries.len(), 2);
        assert_eq!(table.entries[0].value, 100);
        assert_eq!(table.entries[0].count, 2);
        assert!((table.entries[0].percentage - 66.666_666).abs() < 1e-4);
        assert_eq!(table.entries[1].value, 400);
        assert!((table.entries[1].percentage - 33.333_333).abs() < 1e-4);
        assert_eq!(table.coverage_ratio(), Some(0.75));
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let table = FrequencyTable::from_values([
            Some("X-T5"),
            Some("EOS R5"),
            Some("EOS R5"),
            Some("X-T5"),
            Some("Z8"),
        ]);
        let order: Vec<_> = table.entries.iter().map(|e| e.value).collect();
        assert_eq!(order, vec!["X-T5", "EOS R5", "Z8"]);
        assert_eq!(table.most_common().map(|e| e.value), Some("X-T5"));
    }

    #[test]
    fn test_all_absent_has_no_entries() {
        let table = FrequencyTable::<String>::from_values([None, None]);
        assert!(table.is_empty());
        assert_eq!(table.coverage, 0);
        assert_eq!(table.total, 2);
        assert_eq!(table.coverage_ratio(), Some(0.0));
        assert_eq!(table.most_common(), None);
    }

    #[test]
    fn test_empty_input() {
        let table = FrequencyTable::<u32>::from_values([]);
        assert_eq!(table, FrequencyTable::default());
        assert_eq!(table.coverage_ratio(), None);
        assert!(table.top(3).is_empty());
    }
}
