use crate::core::errors::DatasetError;
use std::collections::{HashMap, HashSet};

/// Rows of categorical feature values paired with one class label per row.
///
/// A sample set is built once and never mutated. Partitions produced by
/// [`SampleSet::partition_by`] are fresh sets owned by whoever receives them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSet {
    features: Vec<Vec<String>>,
    labels: Vec<String>,
}

impl SampleSet {
    /// Validates `features`/`labels` and wraps them.
    pub fn new(features: Vec<Vec<String>>, labels: Vec<String>) -> Result<Self, DatasetError> {
        validate(&features, &labels)?;
        Ok(Self { features, labels })
    }

    /// Wraps rows that are already known to be rectangular and label-aligned.
    pub(crate) fn from_validated(features: Vec<Vec<String>>, labels: Vec<String>) -> Self {
        debug_assert_eq!(features.len(), labels.len());
        Self { features, labels }
    }

    pub fn features(&self) -> &[Vec<String>] {
        &self.features
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn number_of_features(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    pub fn column(&self, feature_index: usize) -> impl Iterator<Item = &str> + '_ {
        self.features.iter().map(move |row| row[feature_index].as_str())
    }

    /// Distinct values of a column in the order they first appear.
    pub fn distinct_values(&self, feature_index: usize) -> Vec<&str> {
        distinct_in_order(self.column(feature_index))
    }

    /// Splits the set by the value found in `feature_index`.
    ///
    /// Groups come back in first-seen value order.
    pub fn partition_by(&self, feature_index: usize) -> Vec<(String, SampleSet)> {
        let mut slot_of: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(String, Vec<Vec<String>>, Vec<String>)> = Vec::new();

        for (row, label) in self.features.iter().zip(self.labels.iter()) {
            let value = row[feature_index].as_str();
            let slot = *slot_of.entry(value).or_insert_with(|| {
                groups.push((value.to_string(), Vec::new(), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(row.clone());
            groups[slot].2.push(label.clone());
        }

        groups
            .into_iter()
            .map(|(value, features, labels)| (value, SampleSet::from_validated(features, labels)))
            .collect()
    }
}

pub(crate) fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for v in values {
        if seen.insert(v) {
            out.push(v);
        }
    }
    out
}

fn is_missing(cell: &str) -> bool {
    cell.trim().is_empty()
}

/// Checks that a feature matrix and label vector can be trained on.
///
/// Blank (empty or whitespace-only) cells and labels count as missing.
pub fn validate(features: &[Vec<String>], labels: &[String]) -> Result<(), DatasetError> {
    if features.is_empty() || labels.is_empty() {
        return Err(DatasetError::Empty);
    }
    if features.len() != labels.len() {
        return Err(DatasetError::LengthMismatch {
            rows: features.len(),
            labels: labels.len(),
        });
    }

    let expected = features[0].len();
    for (row_idx, (row, label)) in features.iter().zip(labels.iter()).enumerate() {
        if row.len() != expected {
            return Err(DatasetError::RaggedRow {
                row: row_idx,
                expected,
                found: row.len(),
            });
        }
        if let Some(col) = row.iter().position(|cell| is_missing(cell)) {
            return Err(DatasetError::MissingValue {
                row: row_idx,
                column: Some(col),
            });
        }
        if is_missing(label) {
            return Err(DatasetError::MissingValue {
                row: row_idx,
                column: None,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{strings, table};

    #[test]
    fn test_new_rejects_empty_input() {
        let err = SampleSet::new(vec![], vec![]).unwrap_err();
        assert_eq!(err, DatasetError::Empty);

        let err = SampleSet::new(table(&[&["a"]]), vec![]).unwrap_err();
        assert_eq!(err, DatasetError::Empty);
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = SampleSet::new(table(&[&["a"], &["b"]]), strings(&["x"])).unwrap_err();
        assert_eq!(err, DatasetError::LengthMismatch { rows: 2, labels: 1 });
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let err = SampleSet::new(table(&[&["a", "b"], &["c"]]), strings(&["x", "y"])).unwrap_err();
        assert_eq!(
            err,
            DatasetError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_new_reports_missing_cell_and_label_positions() {
        let err = SampleSet::new(table(&[&["a", "b"], &["c", " "]]), strings(&["x", "y"]))
            .unwrap_err();
        assert_eq!(
            err,
            DatasetError::MissingValue {
                row: 1,
                column: Some(1)
            }
        );

        let err = SampleSet::new(table(&[&["a"], &["c"]]), strings(&["x", ""])).unwrap_err();
        assert_eq!(
            err,
            DatasetError::MissingValue {
                row: 1,
                column: None
            }
        );
    }

    #[test]
    fn test_distinct_values_keep_first_seen_order() {
        let set = SampleSet::new(
            table(&[&["sunny"], &["rainy"], &["sunny"], &["overcast"], &["rainy"]]),
            strings(&["no", "yes", "no", "yes", "yes"]),
        )
        .unwrap();
        assert_eq!(set.distinct_values(0), vec!["sunny", "rainy", "overcast"]);
    }

    #[test]
    fn test_partition_by_groups_rows_with_their_labels() {
        let set = SampleSet::new(
            table(&[&["b", "1"], &["a", "2"], &["b", "3"]]),
            strings(&["x", "y", "z"]),
        )
        .unwrap();

        let parts = set.partition_by(0);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].0, "b");
        assert_eq!(parts[0].1.labels(), &strings(&["x", "z"])[..]);
        assert_eq!(parts[0].1.features()[1], strings(&["b", "3"]));
        assert_eq!(parts[1].0, "a");
        assert_eq!(parts[1].1.len(), 1);

        let total: usize = parts.iter().map(|(_, s)| s.len()).sum();
        assert_eq!(total, set.len());
    }

    #[test]
    fn test_number_of_features_reads_first_row() {
        let set = SampleSet::new(table(&[&["a", "b", "c"]]), strings(&["x"])).unwrap();
        assert_eq!(set.number_of_features(), 3);
        assert_eq!(set.column(2).collect::<Vec<_>>(), vec!["c"]);
    }
}
