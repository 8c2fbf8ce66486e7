//! Shannon-entropy scoring used to choose and accept splits.
//!
//! Every aggregation walks classes and values in first-seen order so that
//! floating point sums, and therefore split choices, are reproducible.

use std::collections::HashMap;

/// Occurrence count of every label, in order of first appearance.
pub fn class_counts<S: AsRef<str>>(labels: &[S]) -> Vec<(&str, usize)> {
    let mut slot_of: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for label in labels {
        let label = label.as_ref();
        match slot_of.get(label) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slot_of.insert(label, counts.len());
                counts.push((label, 1));
            }
        }
    }
    counts
}

/// Base-2 Shannon entropy of the empirical label distribution.
///
/// The entropy of an empty set is undefined; callers skip empty partitions and
/// this returns `0.0` for them instead of `NaN`.
pub fn entropy<S: AsRef<str>>(labels: &[S]) -> f64 {
    debug_assert!(!labels.is_empty(), "entropy of an empty label set");
    if labels.is_empty() {
        return 0.0;
    }

    let total = labels.len() as f64;
    class_counts(labels)
        .into_iter()
        .map(|(_, count)| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Sample-weighted mean entropy of the partitions induced by `feature_index`.
pub fn entropy_after_split(features: &[Vec<String>], labels: &[String], feature_index: usize) -> f64 {
    let total = labels.len() as f64;
    if labels.is_empty() {
        return 0.0;
    }

    let mut slot_of: HashMap<&str, usize> = HashMap::new();
    let mut partitions: Vec<Vec<&str>> = Vec::new();
    for (row, label) in features.iter().zip(labels.iter()) {
        let value = row[feature_index].as_str();
        let slot = *slot_of.entry(value).or_insert_with(|| {
            partitions.push(Vec::new());
            partitions.len() - 1
        });
        partitions[slot].push(label.as_str());
    }

    partitions
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| (p.len() as f64 / total) * entropy(p))
        .sum()
}

/// Entropy reduction obtained by splitting on `feature_index`, never negative.
pub fn information_gain(features: &[Vec<String>], labels: &[String], feature_index: usize) -> f64 {
    let gain = entropy(labels) - entropy_after_split(features, labels, feature_index);
    if gain < f64::EPSILON { 0.0 } else { gain }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{strings, table, weather};

    const EPS: f64 = 1e-12;

    #[test]
    fn test_entropy_of_single_class_is_zero() {
        assert_eq!(entropy(&strings(&["a"])), 0.0);
        assert_eq!(entropy(&strings(&["a", "a", "a", "a"])), 0.0);
    }

    #[test]
    fn test_entropy_of_balanced_classes_is_log2_k() {
        assert!((entropy(&strings(&["yes", "yes", "no", "no"])) - 1.0).abs() < EPS);
        assert!((entropy(&strings(&["a", "b", "c", "d"])) - 2.0).abs() < EPS);

        let three = strings(&["a", "b", "c", "a", "b", "c"]);
        assert!((entropy(&three) - 3f64.log2()).abs() < EPS);
    }

    #[test]
    fn test_entropy_of_weather_labels() {
        let (_, labels) = weather();
        // 9 yes / 5 no
        assert!((entropy(&labels) - 0.940_285_958_670_631).abs() < 1e-9);
    }

    #[test]
    fn test_perfect_split_gains_full_entropy() {
        let features = table(&[&["sunny"], &["sunny"], &["rainy"], &["rainy"]]);
        let labels = strings(&["no", "no", "yes", "yes"]);

        assert!(entropy_after_split(&features, &labels, 0).abs() < EPS);
        assert!((information_gain(&features, &labels, 0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_uninformative_split_gains_nothing() {
        let features = table(&[&["a"], &["b"], &["a"], &["b"]]);
        let labels = strings(&["x", "x", "y", "y"]);

        assert!((entropy_after_split(&features, &labels, 0) - 1.0).abs() < EPS);
        assert_eq!(information_gain(&features, &labels, 0), 0.0);
    }

    #[test]
    fn test_weather_gains_match_textbook_values() {
        let (features, labels) = weather();
        let gains: Vec<f64> = (0..4)
            .map(|i| information_gain(&features, &labels, i))
            .collect();

        assert!((gains[0] - 0.246_749_819).abs() < 1e-6);
        assert!((gains[1] - 0.029_222_566).abs() < 1e-6);
        assert!((gains[2] - 0.151_835_501).abs() < 1e-6);
        assert!((gains[3] - 0.048_127_030).abs() < 1e-6);
    }

    #[test]
    fn test_information_gain_is_never_negative() {
        let (features, labels) = weather();
        for start in 0..labels.len() {
            let f = &features[start..];
            let l = &labels[start..];
            for col in 0..4 {
                assert!(information_gain(f, l, col) >= 0.0);
            }
        }
    }

    #[test]
    fn test_class_counts_follow_first_appearance() {
        let labels = strings(&["b", "a", "b", "c", "a", "b"]);
        assert_eq!(class_counts(&labels), vec![("b", 3), ("a", 2), ("c", 1)]);
    }
}
