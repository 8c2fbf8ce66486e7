use crate::classifiers::Classifier;
use crate::classifiers::decision_tree::nodes::Node;
use crate::classifiers::decision_tree::pruning_config::{PruningConfig, PruningOverrides};
use crate::classifiers::decision_tree::split_criteria::{class_counts, entropy, information_gain};
use crate::core::errors::TreeError;
use crate::core::sample_set::{SampleSet, validate};
use serde::{Deserialize, Serialize};

/// Decision tree over categorical features, grown by information gain with
/// pre-pruning thresholds derived from the training set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Option<Node>,
    pruning: Option<PruningConfig>,
    overrides: PruningOverrides,
    number_of_features: usize,
    feature_names: Option<Vec<String>>,
}

impl DecisionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: PruningOverrides) -> Self {
        Self {
            overrides,
            ..Self::default()
        }
    }

    pub fn set_feature_names(&mut self, names: Vec<String>) {
        self.feature_names = Some(names);
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Thresholds used by the last call to [`DecisionTree::fit_samples`].
    pub fn pruning_config(&self) -> Option<&PruningConfig> {
        self.pruning.as_ref()
    }

    pub fn number_of_features(&self) -> usize {
        self.number_of_features
    }

    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    /// Grows a new tree over `samples`, replacing any previous one.
    pub fn fit_samples(&mut self, samples: SampleSet) -> Result<(), TreeError> {
        validate(samples.features(), samples.labels())?;
        self.grow_root(samples);
        Ok(())
    }

    fn grow_root(&mut self, samples: SampleSet) {
        let config = PruningConfig::derive(samples.len(), entropy(samples.labels()))
            .with_overrides(&self.overrides);
        let root_class = majority_class(samples.labels())
            .unwrap_or_default()
            .to_string();

        self.number_of_features = samples.number_of_features();
        self.root = Some(grow(samples, 0, &config, &root_class));
        self.pruning = Some(config);
    }

    /// Predicts the class of a single row.
    pub fn predict_row<S: AsRef<str>>(&self, row: &[S]) -> Result<&str, TreeError> {
        let root = self.root.as_ref().ok_or(TreeError::NotFitted)?;
        self.check_width(0, row.len())?;
        Ok(root.filter_row_to_node(row).class())
    }

    fn check_width(&self, row: usize, found: usize) -> Result<(), TreeError> {
        if found != self.number_of_features {
            return Err(TreeError::ColumnCountMismatch {
                row,
                expected: self.number_of_features,
                found,
            });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Classifier for DecisionTree {
    fn fit(&mut self, features: Vec<Vec<String>>, labels: Vec<String>) -> Result<(), TreeError> {
        let samples = SampleSet::new(features, labels)?;
        self.grow_root(samples);
        Ok(())
    }

    /// Rows are answered independently. A value never seen at some split does
    /// not fail; that split's majority class answers the row instead.
    fn predict(&self, rows: &[Vec<String>]) -> Result<Vec<String>, TreeError> {
        let root = self.root.as_ref().ok_or(TreeError::NotFitted)?;
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                self.check_width(i, row.len())?;
                Ok(root.filter_row_to_node(row).class().to_string())
            })
            .collect()
    }
}

fn grow(samples: SampleSet, depth: usize, config: &PruningConfig, inherited_class: &str) -> Node {
    let class = majority_class(samples.labels())
        .unwrap_or(inherited_class)
        .to_string();

    if let Some(feature_index) = split_feature(&samples, depth, config) {
        let partitions = samples.partition_by(feature_index);
        // a single partition reproduces this node and cannot make progress
        if partitions.len() > 1 {
            let children = partitions
                .into_iter()
                .filter(|(_, part)| !part.is_empty())
                .map(|(value, part)| (value, grow(part, depth + 1, config, &class)))
                .collect();
            return Node::Split {
                samples,
                feature_index,
                fallback_class: class,
                children,
            };
        }
    }

    Node::Leaf {
        samples,
        predicted_class: class,
    }
}

/// Feature to split `samples` on, or `None` when a stop rule holds.
///
/// Rules are checked in order: purity, depth limit, sample floor, then
/// insufficient entropy decrease for the best feature.
fn split_feature(samples: &SampleSet, depth: usize, config: &PruningConfig) -> Option<usize> {
    let labels = samples.labels();
    if is_pure(labels)
        || depth >= config.max_depth_allowed()
        || samples.len() < config.min_samples_allowed()
    {
        return None;
    }

    let (best, gain) = find_best_split(samples.features(), labels)?;
    if gain < config.min_entropy_decrease_allowed() {
        return None;
    }
    Some(best)
}

/// Column with the highest information gain, with its gain.
///
/// Ties go to the lowest column index. `None` when rows have no columns.
pub fn find_best_split(features: &[Vec<String>], labels: &[String]) -> Option<(usize, f64)> {
    let columns = features.first().map_or(0, Vec::len);
    let mut best: Option<(usize, f64)> = None;
    for feature_index in 0..columns {
        let gain = information_gain(features, labels, feature_index);
        if best.is_none_or(|(_, best_gain)| gain > best_gain) {
            best = Some((feature_index, gain));
        }
    }
    best
}

pub fn is_pure<S: AsRef<str>>(labels: &[S]) -> bool {
    match labels.split_first() {
        Some((first, rest)) => rest.iter().all(|l| l.as_ref() == first.as_ref()),
        None => true,
    }
}

/// Most frequent label.
///
/// Ties go to the label that appears first in `labels`.
pub fn majority_class<S: AsRef<str>>(labels: &[S]) -> Option<&str> {
    let mut best: Option<(&str, usize)> = None;
    for (label, count) in class_counts(labels) {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}
