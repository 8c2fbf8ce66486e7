use crate::classifiers::Classifier;
use crate::core::errors::TreeError;

/// Answers every row with the same label and ignores training data.
pub struct ConstantClassifier {
    label: String,
}

impl ConstantClassifier {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }
}

impl Classifier for ConstantClassifier {
    fn fit(&mut self, _features: Vec<Vec<String>>, _labels: Vec<String>) -> Result<(), TreeError> {
        Ok(())
    }

    fn predict(&self, rows: &[Vec<String>]) -> Result<Vec<String>, TreeError> {
        Ok(vec![self.label.clone(); rows.len()])
    }
}
