use crate::classifiers::Classifier;
use crate::core::errors::TreeError;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

pub struct FitSpyHandle {
    fits: Arc<AtomicU64>,
    rows: Arc<AtomicU64>,
}

impl FitSpyHandle {
    pub fn fits(&self) -> u64 {
        self.fits.load(Ordering::Relaxed)
    }

    pub fn rows_seen(&self) -> u64 {
        self.rows.load(Ordering::Relaxed)
    }
}

/// Records calls to `fit` and predicts a fixed label.
pub struct FitSpyClassifier {
    fits: Arc<AtomicU64>,
    rows: Arc<AtomicU64>,
    label: String,
}

impl FitSpyClassifier {
    pub fn new(label: &str) -> (Self, FitSpyHandle) {
        let fits = Arc::new(AtomicU64::new(0));
        let rows = Arc::new(AtomicU64::new(0));
        (
            Self {
                fits: fits.clone(),
                rows: rows.clone(),
                label: label.to_string(),
            },
            FitSpyHandle { fits, rows },
        )
    }
}

impl Classifier for FitSpyClassifier {
    fn fit(&mut self, features: Vec<Vec<String>>, _labels: Vec<String>) -> Result<(), TreeError> {
        self.fits.fetch_add(1, Ordering::Relaxed);
        self.rows
            .fetch_add(features.len() as u64, Ordering::Relaxed);
        Ok(())
    }

    fn predict(&self, rows: &[Vec<String>]) -> Result<Vec<String>, TreeError> {
        Ok(vec![self.label.clone(); rows.len()])
    }
}
