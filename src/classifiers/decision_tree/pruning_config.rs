use serde::{Deserialize, Serialize};

/// Pre-pruning thresholds for one training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PruningConfig {
    min_samples_allowed: usize,
    max_depth_allowed: usize,
    min_entropy_decrease_allowed: f64,
}

/// Explicit values that replace the derived thresholds when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PruningOverrides {
    pub min_samples_allowed: Option<usize>,
    pub max_depth_allowed: Option<usize>,
    pub min_entropy_decrease_allowed: Option<f64>,
}

impl PruningConfig {
    pub fn new(
        min_samples_allowed: usize,
        max_depth_allowed: usize,
        min_entropy_decrease_allowed: f64,
    ) -> Self {
        Self {
            min_samples_allowed,
            max_depth_allowed,
            min_entropy_decrease_allowed: min_entropy_decrease_allowed.max(0.0),
        }
    }

    /// Derives thresholds from the root sample count `n` and root entropy:
    /// `floor(sqrt(n) / 10)`, `floor(ln(n))` and `entropy / 100`.
    pub fn derive(n: usize, root_entropy: f64) -> Self {
        let n_f = n as f64;
        let max_depth = if n == 0 { 0.0 } else { n_f.ln().floor() };
        Self::new(
            (n_f.sqrt() / 10.0).floor() as usize,
            max_depth as usize,
            root_entropy / 100.0,
        )
    }

    pub fn with_overrides(self, overrides: &PruningOverrides) -> Self {
        Self::new(
            overrides
                .min_samples_allowed
                .unwrap_or(self.min_samples_allowed),
            overrides.max_depth_allowed.unwrap_or(self.max_depth_allowed),
            overrides
                .min_entropy_decrease_allowed
                .unwrap_or(self.min_entropy_decrease_allowed),
        )
    }

    pub fn min_samples_allowed(&self) -> usize {
        self.min_samples_allowed
    }

    pub fn max_depth_allowed(&self) -> usize {
        self.max_depth_allowed
    }

    pub fn min_entropy_decrease_allowed(&self) -> f64 {
        self.min_entropy_decrease_allowed
    }
}
