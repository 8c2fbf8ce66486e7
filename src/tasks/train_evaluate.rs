use crate::classifiers::Classifier;
use crate::classifiers::decision_tree::split_criteria::information_gain;
use crate::classifiers::decision_tree::{DecisionTree, PruningOverrides};
use crate::evaluation::ClassificationReport;
use crate::streams::csv::{CsvDataset, TargetColumn};
use anyhow::{Context, Result, bail, ensure};
use cpu_time::ThreadTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainEvaluateParams {
    pub train_file: PathBuf,
    /// When absent, a seeded holdout of the training file is used instead.
    #[serde(default)]
    pub test_file: Option<PathBuf>,
    pub holdout_fraction: f64,
    pub seed: u64,
    #[serde(default)]
    pub target_column: TargetColumn,
    /// Defaults to the first label of the test set.
    #[serde(default)]
    pub positive_label: Option<String>,
    #[serde(default)]
    pub pruning: PruningOverrides,
}

impl Default for TrainEvaluateParams {
    fn default() -> Self {
        Self {
            train_file: PathBuf::new(),
            test_file: None,
            holdout_fraction: 0.2,
            seed: 42,
            target_column: TargetColumn::Last,
            positive_label: None,
            pruning: PruningOverrides::default(),
        }
    }
}

/// Predictions for a test set and how well they match.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub predictions: Vec<String>,
    pub report: ClassificationReport,
    /// CPU seconds spent in `fit`.
    pub fit_seconds: f64,
    /// CPU seconds spent in `predict`.
    pub predict_seconds: f64,
}

/// Fits `learner` on `train`, predicts `test` and scores the result.
pub fn evaluate_classifier<C: Classifier + ?Sized>(
    learner: &mut C,
    train: &CsvDataset,
    test: &CsvDataset,
    positive_label: Option<&str>,
) -> Result<Evaluation> {
    ensure!(!test.is_empty(), "test set is empty");
    let positive_label = match positive_label {
        Some(label) => label.to_string(),
        None => test.labels[0].clone(),
    };

    let start = ThreadTime::now();
    learner
        .fit(train.features.clone(), train.labels.clone())
        .context("failed to fit learner")?;
    let fit_seconds = start.elapsed().as_secs_f64();

    let start = ThreadTime::now();
    let predictions = learner
        .predict(&test.features)
        .context("failed to predict test set")?;
    let predict_seconds = start.elapsed().as_secs_f64();

    let report = ClassificationReport::evaluate(&test.labels, &predictions, &positive_label)?;

    Ok(Evaluation {
        predictions,
        report,
        fit_seconds,
        predict_seconds,
    })
}

pub struct TrainEvaluateOutcome {
    pub tree: DecisionTree,
    pub train: CsvDataset,
    pub test: CsvDataset,
    pub evaluation: Evaluation,
}

impl TrainEvaluateOutcome {
    /// Information gain of every feature over the whole training set.
    pub fn feature_gains(&self) -> Vec<(String, f64)> {
        self.train
            .feature_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                (
                    name.clone(),
                    information_gain(&self.train.features, &self.train.labels, i),
                )
            })
            .collect()
    }
}

pub struct TrainEvaluateTask {
    params: TrainEvaluateParams,
}

impl TrainEvaluateTask {
    pub fn new(params: TrainEvaluateParams) -> Result<Self> {
        if params.test_file.is_none()
            && !(params.holdout_fraction > 0.0 && params.holdout_fraction < 1.0)
        {
            bail!(
                "holdout_fraction must be in (0, 1) when no test file is given, got {}",
                params.holdout_fraction
            );
        }
        Ok(Self { params })
    }

    pub fn params(&self) -> &TrainEvaluateParams {
        &self.params
    }

    pub fn load(&self) -> Result<(CsvDataset, CsvDataset)> {
        let p = &self.params;
        let train = CsvDataset::from_path(&p.train_file, p.target_column)
            .with_context(|| format!("failed to load {}", p.train_file.display()))?;

        match &p.test_file {
            Some(path) => {
                let test = CsvDataset::from_path(path, p.target_column)
                    .with_context(|| format!("failed to load {}", path.display()))?;
                ensure!(
                    test.feature_names.len() == train.feature_names.len(),
                    "test file has {} feature columns, training file has {}",
                    test.feature_names.len(),
                    train.feature_names.len()
                );
                Ok((train, test))
            }
            None => Ok(train.holdout_split(p.holdout_fraction, p.seed)),
        }
    }

    pub fn run(&self) -> Result<TrainEvaluateOutcome> {
        let (train, test) = self.load()?;

        let mut tree = DecisionTree::with_overrides(self.params.pruning);
        tree.set_feature_names(train.feature_names.clone());

        let evaluation =
            evaluate_classifier(&mut tree, &train, &test, self.params.positive_label.as_deref())?;

        Ok(TrainEvaluateOutcome {
            tree,
            train,
            test,
            evaluation,
        })
    }
}
