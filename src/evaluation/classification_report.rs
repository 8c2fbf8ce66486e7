use crate::core::errors::DatasetError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs;
use std::io;
use std::path::Path;
use strum_macros::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, StrumDisplay, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

/// Accuracy over every label plus one-vs-rest scores for `positive_label`.
///
/// Ratios with a zero denominator are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub instances: usize,
    pub accuracy: f64,
    pub positive_label: String,
    pub precision: f64,
    pub recall: f64,
    pub f_score: f64,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        f64::NAN
    } else {
        num as f64 / den as f64
    }
}

impl ClassificationReport {
    pub fn evaluate(
        actual: &[String],
        predicted: &[String],
        positive_label: &str,
    ) -> Result<Self, DatasetError> {
        if actual.len() != predicted.len() {
            return Err(DatasetError::LengthMismatch {
                rows: predicted.len(),
                labels: actual.len(),
            });
        }

        let (mut correct, mut tp, mut fp, mut fn_) = (0usize, 0usize, 0usize, 0usize);
        for (a, p) in actual.iter().zip(predicted) {
            if a == p {
                correct += 1;
            }
            match (a == positive_label, p == positive_label) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (true, false) => fn_ += 1,
                (false, false) => {}
            }
        }

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f_score = 2.0 * precision * recall / (precision + recall);

        Ok(Self {
            instances: actual.len(),
            accuracy: ratio(correct, actual.len()),
            positive_label: positive_label.to_string(),
            precision,
            recall,
            f_score,
        })
    }

    #[inline]
    fn fmtv(v: f64) -> String {
        if v.is_nan() {
            "NaN".into()
        } else {
            format!("{:.6}", v)
        }
    }

    fn delimited(&self, sep: char) -> String {
        let header = [
            "instances",
            "accuracy",
            "positive_label",
            "precision",
            "recall",
            "f_score",
        ];
        let values = [
            self.instances.to_string(),
            Self::fmtv(self.accuracy),
            self.positive_label.clone(),
            Self::fmtv(self.precision),
            Self::fmtv(self.recall),
            Self::fmtv(self.f_score),
        ];
        let sep = sep.to_string();
        format!("{}\n{}\n", header.join(&sep), values.join(&sep))
    }

    pub fn render(&self, format: ReportFormat) -> io::Result<String> {
        match format {
            ReportFormat::Csv => Ok(self.delimited(',')),
            ReportFormat::Tsv => Ok(self.delimited('\t')),
            ReportFormat::Json => serde_json::to_string_pretty(self)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(io::Error::other),
        }
    }

    pub fn export(&self, path: &Path, format: ReportFormat) -> io::Result<()> {
        fs::write(path, self.render(format)?)
    }
}

impl Display for ClassificationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "n={}, acc={}, positive={}, precision={}, recall={}, f_score={}",
            self.instances,
            Self::fmtv(self.accuracy),
            self.positive_label,
            Self::fmtv(self.precision),
            Self::fmtv(self.recall),
            Self::fmtv(self.f_score)
        )
    }
}
