mod classification_report;

pub use classification_report::{ClassificationReport, ReportFormat};
