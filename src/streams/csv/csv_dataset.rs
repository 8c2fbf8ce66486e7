use crate::core::errors::{DatasetError, LoadError};
use crate::core::sample_set::SampleSet;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use ::csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Which CSV column holds the class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetColumn {
    First,
    #[default]
    Last,
    Index(usize),
}

impl TargetColumn {
    fn resolve(self, columns: usize) -> Result<usize, LoadError> {
        let index = match self {
            TargetColumn::First => 0,
            TargetColumn::Last => columns.saturating_sub(1),
            TargetColumn::Index(i) => i,
        };
        if index >= columns {
            return Err(LoadError::TargetColumnOutOfRange { index, columns });
        }
        Ok(index)
    }
}

impl FromStr for TargetColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" => Ok(TargetColumn::First),
            "last" => Ok(TargetColumn::Last),
            other => other
                .parse::<usize>()
                .map(TargetColumn::Index)
                .map_err(|_| format!("expected 'first', 'last' or a column index, got '{s}'")),
        }
    }
}

impl fmt::Display for TargetColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetColumn::First => f.write_str("first"),
            TargetColumn::Last => f.write_str("last"),
            TargetColumn::Index(i) => write!(f, "{i}"),
        }
    }
}

/// A headered CSV table split into categorical features and labels.
///
/// Cells are kept as text, trimmed and unquoted. Empty lines are skipped. Cell contents are not validated here, [`CsvDataset::to_sample_set`]
/// does that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDataset {
    pub feature_names: Vec<String>,
    pub target_name: String,
    pub features: Vec<Vec<String>>,
    pub labels: Vec<String>,
}

impl CsvDataset {
    pub fn from_path(path: &Path, target: TargetColumn) -> Result<Self, LoadError> {
        Self::from_reader(File::open(path)?, target)
    }

    pub fn from_reader<R: Read>(reader: R, target: TargetColumn) -> Result<Self, LoadError> {
        let (mut feature_names, rows) = read_table(reader)?;
        let target_index = target.resolve(feature_names.len())?;
        let target_name = feature_names.remove(target_index);

        let mut features = Vec::with_capacity(rows.len());
        let mut labels = Vec::with_capacity(rows.len());
        for mut row in rows {
            labels.push(row.remove(target_index));
            features.push(row);
        }

        Ok(Self {
            feature_names,
            target_name,
            features,
            labels,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn to_sample_set(&self) -> Result<SampleSet, DatasetError> {
        SampleSet::new(self.features.clone(), self.labels.clone())
    }

    /// Shuffles rows with a seeded generator and moves `fraction` of them
    /// into a second dataset. Returns `(train, holdout)`.
    pub fn holdout_split(self, fraction: f64, seed: u64) -> (CsvDataset, CsvDataset) {
        let fraction = fraction.clamp(0.0, 1.0);
        let holdout_len = (self.len() as f64 * fraction).round() as usize;

        let mut rows: Vec<(Vec<String>, String)> =
            self.features.into_iter().zip(self.labels).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        rows.shuffle(&mut rng);

        let train_rows = rows.split_off(holdout_len);
        let build = |rows: Vec<(Vec<String>, String)>| {
            let (features, labels) = rows.into_iter().unzip();
            CsvDataset {
                feature_names: self.feature_names.clone(),
                target_name: self.target_name.clone(),
                features,
                labels,
            }
        };

        (build(train_rows), build(rows))
    }
}

/// Reads a headered CSV table without assigning a target column.
///
/// Returns the header and the data rows. Every row must have as many fields
/// as the header; quoting follows RFC 4180.
pub fn read_table<R: Read>(reader: R) -> Result<(Vec<String>, Vec<Vec<String>>), LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(false)
        .from_reader(reader);

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if header.is_empty() {
        return Err(LoadError::EmptyFile);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok((header, rows))
}

pub fn read_table_from_path(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>), LoadError> {
    read_table(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{WEATHER_CSV, strings, table, weather};
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().expect("tempfile");
        f.write_all(contents.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn test_load_weather_with_last_target() {
        let tf = write_csv(WEATHER_CSV);
        let ds = CsvDataset::from_path(tf.path(), TargetColumn::Last).unwrap();
        let (features, labels) = weather();

        assert_eq!(
            ds.feature_names,
            strings(&["outlook", "temperature", "humidity", "windy"])
        );
        assert_eq!(ds.target_name, "play");
        assert_eq!(ds.features, features);
        assert_eq!(ds.labels, labels);
    }

    #[test]
    fn test_first_target_column_is_removed_from_features() {
        let csv = "class,cap,odor\ne,x,a\np,f,n\n";
        let ds = CsvDataset::from_reader(Cursor::new(csv), TargetColumn::First).unwrap();
        assert_eq!(ds.feature_names, strings(&["cap", "odor"]));
        assert_eq!(ds.labels, strings(&["e", "p"]));
        assert_eq!(ds.features[1], strings(&["f", "n"]));
    }

    #[test]
    fn test_index_target_and_quotes() {
        let csv = "a,label,b\n\"x, y\",yes,z\n";
        let ds = CsvDataset::from_reader(Cursor::new(csv), TargetColumn::Index(1)).unwrap();
        assert_eq!(ds.labels, strings(&["yes"]));
        assert_eq!(ds.features[0], strings(&["x, y", "z"]));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let csv = "\nf,y\n\na,1\n\n\nb,2\n";
        let ds = CsvDataset::from_reader(Cursor::new(csv), TargetColumn::Last).unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_apostrophes_are_plain_characters() {
        let csv = "name,y\nO'Brien,a\nSmith,b\n";
        let ds = CsvDataset::from_reader(Cursor::new(csv), TargetColumn::Last).unwrap();
        assert_eq!(ds.features, table(&[&["O'Brien"], &["Smith"]]));
        assert_eq!(ds.labels, strings(&["a", "b"]));
    }

    #[test]
    fn test_doubled_quotes_are_unescaped() {
        let csv = "phrase,y\n\"say \"\"hi\"\"\",a\n";
        let ds = CsvDataset::from_reader(Cursor::new(csv), TargetColumn::Last).unwrap();
        assert_eq!(ds.features[0], strings(&["say \"hi\""]));
    }

    #[test]
    fn test_cells_are_trimmed() {
        let ds = CsvDataset::from_reader(Cursor::new(" a , y \n x ,  1\n"), TargetColumn::Last)
            .unwrap();
        assert_eq!(ds.feature_names, strings(&["a"]));
        assert_eq!(ds.target_name, "y");
        assert_eq!(ds.features[0], strings(&["x"]));
        assert_eq!(ds.labels, strings(&["1"]));
    }

    #[test]
    fn test_empty_file_errors() {
        let err = CsvDataset::from_reader(Cursor::new("\n\n"), TargetColumn::Last).unwrap_err();
        assert!(matches!(err, LoadError::EmptyFile));
    }

    #[test]
    fn test_target_out_of_range_errors() {
        let err = CsvDataset::from_reader(Cursor::new("a,b\n1,2\n"), TargetColumn::Index(2))
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::TargetColumnOutOfRange {
                index: 2,
                columns: 2
            }
        ));
    }

    #[test]
    fn test_ragged_line_reports_line_number() {
        let csv = "a,b,y\n1,2,x\n\n1,x\n";
        let err = CsvDataset::from_reader(Cursor::new(csv), TargetColumn::Last).unwrap_err();
        assert!(matches!(
            err,
            LoadError::RaggedLine {
                line: 4,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err =
            CsvDataset::from_path(Path::new("no/such/file.csv"), TargetColumn::Last).unwrap_err();
        assert!(matches!(err, LoadError::Io(e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_blank_cell_is_rejected_by_sample_set() {
        let csv = "a,y\n,x\n";
        let ds = CsvDataset::from_reader(Cursor::new(csv), TargetColumn::Last).unwrap();
        assert!(ds.to_sample_set().is_err());
    }

    #[test]
    fn test_holdout_split_is_seeded_and_complete() {
        let ds = CsvDataset::from_reader(Cursor::new(WEATHER_CSV), TargetColumn::Last).unwrap();

        let (train_a, test_a) = ds.clone().holdout_split(0.3, 7);
        let (train_b, test_b) = ds.clone().holdout_split(0.3, 7);
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);

        assert_eq!(test_a.len(), 4);
        assert_eq!(train_a.len(), 10);
        assert_eq!(train_a.feature_names, ds.feature_names);

        let mut all: Vec<_> = train_a.labels.iter().chain(&test_a.labels).cloned().collect();
        let mut original = ds.labels.clone();
        all.sort();
        original.sort();
        assert_eq!(all, original);
    }

    #[test]
    fn test_read_table_keeps_every_column() {
        let (header, rows) = read_table(Cursor::new("a,b\nx,y\n\nz,w\n")).unwrap();
        assert_eq!(header, strings(&["a", "b"]));
        assert_eq!(rows, vec![strings(&["x", "y"]), strings(&["z", "w"])]);
    }

    #[test]
    fn test_target_column_parsing() {
        assert_eq!("first".parse::<TargetColumn>(), Ok(TargetColumn::First));
        assert_eq!("LAST".parse::<TargetColumn>(), Ok(TargetColumn::Last));
        assert_eq!("3".parse::<TargetColumn>(), Ok(TargetColumn::Index(3)));
        assert!("middle".parse::<TargetColumn>().is_err());
        assert_eq!(TargetColumn::Index(3).to_string(), "3");
    }
}
