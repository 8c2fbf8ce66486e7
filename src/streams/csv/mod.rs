pub mod csv_dataset;

pub use csv_dataset::{CsvDataset, TargetColumn, read_table, read_table_from_path};
