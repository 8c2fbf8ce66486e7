pub mod errors;
pub mod sample_set;

pub use errors::{DatasetError, LoadError, TreeError};
pub use sample_set::SampleSet;
