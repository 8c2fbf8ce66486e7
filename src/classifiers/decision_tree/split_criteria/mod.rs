pub mod info_gain;

pub use info_gain::{class_counts, entropy, entropy_after_split, information_gain};
