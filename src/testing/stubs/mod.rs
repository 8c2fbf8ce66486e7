pub mod constant_classifier;
