pub mod fixtures;
mod spies;
mod stubs;

pub use spies::fit_spy_classifier::{FitSpyClassifier, FitSpyHandle};
pub use stubs::constant_classifier::ConstantClassifier;
