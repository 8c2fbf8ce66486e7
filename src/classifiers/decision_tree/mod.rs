pub mod decision_tree;
pub mod nodes;
pub mod printer;
pub mod pruning_config;
pub mod split_criteria;

pub use decision_tree::{DecisionTree, find_best_split, is_pure, majority_class};
pub use nodes::Node;
pub use printer::TreePrinter;
pub use pruning_config::{PruningConfig, PruningOverrides};
