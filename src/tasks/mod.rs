pub mod train_evaluate;

pub use train_evaluate::{
    Evaluation, TrainEvaluateOutcome, TrainEvaluateParams, TrainEvaluateTask, evaluate_classifier,
};
