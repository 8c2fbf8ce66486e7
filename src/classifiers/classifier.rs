use crate::core::errors::TreeError;

pub trait Classifier {
    fn fit(&mut self, features: Vec<Vec<String>>, labels: Vec<String>) -> Result<(), TreeError>;
    fn predict(&self, rows: &[Vec<String>]) -> Result<Vec<String>, TreeError>;
}
