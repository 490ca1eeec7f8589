pub mod history;
pub mod markov;
pub mod predictor;
