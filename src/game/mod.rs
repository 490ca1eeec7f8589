pub mod moves;
pub mod outcome;
