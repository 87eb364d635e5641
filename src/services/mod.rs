pub mod evaluation;
pub mod prediction;
pub mod recommendations;
pub mod similarity;
