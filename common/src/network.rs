pub mod outcome;
pub mod range;
pub mod target;
