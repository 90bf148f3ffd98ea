pub mod dates;
pub mod input;
