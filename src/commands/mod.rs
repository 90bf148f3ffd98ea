pub mod add;
pub mod config;
pub mod import;
pub mod lanes;
