pub mod analyze;
pub mod config;
pub mod keywords;
pub mod serve;
