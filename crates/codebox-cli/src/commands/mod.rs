//! Subcommand implementations

pub mod doctor;
pub mod languages;
pub mod run;
pub mod serve;
