// Skill matching: portfolio catalog and pluggable scorers.

pub mod catalog;
pub mod handlers;
pub mod scorer;
