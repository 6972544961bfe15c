pub mod job;
pub mod portfolio;
pub mod profile;
