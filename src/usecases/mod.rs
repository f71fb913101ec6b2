pub mod matches;
pub mod scoring;
pub mod teams;
pub mod tournaments;
