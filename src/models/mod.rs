pub mod live;
pub mod matches;
pub mod scoring;
pub mod sports;
pub mod teams;
pub mod tournaments;
