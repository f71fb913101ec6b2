pub mod sessions;
pub mod topics;

pub use sessions::{LiveMatches, LiveSession};
pub use topics::MatchTopics;
