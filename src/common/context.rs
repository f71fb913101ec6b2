use crate::live::{LiveMatches, MatchTopics};
use sqlx::{Pool, Sqlite};

pub trait Context: Sync + Send {
    fn db(&self) -> &Pool<Sqlite>;
    fn live(&self) -> &LiveMatches;
    fn topics(&self) -> &MatchTopics;
}
