use crate::common::context::Context;
use crate::entities::matches::MatchRow;
use crate::models::matches::{MatchFilters, MatchStatus};
use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

const TABLE_NAME: &str = "matches";
const READ_FIELDS: &str = "id, sport, team1_id, team2_id, team1_name, team2_name, tournament_id, \
    status, score1, score2, sport_state, duration_minutes, scheduled_at, start_time, end_time, \
    venue, referee, winner_team_id, result, notes, revision, created_at";

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

pub async fn create<C: Context>(ctx: &C, row: &MatchRow) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (",
        READ_FIELDS,
        ") VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    );
    sqlx::query(QUERY)
        .bind(row.id)
        .bind(&row.sport)
        .bind(row.team1_id)
        .bind(row.team2_id)
        .bind(&row.team1_name)
        .bind(&row.team2_name)
        .bind(row.tournament_id)
        .bind(&row.status)
        .bind(row.score1)
        .bind(row.score2)
        .bind(&row.sport_state)
        .bind(row.duration_minutes)
        .bind(row.scheduled_at)
        .bind(row.start_time)
        .bind(row.end_time)
        .bind(&row.venue)
        .bind(&row.referee)
        .bind(row.winner_team_id)
        .bind(&row.result)
        .bind(&row.notes)
        .bind(row.revision)
        .bind(row.created_at)
        .execute(ctx.db())
        .await?;
    Ok(())
}

pub async fn fetch_one<C: Context>(ctx: &C, match_id: Uuid) -> sqlx::Result<MatchRow> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(match_id)
        .fetch_one(ctx.db())
        .await
}

pub async fn fetch_many<C: Context>(
    ctx: &C,
    filters: &MatchFilters,
) -> sqlx::Result<Vec<MatchRow>> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE 1 = 1"
    ));
    if let Some(sport) = filters.sport {
        query.push(" AND sport = ").push_bind(sport.as_str());
    }
    if let Some(status) = filters.status {
        query.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(tournament_id) = filters.tournament_id {
        query.push(" AND tournament_id = ").push_bind(tournament_id);
    }

    let limit = filters
        .limit
        .map(i64::from)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let page = filters.page.map(i64::from).unwrap_or(1).max(1);
    let offset = (page - 1) * limit;
    query
        .push(" ORDER BY scheduled_at DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    query.build_query_as().fetch_all(ctx.db()).await
}

pub async fn fetch_live<C: Context>(ctx: &C) -> sqlx::Result<Vec<MatchRow>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE status = ? ORDER BY start_time ASC"
    );
    sqlx::query_as(QUERY)
        .bind(MatchStatus::Live.as_str())
        .fetch_all(ctx.db())
        .await
}

pub async fn fetch_by_tournament<C: Context>(
    ctx: &C,
    tournament_id: Uuid,
) -> sqlx::Result<Vec<MatchRow>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE tournament_id = ? ORDER BY scheduled_at ASC"
    );
    sqlx::query_as(QUERY)
        .bind(tournament_id)
        .fetch_all(ctx.db())
        .await
}

/// Writes the mutable columns of a match, guarded by the revision the
/// caller read. Returns false when another writer got there first.
pub async fn update_checked<C: Context>(
    ctx: &C,
    row: &MatchRow,
    expected_revision: i64,
) -> sqlx::Result<bool> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET status = ?, score1 = ?, score2 = ?, sport_state = ?, start_time = ?, \
         end_time = ?, winner_team_id = ?, result = ?, notes = ?, revision = ? \
         WHERE id = ? AND revision = ?"
    );
    let result = sqlx::query(QUERY)
        .bind(&row.status)
        .bind(row.score1)
        .bind(row.score2)
        .bind(&row.sport_state)
        .bind(row.start_time)
        .bind(row.end_time)
        .bind(row.winner_team_id)
        .bind(&row.result)
        .bind(&row.notes)
        .bind(row.revision)
        .bind(row.id)
        .bind(expected_revision)
        .execute(ctx.db())
        .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn delete<C: Context>(ctx: &C, match_id: Uuid) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!("DELETE FROM ", TABLE_NAME, " WHERE id = ?");
    sqlx::query(QUERY)
        .bind(match_id)
        .execute(ctx.db())
        .await?;
    Ok(())
}
