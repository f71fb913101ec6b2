use crate::common::context::Context;
use crate::entities::tournaments::TournamentRow;
use crate::models::tournaments::TournamentFilters;
use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

const TABLE_NAME: &str = "tournaments";
const READ_FIELDS: &str = "id, name, description, sport, status, start_date, end_date, \
    team_ids, max_teams, format, rules, prizes, created_at";

pub async fn create<C: Context>(ctx: &C, row: &TournamentRow) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (",
        READ_FIELDS,
        ") VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    );
    sqlx::query(QUERY)
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.description)
        .bind(&row.sport)
        .bind(&row.status)
        .bind(row.start_date)
        .bind(row.end_date)
        .bind(&row.team_ids)
        .bind(row.max_teams)
        .bind(&row.format)
        .bind(&row.rules)
        .bind(&row.prizes)
        .bind(row.created_at)
        .execute(ctx.db())
        .await?;
    Ok(())
}

pub async fn fetch_one<C: Context>(ctx: &C, tournament_id: Uuid) -> sqlx::Result<TournamentRow> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(tournament_id)
        .fetch_one(ctx.db())
        .await
}

pub async fn fetch_many<C: Context>(
    ctx: &C,
    filters: &TournamentFilters,
) -> sqlx::Result<Vec<TournamentRow>> {
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
    query.push(" ORDER BY start_date DESC");

    query.build_query_as().fetch_all(ctx.db()).await
}

pub async fn update<C: Context>(ctx: &C, row: &TournamentRow) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET name = ?, description = ?, status = ?, start_date = ?, end_date = ?, \
         team_ids = ?, max_teams = ?, format = ?, rules = ?, prizes = ? WHERE id = ?"
    );
    sqlx::query(QUERY)
        .bind(&row.name)
        .bind(&row.description)
        .bind(&row.status)
        .bind(row.start_date)
        .bind(row.end_date)
        .bind(&row.team_ids)
        .bind(row.max_teams)
        .bind(&row.format)
        .bind(&row.rules)
        .bind(&row.prizes)
        .bind(row.id)
        .execute(ctx.db())
        .await?;
    Ok(())
}

pub async fn delete<C: Context>(ctx: &C, tournament_id: Uuid) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!("DELETE FROM ", TABLE_NAME, " WHERE id = ?");
    sqlx::query(QUERY)
        .bind(tournament_id)
        .execute(ctx.db())
        .await?;
    Ok(())
}
