use crate::common::context::Context;
use crate::entities::teams::TeamRow;
use crate::models::teams::TeamFilters;
use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

const TABLE_NAME: &str = "teams";
const READ_FIELDS: &str =
    "id, name, sport, members, captain, vice_captain, tournament_id, active, created_at";

pub async fn create<C: Context>(ctx: &C, row: &TeamRow) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (",
        READ_FIELDS,
        ") VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
    );
    sqlx::query(QUERY)
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.sport)
        .bind(&row.members)
        .bind(&row.captain)
        .bind(&row.vice_captain)
        .bind(row.tournament_id)
        .bind(row.active)
        .bind(row.created_at)
        .execute(ctx.db())
        .await?;
    Ok(())
}

pub async fn fetch_one<C: Context>(ctx: &C, team_id: Uuid) -> sqlx::Result<TeamRow> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id = ?"
    );
    sqlx::query_as(QUERY).bind(team_id).fetch_one(ctx.db()).await
}

pub async fn fetch_many<C: Context>(ctx: &C, filters: &TeamFilters) -> sqlx::Result<Vec<TeamRow>> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE active = TRUE"
    ));
    if let Some(sport) = filters.sport {
        query.push(" AND sport = ").push_bind(sport.as_str());
    }
    if let Some(tournament_id) = filters.tournament_id {
        query.push(" AND tournament_id = ").push_bind(tournament_id);
    }
    query.push(" ORDER BY name ASC");

    query.build_query_as().fetch_all(ctx.db()).await
}

pub async fn update<C: Context>(ctx: &C, row: &TeamRow) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET name = ?, members = ?, captain = ?, vice_captain = ?, tournament_id = ?, \
         active = ? WHERE id = ?"
    );
    sqlx::query(QUERY)
        .bind(&row.name)
        .bind(&row.members)
        .bind(&row.captain)
        .bind(&row.vice_captain)
        .bind(row.tournament_id)
        .bind(row.active)
        .bind(row.id)
        .execute(ctx.db())
        .await?;
    Ok(())
}

/// Teams are never hard-deleted so finished matches keep their names.
pub async fn deactivate<C: Context>(ctx: &C, team_id: Uuid) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET active = FALSE WHERE id = ?"
    );
    sqlx::query(QUERY)
        .bind(team_id)
        .execute(ctx.db())
        .await?;
    Ok(())
}
