//! PostgreSQL store. Multi-statement writes run in one transaction; foreign keys cascade on delete.

use super::Store;
use crate::error::{AppError, ConfigError};
use crate::model::{
    Mission, MissionDetail, MissionDraft, Planet, PlanetDetail, PlanetDraft, Scientist,
    ScientistDetail, ScientistDraft, ScientistPatch,
};
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgConnection, PgPool};
use std::str::FromStr;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MissionPlanetRow {
    id: i64,
    name: String,
    scientist_id: i64,
    planet_id: i64,
    planet_name: String,
    distance_from_earth: i64,
    nearest_star: String,
}

impl From<MissionPlanetRow> for (Mission, Planet) {
    fn from(r: MissionPlanetRow) -> Self {
        (
            Mission {
                id: r.id,
                name: r.name,
                scientist_id: r.scientist_id,
                planet_id: r.planet_id,
            },
            Planet {
                id: r.planet_id,
                name: r.planet_name,
                distance_from_earth: r.distance_from_earth,
                nearest_star: r.nearest_star,
            },
        )
    }
}

#[derive(sqlx::FromRow)]
struct MissionScientistRow {
    id: i64,
    name: String,
    scientist_id: i64,
    planet_id: i64,
    scientist_name: String,
    field_of_study: String,
}

impl From<MissionScientistRow> for (Mission, Scientist) {
    fn from(r: MissionScientistRow) -> Self {
        (
            Mission {
                id: r.id,
                name: r.name,
                scientist_id: r.scientist_id,
                planet_id: r.planet_id,
            },
            Scientist {
                id: r.scientist_id,
                name: r.scientist_name,
                field_of_study: r.field_of_study,
            },
        )
    }
}

#[derive(sqlx::FromRow)]
struct MissionRow {
    id: i64,
    name: String,
    scientist_id: i64,
    planet_id: i64,
    scientist_name: String,
    field_of_study: String,
    planet_name: String,
    distance_from_earth: i64,
    nearest_star: String,
}

impl From<MissionRow> for MissionDetail {
    fn from(r: MissionRow) -> Self {
        let mission = Mission {
            id: r.id,
            name: r.name,
            scientist_id: r.scientist_id,
            planet_id: r.planet_id,
        };
        let scientist = Scientist {
            id: r.scientist_id,
            name: r.scientist_name,
            field_of_study: r.field_of_study,
        };
        let planet = Planet {
            id: r.planet_id,
            name: r.planet_name,
            distance_from_earth: r.distance_from_earth,
            nearest_star: r.nearest_star,
        };
        MissionDetail::new(&mission, &scientist, &planet)
    }
}

async fn load_scientist_detail(
    conn: &mut PgConnection,
    id: i64,
) -> Result<Option<ScientistDetail>, AppError> {
    let scientist: Option<Scientist> =
        sqlx::query_as("SELECT id, name, field_of_study FROM scientists WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
    let Some(scientist) = scientist else {
        return Ok(None);
    };
    let rows: Vec<MissionPlanetRow> = sqlx::query_as(
        "SELECT m.id, m.name, m.scientist_id, m.planet_id, \
         p.name AS planet_name, p.distance_from_earth, p.nearest_star \
         FROM missions m JOIN planets p ON p.id = m.planet_id \
         WHERE m.scientist_id = $1 ORDER BY m.id",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;
    let missions: Vec<(Mission, Planet)> = rows.into_iter().map(Into::into).collect();
    Ok(Some(ScientistDetail::new(&scientist, &missions)))
}

async fn load_mission_detail(
    conn: &mut PgConnection,
    id: i64,
) -> Result<Option<MissionDetail>, AppError> {
    let row: Option<MissionRow> = sqlx::query_as(
        "SELECT m.id, m.name, m.scientist_id, m.planet_id, \
         s.name AS scientist_name, s.field_of_study, \
         p.name AS planet_name, p.distance_from_earth, p.nearest_star \
         FROM missions m \
         JOIN scientists s ON s.id = m.scientist_id \
         JOIN planets p ON p.id = m.planet_id \
         WHERE m.id = $1",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row.map(Into::into))
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn is_empty(&self) -> Result<bool, AppError> {
        let empty: (bool,) = sqlx::query_as(
            "SELECT NOT EXISTS(SELECT 1 FROM scientists) \
             AND NOT EXISTS(SELECT 1 FROM planets) \
             AND NOT EXISTS(SELECT 1 FROM missions)",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(empty.0)
    }

    async fn list_scientists(&self) -> Result<Vec<Scientist>, AppError> {
        let rows = sqlx::query_as("SELECT id, name, field_of_study FROM scientists ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn scientist_exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM scientists WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.0)
    }

    async fn scientist_detail(&self, id: i64) -> Result<Option<ScientistDetail>, AppError> {
        let mut conn = self.pool.acquire().await?;
        load_scientist_detail(&mut conn, id).await
    }

    async fn create_scientist(&self, draft: ScientistDraft) -> Result<ScientistDetail, AppError> {
        let scientist: Scientist = sqlx::query_as(
            "INSERT INTO scientists (name, field_of_study) VALUES ($1, $2) \
             RETURNING id, name, field_of_study",
        )
        .bind(&draft.name)
        .bind(&draft.field_of_study)
        .fetch_one(&self.pool)
        .await?;
        tracing::debug!(id = scientist.id, "scientist inserted");
        Ok(ScientistDetail::new(&scientist, &[]))
    }

    async fn update_scientist(
        &self,
        id: i64,
        patch: &ScientistPatch,
    ) -> Result<Option<ScientistDetail>, AppError> {
        let mut tx = self.pool.begin().await?;
        let current: Option<Scientist> = sqlx::query_as(
            "SELECT id, name, field_of_study FROM scientists WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(mut scientist) = current else {
            return Ok(None);
        };
        patch.apply(&mut scientist);
        sqlx::query("UPDATE scientists SET name = $2, field_of_study = $3 WHERE id = $1")
            .bind(id)
            .bind(&scientist.name)
            .bind(&scientist.field_of_study)
            .execute(&mut *tx)
            .await?;
        let detail = load_scientist_detail(&mut tx, id).await?;
        tx.commit().await?;
        Ok(detail)
    }

    async fn delete_scientist(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        let missions = sqlx::query("DELETE FROM missions WHERE scientist_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let deleted = sqlx::query("DELETE FROM scientists WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Ok(false);
        }
        tx.commit().await?;
        tracing::debug!(id, missions, "scientist deleted");
        Ok(true)
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError> {
        let rows = sqlx::query_as(
            "SELECT id, name, distance_from_earth, nearest_star FROM planets ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn planet_detail(&self, id: i64) -> Result<Option<PlanetDetail>, AppError> {
        let mut conn = self.pool.acquire().await?;
        let planet: Option<Planet> = sqlx::query_as(
            "SELECT id, name, distance_from_earth, nearest_star FROM planets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        let Some(planet) = planet else {
            return Ok(None);
        };
        let rows: Vec<MissionScientistRow> = sqlx::query_as(
            "SELECT m.id, m.name, m.scientist_id, m.planet_id, \
             s.name AS scientist_name, s.field_of_study \
             FROM missions m JOIN scientists s ON s.id = m.scientist_id \
             WHERE m.planet_id = $1 ORDER BY m.id",
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await?;
        let missions: Vec<(Mission, Scientist)> = rows.into_iter().map(Into::into).collect();
        Ok(Some(PlanetDetail::new(&planet, &missions)))
    }

    async fn create_planet(&self, draft: PlanetDraft) -> Result<Planet, AppError> {
        let planet = sqlx::query_as(
            "INSERT INTO planets (name, distance_from_earth, nearest_star) VALUES ($1, $2, $3) \
             RETURNING id, name, distance_from_earth, nearest_star",
        )
        .bind(&draft.name)
        .bind(draft.distance_from_earth)
        .bind(&draft.nearest_star)
        .fetch_one(&self.pool)
        .await?;
        Ok(planet)
    }

    async fn delete_planet(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        let missions = sqlx::query("DELETE FROM missions WHERE planet_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let deleted = sqlx::query("DELETE FROM planets WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Ok(false);
        }
        tx.commit().await?;
        tracing::debug!(id, missions, "planet deleted");
        Ok(true)
    }

    async fn create_mission(&self, draft: MissionDraft) -> Result<MissionDetail, AppError> {
        let mut tx = self.pool.begin().await?;
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO missions (name, scientist_id, planet_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&draft.name)
        .bind(draft.scientist_id)
        .bind(draft.planet_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::from_db)?;
        let detail = load_mission_detail(&mut tx, id)
            .await?
            .ok_or(AppError::NotFound("Mission"))?;
        tx.commit().await?;
        Ok(detail)
    }

    async fn mission_detail(&self, id: i64) -> Result<Option<MissionDetail>, AppError> {
        let mut conn = self.pool.acquire().await?;
        load_mission_detail(&mut conn, id).await
    }
}

/// Connects to the `postgres` maintenance database and creates the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::InvalidVar {
            var: "DATABASE_URL",
            reason: e.to_string(),
        })?;
    let mut conn: PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let path_start = url.rfind('/').ok_or_else(|| ConfigError::InvalidVar {
        var: "DATABASE_URL",
        reason: "no database path".into(),
    })? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name_from_url() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/missions?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "missions");
    }

    #[test]
    fn url_without_path_is_config_error() {
        assert!(matches!(
            parse_db_name_from_url("localhost"),
            Err(ConfigError::InvalidVar { var: "DATABASE_URL", .. })
        ));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
