//! Create the scientists, planets and missions tables. Idempotent; safe to run on every startup.

use crate::error::AppError;
use sqlx::PgPool;

const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS scientists (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL CHECK (name <> ''),
        field_of_study TEXT NOT NULL CHECK (field_of_study <> '')
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS planets (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL CHECK (name <> ''),
        distance_from_earth BIGINT NOT NULL,
        nearest_star TEXT NOT NULL CHECK (nearest_star <> '')
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS missions (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL CHECK (name <> ''),
        scientist_id BIGINT NOT NULL REFERENCES scientists (id) ON DELETE CASCADE,
        planet_id BIGINT NOT NULL REFERENCES planets (id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS missions_scientist_id_idx ON missions (scientist_id)",
    "CREATE INDEX IF NOT EXISTS missions_planet_id_idx ON missions (planet_id)",
];

pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for sql in DDL {
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::info!("schema ready");
    Ok(())
}
