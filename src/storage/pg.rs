//! PostgreSQL storage. All objects share one table in a schema named from
//! `HBNB_SCHEMA` (default `hbnb`), one row per kind + id with the entity as JSONB.

use super::Storage;
use crate::error::StorageError;
use crate::models::{Entity, Kind};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Schema-qualified objects table, e.g. "hbnb.objects".
pub fn qualified_objects_table(schema: &str) -> String {
    format!("{}.objects", quote_ident(schema))
}

/// Create the schema and objects table if missing.
pub async fn ensure_storage_tables(pool: &PgPool, schema: &str) -> Result<(), StorageError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
        .execute(pool)
        .await?;
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            kind TEXT NOT NULL,
            id TEXT NOT NULL,
            payload JSONB NOT NULL,
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL,
            PRIMARY KEY (kind, id)
        )
        "#,
        qualified_objects_table(schema)
    );
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StorageError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| StorageError::InvalidUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
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

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StorageError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| StorageError::InvalidUrl("no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Writes go straight to the pool, so `save` has nothing left to commit.
#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
    table: String,
}

impl PgStorage {
    pub fn new(pool: PgPool, schema: String) -> Self {
        PgStorage {
            pool,
            table: qualified_objects_table(&schema),
        }
    }
}

fn decode(kind: Kind, id: &str, payload: serde_json::Value) -> Result<Entity, StorageError> {
    serde_json::from_value(payload).map_err(|e| StorageError::Corrupt {
        key: format!("{}.{}", kind, id),
        reason: e.to_string(),
    })
}

#[async_trait]
impl Storage for PgStorage {
    async fn get(&self, kind: Kind, id: &str) -> Result<Option<Entity>, StorageError> {
        let sql = format!("SELECT payload FROM {} WHERE kind = $1 AND id = $2", self.table);
        tracing::debug!(sql = %sql, kind = %kind, id = %id, "query");
        let row: Option<(serde_json::Value,)> = sqlx::query_as(&sql)
            .bind(kind.class_name())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|(payload,)| decode(kind, id, payload)).transpose()
    }

    async fn all(&self, kind: Kind) -> Result<Vec<Entity>, StorageError> {
        let sql = format!(
            "SELECT id, payload FROM {} WHERE kind = $1 ORDER BY created_at, id",
            self.table
        );
        tracing::debug!(sql = %sql, kind = %kind, "query");
        let rows: Vec<(String, serde_json::Value)> = sqlx::query_as(&sql)
            .bind(kind.class_name())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|(id, payload)| decode(kind, &id, payload))
            .collect()
    }

    async fn upsert(&self, entity: Entity) -> Result<(), StorageError> {
        let sql = format!(
            r#"
            INSERT INTO {} (kind, id, payload, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (kind, id)
            DO UPDATE SET payload = EXCLUDED.payload, updated_at = EXCLUDED.updated_at
            "#,
            self.table
        );
        let base = entity.base().clone();
        let payload = serde_json::to_value(&entity)?;
        tracing::debug!(kind = %entity.kind(), id = %base.id, "upsert");
        sqlx::query(&sql)
            .bind(entity.kind().class_name())
            .bind(&base.id)
            .bind(payload)
            .bind(base.created_at)
            .bind(base.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, kind: Kind, id: &str) -> Result<bool, StorageError> {
        let sql = format!("DELETE FROM {} WHERE kind = $1 AND id = $2", self.table);
        tracing::debug!(sql = %sql, kind = %kind, id = %id, "query");
        let result = sqlx::query(&sql)
            .bind(kind.class_name())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn save(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn count(&self, kind: Kind) -> Result<usize, StorageError> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE kind = $1", self.table);
        let (n,): (i64,) = sqlx::query_as(&sql)
            .bind(kind.class_name())
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(n).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_swaps_database_name() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/hbnb_dev?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "hbnb_dev");
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(qualified_objects_table("hbnb"), "\"hbnb\".objects");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
