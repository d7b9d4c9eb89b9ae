use crate::domain::{
    toestel::{ListingFilter, Toestel},
    value_objects::{Category, ToestelId, UserId},
};
use crate::ports::toestel_catalog::{Result, ToestelCatalog as ToestelCatalogTrait};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

use super::date_range_from_columns;

const SELECT_TOESTEL: &str = r#"
    SELECT
        toestel_id,
        owner_id,
        name,
        description,
        price,
        price_unit,
        category,
        photo_url,
        availability_start,
        availability_end,
        created_at,
        updated_at
    FROM toestellen
"#;

/// Convert a PostgreSQL row into a Toestel
fn map_row_to_toestel(row: &PgRow) -> Result<Toestel> {
    let category_str: &str = row.get("category");
    let category = Category::from_str(category_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(Toestel {
        toestel_id: ToestelId::from_uuid(row.get("toestel_id")),
        owner_id: UserId::from_uuid(row.get("owner_id")),
        name: row.get("name"),
        description: row.get("description"),
        price: row.get("price"),
        price_unit: row.get("price_unit"),
        category,
        photo_url: row.get("photo_url"),
        availability: date_range_from_columns(
            row.get("availability_start"),
            row.get("availability_end"),
        )?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// Escape LIKE wildcards so the query is matched as a plain substring
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// PostgreSQL implementation of ToestelCatalog
pub struct ToestelCatalog {
    pool: PgPool,
}

impl ToestelCatalog {
    /// Create a new ToestelCatalog with a PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ToestelCatalogTrait for ToestelCatalog {
    /// Upsert the full toestel state
    async fn save(&self, toestel: Toestel) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO toestellen (
                toestel_id,
                owner_id,
                name,
                description,
                price,
                price_unit,
                category,
                photo_url,
                availability_start,
                availability_end,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (toestel_id)
            DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                price_unit = EXCLUDED.price_unit,
                category = EXCLUDED.category,
                photo_url = EXCLUDED.photo_url,
                availability_start = EXCLUDED.availability_start,
                availability_end = EXCLUDED.availability_end,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(toestel.toestel_id.value())
        .bind(toestel.owner_id.value())
        .bind(&toestel.name)
        .bind(&toestel.description)
        .bind(toestel.price)
        .bind(&toestel.price_unit)
        .bind(toestel.category.as_str())
        .bind(&toestel.photo_url)
        .bind(toestel.availability.start())
        .bind(toestel.availability.end())
        .bind(toestel.created_at)
        .bind(toestel.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, toestel_id: ToestelId) -> Result<Option<Toestel>> {
        let row = sqlx::query(&format!("{SELECT_TOESTEL} WHERE toestel_id = $1"))
            .bind(toestel_id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row_to_toestel).transpose()
    }

    /// Case-insensitive substring match on name or description, optional category
    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Toestel>> {
        let pattern = filter
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(like_pattern);

        let rows = sqlx::query(&format!(
            r#"{SELECT_TOESTEL}
            WHERE ($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1)
              AND ($2::text IS NULL OR category = $2)
            ORDER BY created_at DESC
            "#
        ))
        .bind(pattern)
        .bind(filter.category.map(|c| c.as_str()))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_toestel).collect()
    }

    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Toestel>> {
        let rows = sqlx::query(&format!(
            "{SELECT_TOESTEL} WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_toestel).collect()
    }

    /// Rentals of the toestel go with it through `ON DELETE CASCADE`
    async fn delete(&self, toestel_id: ToestelId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM toestellen WHERE toestel_id = $1")
            .bind(toestel_id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("boor"), "%boor%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
