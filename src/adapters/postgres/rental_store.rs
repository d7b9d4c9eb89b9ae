use crate::domain::{
    RentToestelError,
    rental::{self, Rental},
    value_objects::{DateRange, RentalId, ToestelId, UserId},
};
use crate::ports::rental_store::{InsertOutcome, RentalStore as RentalStoreTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::date_range_from_columns;

fn map_row_to_rental(row: &PgRow) -> Result<Rental> {
    Ok(Rental {
        rental_id: RentalId::from_uuid(row.get("rental_id")),
        toestel_id: ToestelId::from_uuid(row.get("toestel_id")),
        renter_id: UserId::from_uuid(row.get("renter_id")),
        period: date_range_from_columns(row.get("start_date"), row.get("end_date"))?,
        created_at: row.get("created_at"),
    })
}

/// PostgreSQL implementation of RentalStore
///
/// `insert_if_available` locks the toestel row for the duration of the
/// transaction and checks against the window stored in that row. Concurrent
/// bookings and window edits of the same toestel wait for the lock.
pub struct RentalStore {
    pool: PgPool,
}

impl RentalStore {
    /// Create a new RentalStore with a PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalStoreTrait for RentalStore {
    async fn find_by_toestel(&self, toestel_id: ToestelId) -> Result<Vec<Rental>> {
        let rows = sqlx::query(
            r#"
            SELECT rental_id, toestel_id, renter_id, start_date, end_date, created_at
            FROM rentals
            WHERE toestel_id = $1
            ORDER BY start_date, created_at
            "#,
        )
        .bind(toestel_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_rental).collect()
    }

    async fn find_by_renter(&self, renter_id: UserId) -> Result<Vec<Rental>> {
        let rows = sqlx::query(
            r#"
            SELECT rental_id, toestel_id, renter_id, start_date, end_date, created_at
            FROM rentals
            WHERE renter_id = $1
            ORDER BY start_date, created_at
            "#,
        )
        .bind(renter_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_rental).collect()
    }

    async fn get_by_id(&self, rental_id: RentalId) -> Result<Option<Rental>> {
        let row = sqlx::query(
            r#"
            SELECT rental_id, toestel_id, renter_id, start_date, end_date, created_at
            FROM rentals
            WHERE rental_id = $1
            "#,
        )
        .bind(rental_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_rental).transpose()
    }

    /// Check-and-insert inside one transaction
    ///
    /// 1. Lock the toestel row (`FOR UPDATE`) and read its current window
    /// 2. Load the rentals overlapping the requested period
    /// 3. Re-run the domain period check and insert only if it passes
    async fn insert_if_available(&self, rental: Rental) -> Result<InsertOutcome> {
        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query(
            r#"
            SELECT availability_start, availability_end
            FROM toestellen
            WHERE toestel_id = $1
            FOR UPDATE
            "#,
        )
        .bind(rental.toestel_id.value())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(locked) = locked else {
            tx.rollback().await?;
            return Ok(InsertOutcome::ToestelMissing);
        };
        let window = date_range_from_columns(
            locked.get("availability_start"),
            locked.get("availability_end"),
        )?;

        let rows = sqlx::query(
            r#"
            SELECT start_date, end_date
            FROM rentals
            WHERE toestel_id = $1
              AND start_date <= $3
              AND end_date >= $2
            "#,
        )
        .bind(rental.toestel_id.value())
        .bind(rental.period.start())
        .bind(rental.period.end())
        .fetch_all(&mut *tx)
        .await?;

        let booked = rows
            .iter()
            .map(|row| date_range_from_columns(row.get("start_date"), row.get("end_date")))
            .collect::<Result<Vec<DateRange>>>()?;

        match rental::check_period(&rental.period, &window, &booked) {
            Ok(()) => {}
            Err(RentToestelError::AlreadyBooked { conflicts }) => {
                tx.rollback().await?;
                return Ok(InsertOutcome::Conflict(conflicts));
            }
            Err(_) => {
                tx.rollback().await?;
                return Ok(InsertOutcome::OutsideAvailabilityWindow { window });
            }
        }

        sqlx::query(
            r#"
            INSERT INTO rentals (rental_id, toestel_id, renter_id, start_date, end_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(rental.rental_id.value())
        .bind(rental.toestel_id.value())
        .bind(rental.renter_id.value())
        .bind(rental.period.start())
        .bind(rental.period.end())
        .bind(rental.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            rental_id = %rental.rental_id.value(),
            "rental inserted after availability re-check"
        );

        Ok(InsertOutcome::Inserted)
    }

    async fn delete(&self, rental_id: RentalId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM rentals WHERE rental_id = $1")
            .bind(rental_id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
