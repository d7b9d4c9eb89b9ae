use crate::domain::{
    RentToestelError,
    rental::{self, Rental},
    value_objects::{DateRange, RentalId, ToestelId, UserId},
};
use crate::ports::rental_store::{InsertOutcome, RentalStore as RentalStoreTrait, Result};
use async_trait::async_trait;

use super::{SharedTables, toestel_catalog::ToestelCatalog};

/// In-memory implementation of RentalStore
///
/// Shares its tables with the catalog it was created from. The window read,
/// the overlap check and the insert in `insert_if_available` happen under the
/// lock that also guards catalog writes.
pub struct RentalStore {
    tables: SharedTables,
}

impl RentalStore {
    pub fn new(catalog: &ToestelCatalog) -> Self {
        Self {
            tables: catalog.tables.clone(),
        }
    }

    fn sorted(mut rentals: Vec<Rental>) -> Vec<Rental> {
        rentals.sort_by_key(|r| (r.period.start(), r.created_at));
        rentals
    }
}

#[async_trait]
impl RentalStoreTrait for RentalStore {
    async fn find_by_toestel(&self, toestel_id: ToestelId) -> Result<Vec<Rental>> {
        let tables = self.tables.lock()?;
        Ok(Self::sorted(
            tables
                .rentals
                .values()
                .filter(|r| r.toestel_id == toestel_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_renter(&self, renter_id: UserId) -> Result<Vec<Rental>> {
        let tables = self.tables.lock()?;
        Ok(Self::sorted(
            tables
                .rentals
                .values()
                .filter(|r| r.renter_id == renter_id)
                .cloned()
                .collect(),
        ))
    }

    async fn get_by_id(&self, rental_id: RentalId) -> Result<Option<Rental>> {
        Ok(self.tables.lock()?.rentals.get(&rental_id).cloned())
    }

    async fn insert_if_available(&self, rental: Rental) -> Result<InsertOutcome> {
        let mut tables = self.tables.lock()?;

        let Some(window) = tables
            .toestellen
            .get(&rental.toestel_id)
            .map(|t| t.availability)
        else {
            return Ok(InsertOutcome::ToestelMissing);
        };

        let booked: Vec<DateRange> = tables
            .rentals
            .values()
            .filter(|r| r.toestel_id == rental.toestel_id)
            .map(|r| r.period)
            .collect();

        match rental::check_period(&rental.period, &window, &booked) {
            Ok(()) => {
                tables.rentals.insert(rental.rental_id, rental);
                Ok(InsertOutcome::Inserted)
            }
            Err(RentToestelError::AlreadyBooked { conflicts }) => {
                Ok(InsertOutcome::Conflict(conflicts))
            }
            Err(_) => Ok(InsertOutcome::OutsideAvailabilityWindow { window }),
        }
    }

    async fn delete(&self, rental_id: RentalId) -> Result<bool> {
        Ok(self.tables.lock()?.rentals.remove(&rental_id).is_some())
    }
}
