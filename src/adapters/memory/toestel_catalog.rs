use crate::domain::{
    toestel::{ListingFilter, Toestel},
    value_objects::{ToestelId, UserId},
};
use crate::ports::toestel_catalog::{Result, ToestelCatalog as ToestelCatalogTrait};
use async_trait::async_trait;

use super::SharedTables;

/// In-memory implementation of ToestelCatalog
///
/// Used by tests and for running the API without a database.
/// A `RentalStore` built with `RentalStore::new(&catalog)` shares its tables.
#[derive(Default)]
pub struct ToestelCatalog {
    pub(super) tables: SharedTables,
}

impl ToestelCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut toestellen: Vec<Toestel>) -> Vec<Toestel> {
    toestellen.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    toestellen
}

#[async_trait]
impl ToestelCatalogTrait for ToestelCatalog {
    async fn save(&self, toestel: Toestel) -> Result<()> {
        self.tables
            .lock()?
            .toestellen
            .insert(toestel.toestel_id, toestel);
        Ok(())
    }

    async fn get_by_id(&self, toestel_id: ToestelId) -> Result<Option<Toestel>> {
        Ok(self.tables.lock()?.toestellen.get(&toestel_id).cloned())
    }

    /// Newest listings first, same ordering as the PostgreSQL adapter
    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Toestel>> {
        let tables = self.tables.lock()?;
        Ok(newest_first(
            tables
                .toestellen
                .values()
                .filter(|t| filter.matches(t))
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Toestel>> {
        let tables = self.tables.lock()?;
        Ok(newest_first(
            tables
                .toestellen
                .values()
                .filter(|t| t.owner_id == owner_id)
                .cloned()
                .collect(),
        ))
    }

    /// Removes the toestel and its rentals, like the `ON DELETE CASCADE` foreign key
    async fn delete(&self, toestel_id: ToestelId) -> Result<bool> {
        let mut tables = self.tables.lock()?;
        if tables.toestellen.remove(&toestel_id).is_none() {
            return Ok(false);
        }
        tables.rentals.retain(|_, r| r.toestel_id != toestel_id);
        Ok(true)
    }
}
