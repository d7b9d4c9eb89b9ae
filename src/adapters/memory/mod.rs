pub mod rental_store;
pub mod toestel_catalog;

// パブリックに型を再エクスポート
pub use rental_store::RentalStore as InMemoryRentalStore;
pub use toestel_catalog::ToestelCatalog as InMemoryToestelCatalog;

use crate::domain::{
    rental::Rental,
    toestel::Toestel,
    value_objects::{RentalId, ToestelId},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Both in-memory adapters read and write the same tables under one lock
#[derive(Default)]
struct Tables {
    toestellen: HashMap<ToestelId, Toestel>,
    rentals: HashMap<RentalId, Rental>,
}

#[derive(Clone, Default)]
struct SharedTables(Arc<Mutex<Tables>>);

impl SharedTables {
    fn lock(&self) -> Result<MutexGuard<'_, Tables>, Box<dyn std::error::Error + Send + Sync>> {
        self.0.lock().map_err(|e| e.to_string().into())
    }
}
