pub mod rental_store;
pub mod toestel_catalog;

pub use rental_store::{InsertOutcome, RentalStore};
pub use toestel_catalog::ToestelCatalog;
