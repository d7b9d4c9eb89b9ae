mod catalog_service;
mod errors;
mod rental_service;

pub use catalog_service::{
    delete_toestel, get_toestel, register_toestel, search_toestellen, toestellen_for_owner,
    update_availability, update_toestel,
};
pub use errors::{RentalApplicationError, Result};
pub use rental_service::{
    AvailabilityReport, MAX_AVAILABILITY_QUERY_DAYS, ServiceDependencies, cancel_rental,
    check_availability, rent_toestel, rentals_for_renter, rentals_for_toestel,
};
