pub mod availability;
pub mod commands;
pub mod errors;
pub mod events;
pub mod rental;
pub mod selection;
pub mod toestel;
pub mod value_objects;

pub use errors::*;
pub use events::*;
pub use value_objects::*;
