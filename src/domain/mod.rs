pub mod commands;
pub mod date_range;
pub mod errors;
pub mod queries;
pub mod reservation;
pub mod value_objects;

pub use date_range::*;
pub use errors::*;
pub use reservation::{NewReservation, Reservation, ReservationStatus, Room};
pub use value_objects::*;
