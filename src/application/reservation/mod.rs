mod availability;
mod errors;
mod reservation_service;

pub use availability::{check_room_availability, list_available_rooms};
pub use errors::{ErrorCategory, ReservationApplicationError, Result};
pub use reservation_service::{
    ServiceDependencies, cancel_reservation, get_reservation, make_reservation,
};
