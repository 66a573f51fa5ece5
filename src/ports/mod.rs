pub mod reservation_repository;
pub mod room_repository;

pub use reservation_repository::{CancelOutcome, InsertOutcome, ReservationRepository};
pub use room_repository::RoomRepository;
