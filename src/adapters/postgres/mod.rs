pub mod reservation_repository;
pub mod room_repository;

// パブリックに型を再エクスポート
pub use reservation_repository::ReservationRepository as PostgresReservationRepository;
pub use room_repository::RoomRepository as PostgresRoomRepository;
