// Biblioteca raíz del crate `seatplan`.
// Reexporta los módulos principales: algoritmo de asignación, sesión,
// adaptadores Excel y la API HTTP.
pub mod algorithm;
pub mod config;
pub mod error;
pub mod excel;
pub mod models;
pub mod server;
pub mod session;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;

pub use config::AppConfig;
pub use error::{Result, SeatingError};
pub use models::{ClassroomSpec, Roster, SeatLookup, SeatingGrid, SeatingPlan, Student, StudentInfo};
pub use session::Session;
