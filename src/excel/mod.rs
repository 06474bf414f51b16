//! Módulo `excel`: adaptadores entre los libros .xlsx y el modelo en memoria.
//!
//! Submódulos:
//! - `io`: helpers para lectura/parseo de celdas y encabezados
//! - `roster`: lectura del roster de estudiantes
//! - `classrooms`: lectura del registro de salas
//! - `export`: escritura del plan de asientos

/// Helpers de IO y utilidades para parsing de Excel
pub mod io;

/// Lectura del roster: `load_roster_excel`
mod roster;

/// Lectura de salas: `load_classrooms_excel`
mod classrooms;

/// Exportación del plan: `export_seating_plan`
mod export;

pub use classrooms::{CLASSROOM_COLUMNS, classrooms_from_rows, load_classrooms_excel};
pub use export::{export_seating_plan, sheet_name_for, unique_sheet_names};
pub use roster::{ROSTER_COLUMNS, load_roster_excel, roster_from_rows};
