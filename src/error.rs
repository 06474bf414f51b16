//! Tipos de error de seatplan.

use thiserror::Error;

/// Alias de `Result` para las operaciones de seatplan.
pub type Result<T> = std::result::Result<T, SeatingError>;

#[derive(Error, Debug)]
pub enum SeatingError {
    /// Nombre o dimensiones de sala inválidos.
    #[error("invalid classroom: {0}")]
    InvalidClassroom(String),

    #[error("classroom '{0}' already exists")]
    DuplicateClassroom(String),

    #[error("classroom '{0}' not found")]
    ClassroomNotFound(String),

    /// A la hoja le faltan columnas obligatorias del encabezado.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    #[error("no roster loaded")]
    RosterNotLoaded,

    #[error("no seating plan has been generated")]
    NoPlan,

    #[error("seat ({row}, {col}) is outside classroom '{classroom}'")]
    SeatOutOfRange { classroom: String, row: usize, col: usize },

    /// Ruta de exportación fuera del directorio configurado.
    #[error("invalid export path '{0}': must be relative and stay inside the export directory")]
    InvalidExportPath(String),

    /// No se pudo abrir o leer el libro.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[error("export failed: {0}")]
    Export(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SeatingError {
    /// Verdadero si el fallo viene de la entrada del usuario (no de E/S).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SeatingError::InvalidClassroom(_)
                | SeatingError::DuplicateClassroom(_)
                | SeatingError::MissingColumns(_)
                | SeatingError::InvalidRoster(_)
                | SeatingError::RosterNotLoaded
                | SeatingError::NoPlan
                | SeatingError::SeatOutOfRange { .. }
                | SeatingError::InvalidExportPath(_)
        )
    }
}
