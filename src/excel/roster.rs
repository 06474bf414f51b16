use std::path::Path;
use tracing::info;

use crate::error::{Result, SeatingError};
use crate::excel::io::{column_positions, field, is_blank_row, read_first_sheet};
use crate::models::{Roster, Student};

pub const ROSTER_COLUMNS: [&str; 4] = ["Enrollment", "Name", "Year", "Branch"];

/// Lee el roster de estudiantes desde la primera hoja del libro.
///
/// La fila 0 es el encabezado; las filas en blanco se ignoran. Cualquier
/// error descarta el roster completo.
pub fn load_roster_excel<P: AsRef<Path>>(path: P) -> Result<Roster> {
    let rows = read_first_sheet(&path)?;
    let roster = roster_from_rows(&rows)?;
    info!(path = %path.as_ref().display(), students = roster.len(), "roster read");
    Ok(roster)
}

/// Construye el roster a partir de filas ya leídas (encabezado incluido).
pub fn roster_from_rows(rows: &[Vec<String>]) -> Result<Roster> {
    let Some((header, body)) = rows.split_first() else {
        return Err(SeatingError::MissingColumns(ROSTER_COLUMNS.iter().map(|c| c.to_string()).collect()));
    };
    let pos = column_positions(header, &ROSTER_COLUMNS)?;

    let mut students = Vec::with_capacity(body.len());
    for (i, row) in body.iter().enumerate() {
        if is_blank_row(row) {
            continue;
        }
        let enrollment = field(row, pos[0]).trim();
        if enrollment.is_empty() {
            return Err(SeatingError::InvalidRoster(format!("row {} has no enrollment", i + 2)));
        }
        students.push(Student::new(enrollment, field(row, pos[1]).trim(), field(row, pos[2]).trim(), field(row, pos[3]).trim()));
    }
    Roster::new(students)
}
