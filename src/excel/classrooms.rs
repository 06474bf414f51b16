use std::path::Path;
use tracing::info;

use crate::error::{Result, SeatingError};
use crate::excel::io::{column_positions, field, is_blank_row, read_first_sheet};
use crate::models::ClassroomSpec;
use crate::session::parse_dimension;

pub const CLASSROOM_COLUMNS: [&str; 3] = ["Classroom", "Rows", "Cols"];

/// Lee la hoja de salas (Classroom, Rows, Cols).
///
/// Devuelve las salas validadas en orden; si alguna fila es inválida no se
/// devuelve ninguna.
pub fn load_classrooms_excel<P: AsRef<Path>>(path: P) -> Result<Vec<ClassroomSpec>> {
    let rows = read_first_sheet(&path)?;
    let specs = classrooms_from_rows(&rows)?;
    info!(path = %path.as_ref().display(), classrooms = specs.len(), "classroom sheet read");
    Ok(specs)
}

pub fn classrooms_from_rows(rows: &[Vec<String>]) -> Result<Vec<ClassroomSpec>> {
    let Some((header, body)) = rows.split_first() else {
        return Err(SeatingError::MissingColumns(CLASSROOM_COLUMNS.iter().map(|c| c.to_string()).collect()));
    };
    let pos = column_positions(header, &CLASSROOM_COLUMNS)?;

    body.iter()
        .filter(|row| !is_blank_row(row))
        .map(|row| {
            let rows = parse_dimension("Rows", field(row, pos[1]))?;
            let cols = parse_dimension("Cols", field(row, pos[2]))?;
            ClassroomSpec::new(field(row, pos[0]), rows, cols)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn reads_classrooms() {
        let rows = vec![row(&["Classroom", "Rows", "Cols"]), row(&["A101", "5", "6"]), row(&["B2", "3", "4"])];
        let specs = classrooms_from_rows(&rows).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].capacity(), 30);
        assert_eq!(specs[1].to_string(), "B2 - 3x4");
    }

    #[test]
    fn rejects_bad_dimensions() {
        let zero = vec![row(&["Classroom", "Rows", "Cols"]), row(&["A101", "0", "6"])];
        assert!(matches!(classrooms_from_rows(&zero), Err(SeatingError::InvalidClassroom(_))));
        let text = vec![row(&["Classroom", "Rows", "Cols"]), row(&["A101", "five", "6"])];
        assert!(classrooms_from_rows(&text).is_err());
        let cols = vec![row(&["Room", "Rows", "Cols"])];
        assert!(matches!(classrooms_from_rows(&cols), Err(SeatingError::MissingColumns(_))));
    }
}
