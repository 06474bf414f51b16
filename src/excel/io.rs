use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

use crate::error::{Result, SeatingError};

/// Texto de una celda de calamine, ya recortado.
/// Un flotante sin parte decimal se muestra como entero (2.0 -> "2"), así el
/// año leído de Excel agrupa igual que el escrito a mano.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_owned(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(d) => d.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_owned(),
        Data::Empty | Data::Error(_) => String::new(),
    }
}

/// Clave de comparación de encabezados: sin espacios y en minúsculas.
pub fn normalize_header(raw: &str) -> String {
    raw.split_whitespace().flat_map(str::chars).flat_map(char::to_lowercase).collect()
}

/// Lee la primera hoja del libro como filas de texto.
pub fn read_first_sheet<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)?;
    let Some(first) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };
    let range = workbook.worksheet_range(&first)?;
    Ok(range.rows().map(|r| r.iter().map(cell_to_string).collect()).collect())
}

/// Posición de cada columna requerida dentro del encabezado.
/// Falla listando todas las columnas que faltan.
pub fn column_positions(header: &[String], required: &[&str]) -> Result<Vec<usize>> {
    let normalized: Vec<String> = header.iter().map(|h| normalize_header(h)).collect();
    let mut positions = Vec::with_capacity(required.len());
    let mut missing = Vec::new();
    for name in required {
        match normalized.iter().position(|h| *h == normalize_header(name)) {
            Some(i) => positions.push(i),
            None => missing.push(name.to_string()),
        }
    }
    if missing.is_empty() { Ok(positions) } else { Err(SeatingError::MissingColumns(missing)) }
}

/// Celda `i` de la fila, vacía si la fila es más corta.
pub fn field(row: &[String], i: usize) -> &str {
    row.get(i).map(|s| s.as_str()).unwrap_or("")
}

pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_cells_drop_trailing_zero() {
        assert_eq!(cell_to_string(&Data::Float(2.0)), "2");
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&Data::String("  CS ".to_string())), "CS");
        assert_eq!(cell_to_string(&Data::Float(1e19)), "10000000000000000000");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn header_key_drops_inner_spaces() {
        assert_eq!(normalize_header(" Student  Name\t"), "studentname");
        assert_eq!(normalize_header("ROWS"), "rows");
    }

    #[test]
    fn header_matching_ignores_case_and_spaces() {
        let header: Vec<String> = vec!["Name".into(), " enrollment ".into(), "BRANCH".into(), "Year".into()];
        assert_eq!(column_positions(&header, &["Enrollment", "Name", "Year", "Branch"]).unwrap(), vec![1, 0, 3, 2]);
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let header: Vec<String> = vec!["Name".into()];
        match column_positions(&header, &["Enrollment", "Name", "Year"]) {
            Err(SeatingError::MissingColumns(cols)) => assert_eq!(cols, vec!["Enrollment", "Year"]),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
