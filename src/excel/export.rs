use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{Result, SeatingError};
use crate::models::SeatingPlan;

const MAX_SHEET_NAME: usize = 31;

/// Excel limita los nombres de hoja a 31 caracteres y prohíbe algunos símbolos.
pub fn sheet_name_for(classroom: &str) -> String {
    let cleaned: String = classroom
        .chars()
        .map(|c| if matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\') { '_' } else { c })
        .take(MAX_SHEET_NAME)
        .collect();
    if cleaned.trim().is_empty() { "Sheet".to_string() } else { cleaned }
}

/// Nombres de hoja para cada sala, en orden y sin repetir.
/// Excel compara nombres sin distinguir mayúsculas; un choque recibe el
/// sufijo `~2`, `~3`... recortando la base para no pasar de 31 caracteres.
pub fn unique_sheet_names<'a, I>(classrooms: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut used: HashSet<String> = HashSet::new();
    let mut names = Vec::new();
    for classroom in classrooms {
        let base = sheet_name_for(classroom);
        let mut candidate = base.clone();
        let mut n = 2;
        while !used.insert(candidate.to_lowercase()) {
            let suffix = format!("~{}", n);
            let keep = MAX_SHEET_NAME - suffix.chars().count();
            candidate = base.chars().take(keep).collect::<String>() + &suffix;
            n += 1;
        }
        names.push(candidate);
    }
    names
}

/// Escribe el plan en un .xlsx: una hoja por sala, sin encabezado.
/// La celda (r, c) contiene la matrícula o queda vacía.
pub fn export_seating_plan<P: AsRef<Path>>(plan: &SeatingPlan, path: P) -> Result<()> {
    if plan.is_empty() {
        return Err(SeatingError::Export("seating plan has no classrooms".to_string()));
    }
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }

    let sheet_names = unique_sheet_names(plan.iter().map(|(name, _)| name));
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    for ((classroom, grid), sheet_name) in plan.iter().zip(sheet_names) {
        let sheet = book
            .new_sheet(sheet_name)
            .map_err(|e| SeatingError::Export(format!("sheet '{}': {}", classroom, e)))?;
        for (r, row) in grid.cells().iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if let Some(enrollment) = cell {
                    // umya usa coordenadas (col, row) base 1
                    sheet.get_cell_mut((c as u32 + 1, r as u32 + 1)).set_value(enrollment.as_str());
                }
            }
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, path).map_err(|e| SeatingError::Export(e.to_string()))?;
    info!(path = %path.display(), classrooms = plan.len(), "seating plan exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_names_are_sanitized() {
        assert_eq!(sheet_name_for("Lab 1/2"), "Lab 1_2");
        assert_eq!(sheet_name_for(&"x".repeat(40)).len(), 31);
        assert_eq!(sheet_name_for("   "), "Sheet");
    }

    #[test]
    fn colliding_sheet_names_get_a_suffix() {
        let long_a = format!("{}A", "Edificio Central ".repeat(2));
        let long_b = format!("{}B", "Edificio Central ".repeat(2));
        let names = unique_sheet_names(["Lab A/1", "Lab A_1", "lab a_1", long_a.as_str(), long_b.as_str()]);
        assert_eq!(names[0], "Lab A_1");
        assert_eq!(names[1], "Lab A_1~2");
        assert_eq!(names[2], "lab a_1~3");
        assert_eq!(names[3].chars().count(), 31);
        assert_eq!(names[4].chars().count(), 31);
        assert!(names[4].ends_with("~2"));
        let lowered: HashSet<String> = names.iter().map(|n| n.to_lowercase()).collect();
        assert_eq!(lowered.len(), names.len());
    }

    #[test]
    fn export_handles_rooms_with_clashing_sheet_names() {
        use crate::models::{ClassroomSeating, SeatingGrid};
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.xlsx");
        let plan = SeatingPlan {
            classrooms: vec![
                ClassroomSeating { classroom: "Lab A/1".to_string(), grid: SeatingGrid::empty(1, 1) },
                ClassroomSeating { classroom: "Lab A_1".to_string(), grid: SeatingGrid::empty(1, 1) },
            ],
        };
        export_seating_plan(&plan, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn empty_plan_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_seating_plan(&SeatingPlan::default(), dir.path().join("x.xlsx")).unwrap_err();
        assert!(matches!(err, SeatingError::Export(_)));
    }
}
