// Estructuras de datos principales
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, SeatingError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub enrollment: String,
    pub name: String,
    pub year: String,
    pub branch: String,
}

impl Student {
    pub fn new(enrollment: &str, name: &str, year: &str, branch: &str) -> Self {
        Student {
            enrollment: enrollment.to_string(),
            name: name.to_string(),
            year: year.to_string(),
            branch: branch.to_string(),
        }
    }

    /// Clave de agrupación (year, branch).
    pub fn group_key(&self) -> (&str, &str) {
        (self.year.as_str(), self.branch.as_str())
    }

    pub fn info(&self) -> StudentInfo {
        StudentInfo {
            name: self.name.clone(),
            branch: self.branch.clone(),
            year: self.year.clone(),
        }
    }
}

/// Lo que muestran la inspección de asiento y la búsqueda de un estudiante.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentInfo {
    pub name: String,
    pub branch: String,
    pub year: String,
}

impl fmt::Display for StudentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}\nBranch: {}\nYear: {}", self.name, self.branch, self.year)
    }
}

/// Roster ordenado de estudiantes, indexado por matrícula.
///
/// Se construye todo o nada: una matrícula vacía o repetida rechaza el
/// roster completo.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    students: Vec<Student>,
    index: HashMap<String, usize>,
}

impl Roster {
    pub fn new(mut students: Vec<Student>) -> Result<Self> {
        let mut index = HashMap::with_capacity(students.len());
        for (i, s) in students.iter_mut().enumerate() {
            // la matrícula se guarda sin espacios: es la clave de búsqueda
            s.enrollment = s.enrollment.trim().to_string();
            if s.enrollment.is_empty() {
                return Err(SeatingError::InvalidRoster(format!("row {} has an empty enrollment", i + 1)));
            }
            if index.insert(s.enrollment.clone(), i).is_some() {
                return Err(SeatingError::InvalidRoster(format!("duplicate enrollment '{}'", s.enrollment)));
            }
        }
        Ok(Roster { students, index })
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn get(&self, enrollment: &str) -> Option<&Student> {
        self.index.get(enrollment).map(|&i| &self.students[i])
    }
}

/// Máximo de filas o columnas por sala.
pub const MAX_DIMENSION: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassroomSpec {
    pub name: String,
    pub rows: usize,
    pub cols: usize,
}

impl ClassroomSpec {
    /// Valida nombre y dimensiones antes de construir la sala.
    pub fn new(name: &str, rows: i64, cols: i64) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SeatingError::InvalidClassroom("classroom name is required".to_string()));
        }
        if rows <= 0 || cols <= 0 {
            return Err(SeatingError::InvalidClassroom(format!(
                "'{}' must have positive rows and cols (got {}x{})",
                name, rows, cols
            )));
        }
        if rows > MAX_DIMENSION || cols > MAX_DIMENSION {
            return Err(SeatingError::InvalidClassroom(format!(
                "'{}' exceeds {} rows or cols (got {}x{})",
                name, MAX_DIMENSION, rows, cols
            )));
        }
        Ok(ClassroomSpec { name: name.to_string(), rows: rows as usize, cols: cols as usize })
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }
}

impl fmt::Display for ClassroomSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}x{}", self.name, self.rows, self.cols)
    }
}

/// Matriz rows x cols de matrículas; `None` es un asiento vacío.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatingGrid {
    cells: Vec<Vec<Option<String>>>,
}

impl SeatingGrid {
    pub fn empty(rows: usize, cols: usize) -> Self {
        SeatingGrid { cells: vec![vec![None; cols]; rows] }
    }

    pub fn from_cells(cells: Vec<Vec<Option<String>>>) -> Self {
        SeatingGrid { cells }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn get(&self, r: usize, c: usize) -> Option<&str> {
        self.cells.get(r).and_then(|row| row.get(c)).and_then(|cell| cell.as_deref())
    }

    pub(crate) fn place(&mut self, r: usize, c: usize, enrollment: &str) {
        self.cells[r][c] = Some(enrollment.to_string());
    }

    pub fn cells(&self) -> &[Vec<Option<String>>] {
        &self.cells
    }

    pub fn occupied(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().flatten().filter_map(|c| c.as_deref())
    }

    pub fn seated_count(&self) -> usize {
        self.occupied().count()
    }
}

impl fmt::Display for SeatingGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            writeln!(f, "Row {}:", r + 1)?;
            let labels: Vec<&str> = row.iter().map(|c| c.as_deref().unwrap_or("Empty")).collect();
            writeln!(f, "  {}", labels.join(" | "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassroomSeating {
    pub classroom: String,
    pub grid: SeatingGrid,
}

/// Grillas en el orden del registro, buscadas por nombre de sala.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeatingPlan {
    pub classrooms: Vec<ClassroomSeating>,
}

impl SeatingPlan {
    pub fn get(&self, classroom: &str) -> Option<&SeatingGrid> {
        self.classrooms.iter().find(|c| c.classroom == classroom).map(|c| &c.grid)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SeatingGrid)> {
        self.classrooms.iter().map(|c| (c.classroom.as_str(), &c.grid))
    }

    pub fn len(&self) -> usize {
        self.classrooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classrooms.is_empty()
    }

    /// Sub-plan con una sola sala, para exportar una sala suelta.
    pub fn only(&self, classroom: &str) -> Option<SeatingPlan> {
        self.classrooms
            .iter()
            .find(|c| c.classroom == classroom)
            .map(|c| SeatingPlan { classrooms: vec![c.clone()] })
    }
}

/// Resultado de inspeccionar un asiento.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeatLookup {
    Empty,
    Occupied { enrollment: String, student: StudentInfo },
    Unknown { enrollment: String },
}
