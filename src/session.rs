//! Contexto de planificación, propiedad del llamador.
//!
//! Una `Session` guarda el registro de salas, el roster cargado y el último
//! plan. Todo cambio pasa por los métodos de abajo; una operación fallida
//! deja la sesión tal como estaba.

use rand::Rng;
use tracing::{info, warn};

use crate::algorithm::create_seating_plan;
use crate::error::{Result, SeatingError};
use crate::models::{ClassroomSpec, Roster, SeatLookup, SeatingPlan, StudentInfo};

#[derive(Debug, Default)]
pub struct Session {
    classrooms: Vec<ClassroomSpec>,
    roster: Option<Roster>,
    plan: Option<SeatingPlan>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classrooms(&self) -> &[ClassroomSpec] {
        &self.classrooms
    }

    pub fn classroom(&self, name: &str) -> Option<&ClassroomSpec> {
        self.classrooms.iter().find(|c| c.name == name)
    }

    /// Alta manual: los nombres repetidos se rechazan.
    pub fn add_classroom(&mut self, name: &str, rows: i64, cols: i64) -> Result<&ClassroomSpec> {
        let spec = ClassroomSpec::new(name, rows, cols)?;
        if self.classroom(&spec.name).is_some() {
            warn!(classroom = %spec.name, "duplicate classroom rejected");
            return Err(SeatingError::DuplicateClassroom(spec.name));
        }
        info!(classroom = %spec, "classroom added");
        self.classrooms.push(spec);
        Ok(&self.classrooms[self.classrooms.len() - 1])
    }

    /// Alta manual desde campos de texto.
    pub fn add_classroom_from_input(&mut self, name: &str, rows: &str, cols: &str) -> Result<&ClassroomSpec> {
        let rows = parse_dimension("rows", rows)?;
        let cols = parse_dimension("cols", cols)?;
        self.add_classroom(name, rows, cols)
    }

    pub fn delete_classroom(&mut self, name: &str) -> Result<ClassroomSpec> {
        let pos = self
            .classrooms
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| SeatingError::ClassroomNotFound(name.to_string()))?;
        let removed = self.classrooms.remove(pos);
        info!(classroom = %removed, "classroom deleted");
        Ok(removed)
    }

    /// Carga masiva de salas ya validadas; un nombre existente se reemplaza
    /// en su lugar y los nuevos se agregan en orden.
    pub fn load_classrooms(&mut self, records: Vec<ClassroomSpec>) -> usize {
        let count = records.len();
        for spec in records {
            match self.classrooms.iter_mut().find(|c| c.name == spec.name) {
                Some(existing) => *existing = spec,
                None => self.classrooms.push(spec),
            }
        }
        info!(loaded = count, total = self.classrooms.len(), "classrooms loaded");
        count
    }

    /// Carga masiva desde filas (name, rows, cols) en texto; no cambia nada
    /// salvo que todas las filas sean válidas.
    pub fn load_classroom_rows(&mut self, rows: &[(String, String, String)]) -> Result<usize> {
        let mut specs = Vec::with_capacity(rows.len());
        for (name, r, c) in rows {
            specs.push(ClassroomSpec::new(name, parse_dimension("rows", r)?, parse_dimension("cols", c)?)?);
        }
        Ok(self.load_classrooms(specs))
    }

    pub fn set_roster(&mut self, roster: Roster) {
        info!(students = roster.len(), "roster loaded");
        self.roster = Some(roster);
    }

    pub fn roster(&self) -> Option<&Roster> {
        self.roster.as_ref()
    }

    pub fn last_plan(&self) -> Option<&SeatingPlan> {
        self.plan.as_ref()
    }

    /// Ejecuta el planificador sobre el registro y el roster cargado.
    pub fn plan<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&SeatingPlan> {
        let roster = self.roster.as_ref().ok_or(SeatingError::RosterNotLoaded)?;
        let plan = create_seating_plan(&self.classrooms, roster, rng);
        Ok(self.plan.insert(plan))
    }

    /// Búsqueda de estudiante por matrícula; `None` si no existe.
    pub fn lookup_student(&self, enrollment: &str) -> Option<StudentInfo> {
        self.roster.as_ref()?.get(enrollment.trim()).map(|s| s.info())
    }

    /// Quién ocupa (row, col) de `classroom` en el último plan.
    pub fn seat_occupant(&self, classroom: &str, row: usize, col: usize) -> Result<SeatLookup> {
        let plan = self.plan.as_ref().ok_or(SeatingError::NoPlan)?;
        let grid = plan.get(classroom).ok_or_else(|| SeatingError::ClassroomNotFound(classroom.to_string()))?;
        if row >= grid.rows() || col >= grid.cols() {
            return Err(SeatingError::SeatOutOfRange { classroom: classroom.to_string(), row, col });
        }
        let Some(enrollment) = grid.get(row, col) else { return Ok(SeatLookup::Empty) };
        Ok(match self.lookup_student(enrollment) {
            Some(student) => SeatLookup::Occupied { enrollment: enrollment.to_string(), student },
            None => SeatLookup::Unknown { enrollment: enrollment.to_string() },
        })
    }
}

/// Parsea un campo rows/cols; acepta flotantes enteros como "3.0" (celdas Excel).
/// El flotante debe convertirse a i64 sin pérdida.
pub fn parse_dimension(field: &str, raw: &str) -> Result<i64> {
    let t = raw.trim();
    if let Ok(v) = t.parse::<i64>() {
        return Ok(v);
    }
    let invalid = || SeatingError::InvalidClassroom(format!("{} must be an integer, got '{}'", field, raw));
    let f = t.parse::<f64>().map_err(|_| invalid())?;
    let v = f as i64;
    if f.is_finite() && f.fract() == 0.0 && v as f64 == f && v.unsigned_abs() < (1u64 << 53) {
        Ok(v)
    } else {
        Err(invalid())
    }
}
