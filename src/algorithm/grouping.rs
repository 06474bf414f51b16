// Agrupa el roster por (year, branch).
use std::collections::BTreeMap;

use crate::models::{Roster, Student};

/// Estudiantes con el mismo par (year, branch), en el orden del roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub year: String,
    pub branch: String,
    pub students: Vec<Student>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

/// Divide el roster en un grupo por cada (year, branch) distinto.
///
/// Los grupos salen ordenados por clave; los miembros conservan el orden de filas.
pub fn group_students_by_year_and_branch(roster: &Roster) -> Vec<Group> {
    let mut buckets: BTreeMap<(&str, &str), Vec<Student>> = BTreeMap::new();
    for s in roster.students() {
        buckets.entry(s.group_key()).or_default().push(s.clone());
    }
    buckets
        .into_iter()
        .map(|((year, branch), students)| Group { year: year.to_string(), branch: branch.to_string(), students })
        .collect()
}
