// Llenado greedy de las salas, fila por fila, sin backtracking.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::algorithm::conflict::has_adjacent_conflict;
use crate::algorithm::grouping::{Group, group_students_by_year_and_branch};
use crate::algorithm::scheduler::{Draw, GroupScheduler};
use crate::models::{ClassroomSeating, ClassroomSpec, Roster, SeatingGrid, SeatingPlan};

/// Generador con semilla para corridas reproducibles; si no, entropía del SO.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Agrupa el roster, baraja los grupos con `rng` y llena cada sala.
pub fn create_seating_plan<R: Rng + ?Sized>(classrooms: &[ClassroomSpec], roster: &Roster, rng: &mut R) -> SeatingPlan {
    let groups = group_students_by_year_and_branch(roster);
    fill_classrooms(classrooms, roster, GroupScheduler::shuffled(groups, rng))
}

/// Igual que [`create_seating_plan`] pero con un orden de grupos fijo.
pub fn create_seating_plan_with_groups(classrooms: &[ClassroomSpec], roster: &Roster, groups: Vec<Group>) -> SeatingPlan {
    fill_classrooms(classrooms, roster, GroupScheduler::new(groups))
}

/// Llena las salas en orden usando un único scheduler compartido.
pub fn fill_classrooms(classrooms: &[ClassroomSpec], roster: &Roster, mut scheduler: GroupScheduler) -> SeatingPlan {
    let mut plan = SeatingPlan::default();
    for spec in classrooms {
        let grid = fill_classroom(spec, roster, &mut scheduler);
        plan.classrooms.push(ClassroomSeating { classroom: spec.name.clone(), grid });
    }
    let summary = PlanSummary::from_plan(&plan, roster);
    info!(
        classrooms = plan.len(),
        seated = summary.seated,
        unseated = summary.unseated,
        "seating plan created"
    );
    plan
}

/// Llena una sala fila por fila. Cada extracción, aceptada o no, gasta una
/// unidad de un presupuesto igual al número de grupos; la celda que agota su
/// presupuesto queda vacía.
pub fn fill_classroom(spec: &ClassroomSpec, roster: &Roster, scheduler: &mut GroupScheduler) -> SeatingGrid {
    let mut grid = SeatingGrid::empty(spec.rows, spec.cols);
    let budget = scheduler.group_count();

    for r in 0..spec.rows {
        for c in 0..spec.cols {
            let mut attempts = 0;
            let mut placed = false;
            while !placed && attempts < budget {
                match scheduler.next_candidate() {
                    Draw::Candidate(student) => {
                        if !has_adjacent_conflict(&grid, r, c, student, roster) {
                            grid.place(r, c, &student.enrollment);
                            placed = true;
                        } else {
                            debug!(classroom = %spec.name, r, c, enrollment = %student.enrollment, "candidate rejected");
                        }
                    }
                    Draw::Rotated => {}
                    Draw::Depleted => break,
                }
                attempts += 1;
            }
            if !placed {
                debug!(classroom = %spec.name, r, c, "seat left empty");
            }
        }
    }
    grid
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassroomSummary {
    pub classroom: String,
    pub capacity: usize,
    pub seated: usize,
    pub empty: usize,
}

/// Cifras de ocupación de un plan terminado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub classrooms: Vec<ClassroomSummary>,
    pub seated: usize,
    pub unseated: usize,
}

impl PlanSummary {
    pub fn from_plan(plan: &SeatingPlan, roster: &Roster) -> Self {
        let classrooms: Vec<ClassroomSummary> = plan
            .iter()
            .map(|(name, grid)| {
                let capacity = grid.rows() * grid.cols();
                let seated = grid.seated_count();
                ClassroomSummary { classroom: name.to_string(), capacity, seated, empty: capacity - seated }
            })
            .collect();
        let seated = classrooms.iter().map(|c| c.seated).sum();
        PlanSummary { classrooms, seated, unseated: roster.len().saturating_sub(seated) }
    }
}
