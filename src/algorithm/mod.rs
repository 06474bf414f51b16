// Módulo de alto nivel del algoritmo de asignación de asientos
// Declarar submódulos (archivos en la carpeta `src/algorithm`)
pub mod conflict;
pub mod grouping;
pub mod planner;
pub mod scheduler;

// Reexportar solo la API pública que se usa desde `session` y el servidor
pub use conflict::has_adjacent_conflict;
pub use grouping::{Group, group_students_by_year_and_branch};
pub use planner::{
    ClassroomSummary, PlanSummary, create_seating_plan, create_seating_plan_with_groups, fill_classroom,
    fill_classrooms, make_rng,
};
pub use scheduler::{Draw, GroupScheduler};
