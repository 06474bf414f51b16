// Regla de adyacencia: mismo (year, branch) no puede quedar al lado ni en diagonal.
use crate::models::{Roster, SeatingGrid, Student};

/// Vecinos horizontales y diagonales. Arriba/abajo en línea recta no se revisan.
const NEIGHBOURS: [(isize, isize); 6] = [(0, -1), (0, 1), (-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Verdadero si sentar a `candidate` en (r, c) lo deja junto a un estudiante
/// del mismo año y rama.
///
/// Un vecino cuya matrícula no está en el roster nunca genera conflicto.
pub fn has_adjacent_conflict(grid: &SeatingGrid, r: usize, c: usize, candidate: &Student, roster: &Roster) -> bool {
    let rows = grid.rows() as isize;
    let cols = grid.cols() as isize;

    for (dr, dc) in NEIGHBOURS {
        let nr = r as isize + dr;
        let nc = c as isize + dc;
        if nr < 0 || nc < 0 || nr >= rows || nc >= cols {
            continue;
        }
        let Some(enrollment) = grid.get(nr as usize, nc as usize) else { continue };
        if let Some(neighbour) = roster.get(enrollment) {
            if neighbour.group_key() == candidate.group_key() {
                return true;
            }
        }
    }
    false
}
