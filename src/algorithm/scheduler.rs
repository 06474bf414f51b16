//! Fuente round-robin de candidatos sobre la lista (barajada) de grupos.
//!
//! El scheduler nunca quita estudiantes de su grupo: cada extracción entrega
//! al estudiante en el offset actual y avanza el offset, se siente o no.
//! Cuando el grupo actual se agota, el cursor pasa al siguiente grupo con
//! estudiantes pendientes y el llamador reintenta. Un grupo agotado no se
//! vuelve a elegir, así que cada estudiante se ofrece a lo sumo una vez.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::algorithm::grouping::Group;
use crate::models::Student;

/// Resultado de una llamada a `next_candidate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw<'a> {
    Candidate(&'a Student),
    /// El grupo actual se agotó; el cursor ya apunta a otro grupo.
    Rotated,
    /// Todos los grupos están agotados.
    Depleted,
}

#[derive(Debug, Clone)]
pub struct GroupScheduler {
    groups: Vec<Group>,
    exhausted: Vec<bool>,
    group_idx: usize,
    offset: usize,
}

impl GroupScheduler {
    /// Conserva los grupos en el orden recibido.
    pub fn new(groups: Vec<Group>) -> Self {
        let exhausted = vec![false; groups.len()];
        GroupScheduler { groups, exhausted, group_idx: 0, offset: 0 }
    }

    /// Baraja el orden de los grupos con `rng` antes de empezar.
    pub fn shuffled<R: Rng + ?Sized>(mut groups: Vec<Group>, rng: &mut R) -> Self {
        groups.shuffle(rng);
        Self::new(groups)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// (índice_de_grupo, offset_dentro_del_grupo)
    pub fn cursor(&self) -> (usize, usize) {
        (self.group_idx, self.offset)
    }

    pub fn is_exhausted(&self, group_idx: usize) -> bool {
        self.exhausted.get(group_idx).copied().unwrap_or(true)
    }

    pub fn next_candidate(&mut self) -> Draw<'_> {
        if self.is_exhausted(self.group_idx) {
            return Draw::Depleted;
        }
        if self.offset < self.groups[self.group_idx].len() {
            let at = self.offset;
            self.offset += 1;
            return Draw::Candidate(&self.groups[self.group_idx].students[at]);
        }

        self.exhausted[self.group_idx] = true;
        match self.next_open_group() {
            Some(next) => {
                self.group_idx = next;
                self.offset = 0;
                Draw::Rotated
            }
            None => Draw::Depleted,
        }
    }

    fn next_open_group(&self) -> Option<usize> {
        let n = self.groups.len();
        (1..=n).map(|step| (self.group_idx + step) % n).find(|&i| !self.exhausted[i])
    }
}
